//! Automation API handlers: the Notion webhook and the manual trigger.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use kickoff_core::{AutomationError, AutomationResult};

use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Request body for a manual trigger
#[derive(Debug, Deserialize)]
pub struct TriggerBody {
    /// Record id of the ticket
    pub ticket_id: String,
    /// Status value to act on
    pub status: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Handle a webhook sent by a Notion database automation.
pub async fn notion_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<AutomationResult>) {
    info!("Received Notion webhook");
    let result = state.automation().process_webhook(&payload).await;
    respond(result)
}

/// Run the automation for a ticket and status given directly.
pub async fn trigger(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TriggerBody>,
) -> (StatusCode, Json<AutomationResult>) {
    if body.ticket_id.trim().is_empty() || body.status.trim().is_empty() {
        return respond(AutomationResult::failed(AutomationError::InvalidPayload(
            "ticket_id and status are required".to_string(),
        )));
    }
    let result = state
        .automation()
        .process_status_change(&body.ticket_id, &body.status)
        .await;
    respond(result)
}

fn respond(result: AutomationResult) -> (StatusCode, Json<AutomationResult>) {
    (status_for(&result), Json(result))
}

/// HTTP status for an automation outcome.
pub fn status_for(result: &AutomationResult) -> StatusCode {
    match &result.error {
        None => StatusCode::OK,
        Some(AutomationError::InvalidPayload(_)) => StatusCode::BAD_REQUEST,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_outcomes() {
        assert_eq!(
            status_for(&AutomationResult::skipped("nothing to do")),
            StatusCode::OK
        );
        assert_eq!(
            status_for(&AutomationResult::failed(AutomationError::InvalidPayload(
                "missing".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AutomationResult::failed(AutomationError::Validation(
                "Request Type is required".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
