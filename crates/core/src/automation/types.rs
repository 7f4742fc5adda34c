//! Types for the ticket automation.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::provisioner::{FolderResult, ProvisionError};
use crate::record::{RecordError, TicketData};

/// Errors that end an automation run.
#[derive(Debug, Error)]
pub enum AutomationError {
    /// Ticket data is missing a required field.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Reading the ticket failed.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Building the folder tree failed.
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// A trigger payload did not carry a ticket id and status.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl AutomationError {
    /// Whether the error was caused by the input rather than a remote
    /// service.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) | Self::InvalidPayload(_) => true,
            Self::Provision(e) => e.is_validation(),
            Self::Record(_) => false,
        }
    }
}

/// A status change to act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTrigger {
    pub ticket_id: String,
    pub status: String,
}

/// Ticket and folders of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomationData {
    pub ticket_data: TicketData,
    pub folder_result: FolderResult,
}

/// Outcome of an automation run. Always produced, never an `Err`.
#[derive(Debug, Serialize)]
pub struct AutomationResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AutomationData>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_error"
    )]
    pub error: Option<AutomationError>,
}

fn serialize_error<S>(error: &Option<AutomationError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(e) => serializer.serialize_str(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

impl AutomationResult {
    /// The status did not call for any action.
    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    pub fn completed(data: AutomationData) -> Self {
        Self {
            success: true,
            message: "Ticket automation completed successfully".to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: AutomationError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            data: None,
            error: Some(error),
        }
    }

    /// Whether the run provisioned folders.
    pub fn provisioned(&self) -> bool {
        self.data.is_some()
    }
}
