//! Interpretation of record store webhook payloads.

use serde_json::Value;

use super::types::{AutomationError, StatusTrigger};
use crate::record::{PropertyValue, Scalar};

/// Extract the page id and new status from a webhook payload.
///
/// Accepts both the automation shape (`data.id`, `data.properties`) and the
/// page event shape (`page.id`, `properties`). The status is read from the
/// first of `status_properties` holding a select or status value.
pub fn parse_webhook(
    payload: &Value,
    status_properties: &[String],
) -> Result<StatusTrigger, AutomationError> {
    let ticket_id = payload
        .pointer("/data/id")
        .or_else(|| payload.pointer("/page/id"))
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty());

    let properties = payload
        .pointer("/data/properties")
        .or_else(|| payload.get("properties"));

    let status = properties.and_then(|props| {
        status_properties
            .iter()
            .filter_map(|name| props.get(name.as_str()))
            .find_map(status_value)
    });

    match (ticket_id, status) {
        (Some(ticket_id), Some(status)) => Ok(StatusTrigger {
            ticket_id: ticket_id.to_string(),
            status,
        }),
        _ => Err(AutomationError::InvalidPayload(
            "pageId and status are required in webhook payload".to_string(),
        )),
    }
}

fn status_value(property: &Value) -> Option<String> {
    let value: PropertyValue = serde_json::from_value(property.clone()).ok()?;
    match value {
        PropertyValue::Select { .. } | PropertyValue::Status { .. } => match value.normalize() {
            Some(Scalar::Text(name)) => Some(name),
            _ => None,
        },
        _ => None,
    }
}
