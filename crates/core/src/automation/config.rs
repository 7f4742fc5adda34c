//! Automation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the status-change automation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// Status value that starts provisioning. Compared case-sensitively.
    #[serde(default = "default_trigger_status")]
    pub trigger_status: String,

    /// Record property that receives the delivery folder link.
    #[serde(default = "default_delivery_link_field")]
    pub delivery_link_field: String,

    /// Webhook payload properties that may carry the new status, tried in
    /// order.
    #[serde(default = "default_webhook_status_properties")]
    pub webhook_status_properties: Vec<String>,
}

fn default_trigger_status() -> String {
    "Active".to_string()
}

fn default_delivery_link_field() -> String {
    "Drive Delivery Folder".to_string()
}

fn default_webhook_status_properties() -> Vec<String> {
    vec!["Status (FOR CBP ONLY)".to_string(), "Status".to_string()]
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            trigger_status: default_trigger_status(),
            delivery_link_field: default_delivery_link_field(),
            webhook_status_properties: default_webhook_status_properties(),
        }
    }
}
