use std::sync::Arc;
use kickoff_core::{Config, SanitizedConfig, TicketAutomation};

/// Shared application state
pub struct AppState {
    config: Config,
    automation: Arc<TicketAutomation>,
}

impl AppState {
    pub fn new(config: Config, automation: Arc<TicketAutomation>) -> Self {
        Self { config, automation }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn automation(&self) -> &TicketAutomation {
        self.automation.as_ref()
    }
}
