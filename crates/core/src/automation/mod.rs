//! Ticket automation: decides whether a status change provisions folders
//! and sequences the record reader, folder provisioner and record writer.

mod config;
mod service;
mod types;
mod webhook;

pub use config::AutomationConfig;
pub use service::TicketAutomation;
pub use types::{AutomationData, AutomationError, AutomationResult, StatusTrigger};
pub use webhook::parse_webhook;
