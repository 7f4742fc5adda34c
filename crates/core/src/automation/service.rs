//! Status-change automation: the gate in front of provisioning.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use super::config::AutomationConfig;
use super::types::{AutomationData, AutomationError, AutomationResult, StatusTrigger};
use super::webhook::parse_webhook;
use crate::config::Config;
use crate::metrics;
use crate::provisioner::{FolderProvisioner, ProvisionRequest};
use crate::record::{RecordReader, RecordStore, RecordWriter};
use crate::storage::StorageBackend;

/// Reacts to ticket status changes.
///
/// A status equal to the configured trigger runs reader, provisioner and
/// writer in sequence; any other status is a successful no-op. Failures of
/// the reader or provisioner become a failed [`AutomationResult`]; a failed
/// write-back of the delivery link is only logged.
pub struct TicketAutomation {
    config: AutomationConfig,
    reader: RecordReader,
    writer: RecordWriter,
    provisioner: FolderProvisioner,
}

impl TicketAutomation {
    pub fn new(
        config: AutomationConfig,
        reader: RecordReader,
        writer: RecordWriter,
        provisioner: FolderProvisioner,
    ) -> Self {
        Self {
            config,
            reader,
            writer,
            provisioner,
        }
    }

    /// Wire up the automation from configuration and the two backends.
    pub fn from_config(
        config: &Config,
        records: Arc<dyn RecordStore>,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        let reader = RecordReader::new(Arc::clone(&records), config.record_store.fields.clone());
        let writer = RecordWriter::new(records, config.record_store.link_fields.clone());
        let provisioner = FolderProvisioner::new(storage, config.provisioner.clone());
        Self::new(config.automation.clone(), reader, writer, provisioner)
    }

    pub fn config(&self) -> &AutomationConfig {
        &self.config
    }

    pub fn provisioner(&self) -> &FolderProvisioner {
        &self.provisioner
    }

    /// Whether a status value starts provisioning.
    pub fn triggers(&self, status: &str) -> bool {
        status == self.config.trigger_status
    }

    /// Read the status trigger out of a webhook payload.
    pub fn parse_webhook(&self, payload: &Value) -> Result<StatusTrigger, AutomationError> {
        parse_webhook(payload, &self.config.webhook_status_properties)
    }

    /// Handle a status change of a ticket.
    pub async fn process_status_change(&self, ticket_id: &str, status: &str) -> AutomationResult {
        info!(
            "Processing status change for ticket {} to '{}'",
            ticket_id, status
        );

        if !self.triggers(status) {
            metrics::AUTOMATION_RUNS
                .with_label_values(&["skipped"])
                .inc();
            return AutomationResult::skipped("Status change does not trigger automation");
        }

        match self.provision_ticket(ticket_id).await {
            Ok(data) => {
                metrics::AUTOMATION_RUNS
                    .with_label_values(&["completed"])
                    .inc();
                info!(
                    "Ticket {} provisioned at {}",
                    ticket_id, data.folder_result.folder_path
                );
                AutomationResult::completed(data)
            }
            Err(e) => {
                metrics::AUTOMATION_RUNS
                    .with_label_values(&["failed"])
                    .inc();
                error!("Ticket automation failed for {}: {}", ticket_id, e);
                AutomationResult::failed(e)
            }
        }
    }

    /// Handle a webhook payload end to end.
    pub async fn process_webhook(&self, payload: &Value) -> AutomationResult {
        match self.parse_webhook(payload) {
            Ok(trigger) => {
                self.process_status_change(&trigger.ticket_id, &trigger.status)
                    .await
            }
            Err(e) => {
                warn!("Ignoring webhook: {}", e);
                AutomationResult::failed(e)
            }
        }
    }

    async fn provision_ticket(&self, ticket_id: &str) -> Result<AutomationData, AutomationError> {
        let ticket = self.reader.get_ticket(ticket_id).await?;

        let request_type = ticket
            .request_type
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AutomationError::Validation("Request Type is required".to_string()))?;
        if ticket.id.is_empty() {
            return Err(AutomationError::Validation(
                "Ticket ID is required".to_string(),
            ));
        }

        let request = ProvisionRequest {
            date: ticket.date.clone(),
            request_type,
            ticket_id: ticket.id.clone(),
            title: ticket.title.clone(),
        };
        let folder_result = self.provisioner.provision(&request).await?;

        if let Some(link) = &folder_result.delivery_folder_link {
            if let Err(e) = self
                .writer
                .set_ticket_field(ticket_id, &self.config.delivery_link_field, link)
                .await
            {
                metrics::WRITE_BACK_FAILURES.inc();
                warn!(
                    "Could not update ticket {} with delivery folder link: {}",
                    ticket_id, e
                );
            }
        } else {
            warn!(
                "No '{}' folder provisioned for ticket {}; skipping link write-back",
                self.provisioner.config().delivery_folder,
                ticket_id
            );
        }

        Ok(AutomationData {
            ticket_data: ticket,
            folder_result,
        })
    }
}
