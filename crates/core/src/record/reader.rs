//! Reads tickets from the record store and flattens them.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::store::RecordStore;
use super::types::{RawRecord, TicketData};
use super::RecordError;

/// Names of the record properties that make up a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFields {
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_request_type")]
    pub request_type: String,
    #[serde(default = "default_due_date")]
    pub due_date: String,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_status() -> String {
    "Status".to_string()
}

fn default_request_type() -> String {
    "Request Type".to_string()
}

fn default_due_date() -> String {
    "Due Date".to_string()
}

fn default_title() -> String {
    "Ticket ID".to_string()
}

impl Default for TicketFields {
    fn default() -> Self {
        Self {
            status: default_status(),
            request_type: default_request_type(),
            due_date: default_due_date(),
            title: default_title(),
        }
    }
}

/// Fetches records and normalizes them into [`TicketData`].
#[derive(Clone)]
pub struct RecordReader {
    store: Arc<dyn RecordStore>,
    fields: TicketFields,
}

impl RecordReader {
    pub fn new(store: Arc<dyn RecordStore>, fields: TicketFields) -> Self {
        Self { store, fields }
    }

    /// Fetch a ticket by record id.
    pub async fn get_ticket(&self, id: &str) -> Result<TicketData, RecordError> {
        let record = self
            .store
            .retrieve(id)
            .await
            .map_err(|source| RecordError::Fetch {
                id: id.to_string(),
                source,
            })?;

        debug!(
            "Fetched record {} from {} with {} properties",
            record.id,
            self.store.name(),
            record.properties.len()
        );

        Ok(self.extract(&record))
    }

    /// Flatten a raw record. A missing due date is replaced by the current
    /// timestamp.
    pub fn extract(&self, record: &RawRecord) -> TicketData {
        let date = record
            .text(&self.fields.due_date)
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

        TicketData {
            id: record.id.clone(),
            status: record.text(&self.fields.status),
            request_type: record.text(&self.fields.request_type),
            date,
            title: record.text(&self.fields.title),
        }
    }
}
