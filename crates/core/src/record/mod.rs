//! Ticket records: reading them from the record store and writing values
//! back onto them.

mod notion;
mod reader;
mod store;
mod types;
mod writer;

pub use notion::{NotionConfig, NotionRecordStore};
pub use reader::{RecordReader, TicketFields};
pub use store::{RecordStore, RecordStoreError};
pub use types::*;
pub use writer::RecordWriter;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the record reader and writer.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record could not be fetched.
    #[error("failed to fetch record {id}: {source}")]
    Fetch {
        id: String,
        #[source]
        source: RecordStoreError,
    },

    /// A property could not be written.
    #[error("failed to update field '{field}' on record {id}: {source}")]
    Update {
        id: String,
        field: String,
        #[source]
        source: RecordStoreError,
    },
}

/// Record store section of the configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordStoreConfig {
    #[serde(default)]
    pub notion: NotionConfig,
    /// Property names of the ticket fields.
    #[serde(default)]
    pub fields: TicketFields,
    /// Properties whose values are written as links.
    #[serde(default)]
    pub link_fields: Vec<String>,
}
