//! Record store collaborator interface.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{PropertyUpdate, RawRecord};

/// Errors raised by a record store backend.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Record not found (404).
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Credentials rejected (401/403).
    #[error("Record store rejected credentials: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// A store of typed records, e.g. a Notion database.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Name of this backend, for logs.
    fn name(&self) -> &str;

    /// Retrieve a record by id.
    async fn retrieve(&self, id: &str) -> Result<RawRecord, RecordStoreError>;

    /// Set a single property on a record.
    async fn update(
        &self,
        id: &str,
        property: &str,
        value: PropertyUpdate,
    ) -> Result<(), RecordStoreError>;
}
