//! Storage backend collaborator interface.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{FolderEntry, PermissionRole, Principal};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Credentials rejected (401/403).
    #[error("Storage rejected credentials: {0}")]
    Unauthorized(String),

    /// Parent or target not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

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

/// Folder operations offered by a cloud storage service.
///
/// Implementations only report non-trashed folders. Result order is the
/// backend's own and is used as-is.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Name of this backend, for logs.
    fn name(&self) -> &str;

    /// Folders named exactly `name` directly under `parent_id`.
    async fn search_folders(
        &self,
        name: &str,
        parent_id: &str,
    ) -> Result<Vec<FolderEntry>, StorageError>;

    /// Folders directly under `parent_id` whose name contains `fragment`.
    async fn list_child_folders(
        &self,
        parent_id: &str,
        fragment: &str,
    ) -> Result<Vec<FolderEntry>, StorageError>;

    /// Create a folder and return its id.
    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<String, StorageError>;

    /// Grant `role` on a folder to `principal`.
    async fn set_permission(
        &self,
        folder_id: &str,
        role: PermissionRole,
        principal: Principal,
    ) -> Result<(), StorageError>;
}
