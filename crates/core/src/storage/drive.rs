//! Google Drive v3 client.
//!
//! Authenticates with an OAuth bearer token. Minting and refreshing that
//! token happens outside this service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::backend::{StorageBackend, StorageError};
use super::types::{FolderEntry, PermissionRole, Principal};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Drive client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// OAuth access token with the drive scope.
    #[serde(default)]
    pub access_token: String,
    /// Base URL (default: https://www.googleapis.com/drive/v3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Storage backend backed by Google Drive.
pub struct DriveStorage {
    client: Client,
    base_url: String,
    access_token: String,
}

/// Escape a value for use inside a single-quoted Drive query literal.
pub fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn exact_name_query(name: &str, parent_id: &str) -> String {
    format!(
        "name='{}' and '{}' in parents and mimeType='{}' and trashed=false",
        escape_query_literal(name),
        escape_query_literal(parent_id),
        FOLDER_MIME_TYPE
    )
}

fn name_contains_query(parent_id: &str, fragment: &str) -> String {
    format!(
        "'{}' in parents and name contains '{}' and mimeType='{}' and trashed=false",
        escape_query_literal(parent_id),
        escape_query_literal(fragment),
        FOLDER_MIME_TYPE
    )
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FolderEntry>,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

impl DriveStorage {
    pub fn new(config: DriveConfig) -> Result<Self, StorageError> {
        if config.access_token.is_empty() {
            return Err(StorageError::Unauthorized(
                "Drive access token is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token,
        })
    }

    async fn check_status(response: Response, context: &str) -> Result<Response, StorageError> {
        let status = response.status();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            // Drive reports quota exhaustion as 403 as well.
            if body.contains("rateLimitExceeded") || body.contains("userRateLimitExceeded") {
                return Err(StorageError::RateLimitExceeded);
            }
            return Err(StorageError::Unauthorized(format!(
                "status {} during {}",
                status.as_u16(),
                context
            )));
        }
        if status == 404 {
            return Err(StorageError::NotFound(context.to_string()));
        }
        if status == 429 {
            return Err(StorageError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response)
    }

    async fn list(&self, query: String, context: &str) -> Result<Vec<FolderEntry>, StorageError> {
        debug!("Drive list: q={}", query);

        let response = self
            .client
            .get(format!("{}/files", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id, name)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await?;

        let response = Self::check_status(response, context).await?;

        let list: FileList = response.json().await.map_err(|e| {
            StorageError::ParseError(format!("Failed to parse file list response: {}", e))
        })?;

        Ok(list.files)
    }
}

#[async_trait]
impl StorageBackend for DriveStorage {
    fn name(&self) -> &str {
        "google_drive"
    }

    async fn search_folders(
        &self,
        name: &str,
        parent_id: &str,
    ) -> Result<Vec<FolderEntry>, StorageError> {
        self.list(exact_name_query(name, parent_id), "folder search")
            .await
    }

    async fn list_child_folders(
        &self,
        parent_id: &str,
        fragment: &str,
    ) -> Result<Vec<FolderEntry>, StorageError> {
        self.list(name_contains_query(parent_id, fragment), "folder listing")
            .await
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<String, StorageError> {
        debug!("Drive create folder: name='{}', parent={}", name, parent_id);

        let response = self
            .client
            .post(format!("{}/files", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[("fields", "id"), ("supportsAllDrives", "true")])
            .json(&json!({
                "name": name,
                "mimeType": FOLDER_MIME_TYPE,
                "parents": [parent_id],
            }))
            .send()
            .await?;

        let response = Self::check_status(response, "folder creation").await?;

        let created: CreatedFile = response.json().await.map_err(|e| {
            StorageError::ParseError(format!("Failed to parse create response: {}", e))
        })?;

        Ok(created.id)
    }

    async fn set_permission(
        &self,
        folder_id: &str,
        role: PermissionRole,
        principal: Principal,
    ) -> Result<(), StorageError> {
        debug!(
            "Drive set permission: folder={}, role={}, type={}",
            folder_id,
            role.as_str(),
            principal.as_str()
        );

        let response = self
            .client
            .post(format!("{}/files/{}/permissions", self.base_url, folder_id))
            .bearer_auth(&self.access_token)
            .query(&[("supportsAllDrives", "true")])
            .json(&json!({
                "role": role.as_str(),
                "type": principal.as_str(),
            }))
            .send()
            .await?;

        Self::check_status(response, "permission update").await?;
        Ok(())
    }
}
