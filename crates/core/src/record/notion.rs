//! Notion pages API client.
//!
//! Pages are retrieved and patched through the public REST API using an
//! internal integration token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::store::{RecordStore, RecordStoreError};
use super::types::{PropertyUpdate, RawRecord};

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
const DEFAULT_API_VERSION: &str = "2022-06-28";

/// Notion client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token.
    #[serde(default)]
    pub api_key: String,
    /// Base URL (default: https://api.notion.com/v1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Value sent in the `Notion-Version` header.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout() -> u32 {
    30
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            api_version: default_api_version(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Record store backed by Notion pages.
pub struct NotionRecordStore {
    client: Client,
    base_url: String,
    api_key: String,
    api_version: String,
}

impl NotionRecordStore {
    pub fn new(config: NotionConfig) -> Result<Self, RecordStoreError> {
        if config.api_key.is_empty() {
            return Err(RecordStoreError::Unauthorized(
                "Notion API key is required".to_string(),
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
            api_key: config.api_key,
            api_version: config.api_version,
        })
    }

    fn page_url(&self, id: &str) -> String {
        format!("{}/pages/{}", self.base_url, id)
    }

    async fn check_status(response: Response, id: &str) -> Result<Response, RecordStoreError> {
        let status = response.status();
        if status == 404 {
            return Err(RecordStoreError::NotFound(id.to_string()));
        }
        if status == 401 || status == 403 {
            return Err(RecordStoreError::Unauthorized(format!(
                "status {} for page {}",
                status.as_u16(),
                id
            )));
        }
        if status == 429 {
            return Err(RecordStoreError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecordStoreError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response)
    }
}

/// Body of a property patch for a single property.
fn property_patch(value: &PropertyUpdate) -> Value {
    match value {
        PropertyUpdate::RichText(content) => json!({
            "rich_text": [{ "text": { "content": content } }]
        }),
        PropertyUpdate::Url(url) => json!({ "url": url }),
    }
}

#[async_trait]
impl RecordStore for NotionRecordStore {
    fn name(&self) -> &str {
        "notion"
    }

    async fn retrieve(&self, id: &str) -> Result<RawRecord, RecordStoreError> {
        debug!("Notion retrieve page: id={}", id);

        let response = self
            .client
            .get(self.page_url(id))
            .bearer_auth(&self.api_key)
            .header("Notion-Version", &self.api_version)
            .send()
            .await?;

        let response = Self::check_status(response, id).await?;

        response.json::<RawRecord>().await.map_err(|e| {
            RecordStoreError::ParseError(format!("Failed to parse page response: {}", e))
        })
    }

    async fn update(
        &self,
        id: &str,
        property: &str,
        value: PropertyUpdate,
    ) -> Result<(), RecordStoreError> {
        debug!("Notion update page: id={}, property='{}'", id, property);

        let mut properties = serde_json::Map::new();
        properties.insert(property.to_string(), property_patch(&value));

        let response = self
            .client
            .patch(self.page_url(id))
            .bearer_auth(&self.api_key)
            .header("Notion-Version", &self.api_version)
            .json(&json!({ "properties": properties }))
            .send()
            .await?;

        Self::check_status(response, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn store_for(server: &mockito::ServerGuard) -> NotionRecordStore {
        NotionRecordStore::new(NotionConfig {
            api_key: "secret_test".to_string(),
            base_url: Some(server.url()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let result = NotionRecordStore::new(NotionConfig::default());
        assert!(matches!(result, Err(RecordStoreError::Unauthorized(_))));
    }

    #[test]
    fn test_property_patch_shapes() {
        let text = property_patch(&PropertyUpdate::RichText("hello".into()));
        assert_eq!(text["rich_text"][0]["text"]["content"], "hello");

        let url = property_patch(&PropertyUpdate::Url("https://x".into()));
        assert_eq!(url["url"], "https://x");
    }

    #[tokio::test]
    async fn test_retrieve_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/pages/page-1")
            .match_header("authorization", "Bearer secret_test")
            .match_header("notion-version", DEFAULT_API_VERSION)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "object": "page",
                    "id": "page-1",
                    "properties": {
                        "Request Type": {"id": "a", "type": "select", "select": {"name": "Blue"}},
                        "Due Date": {"id": "b", "type": "date", "date": {"start": "2024-07-15"}}
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let store = store_for(&server);
        let record = store.retrieve("page-1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(record.id, "page-1");
        assert_eq!(record.text("Request Type").as_deref(), Some("Blue"));
        assert_eq!(record.text("Due Date").as_deref(), Some("2024-07-15"));
    }

    #[tokio::test]
    async fn test_retrieve_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/pages/missing")
            .with_status(404)
            .with_body(r#"{"object":"error","status":404}"#)
            .create_async()
            .await;

        let store = store_for(&server);
        let result = store.retrieve("missing").await;
        assert!(matches!(result, Err(RecordStoreError::NotFound(id)) if id == "missing"));
    }

    #[tokio::test]
    async fn test_update_sends_url_patch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/pages/page-1")
            .match_body(Matcher::Json(json!({
                "properties": {
                    "Drive Delivery Folder": {"url": "https://drive.google.com/drive/folders/abc"}
                }
            })))
            .with_status(200)
            .with_body(r#"{"object":"page","id":"page-1"}"#)
            .create_async()
            .await;

        let store = store_for(&server);
        store
            .update(
                "page-1",
                "Drive Delivery Folder",
                PropertyUpdate::Url("https://drive.google.com/drive/folders/abc".into()),
            )
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/pages/page-1")
            .with_status(400)
            .with_body("validation_error")
            .create_async()
            .await;

        let store = store_for(&server);
        let result = store
            .update("page-1", "Notes", PropertyUpdate::RichText("x".into()))
            .await;

        match result {
            Err(RecordStoreError::ApiError { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "validation_error");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }
}
