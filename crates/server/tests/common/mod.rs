//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock collaborators injected, so the HTTP surface can be exercised
//! without Notion or Drive.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use kickoff_core::{
    testing::{MockRecordStore, MockStorage},
    Config, TicketAutomation,
};

/// Re-export fixtures for test convenience
pub use kickoff_core::testing::fixtures;

/// Root folder id configured for every fixture.
pub const ROOT_FOLDER: &str = "root-folder";

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_trigger() {
///     let fixture = TestFixture::new();
///     fixture.records.insert(fixtures::video_ticket("T-42")).await;
///
///     let response = fixture.post("/api/v1/automation/trigger", json!({
///         "ticket_id": "T-42",
///         "status": "Active"
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock record store - seed tickets, inspect write-backs
    pub records: Arc<MockRecordStore>,
    /// Mock storage - inspect folders, inject failures
    pub storage: Arc<MockStorage>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default configuration.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test fixture, adjusting the configuration first.
    pub fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let records = Arc::new(MockRecordStore::new());
        let storage = Arc::new(MockStorage::new());

        let mut config = Config::default();
        config.record_store.notion.api_key = "secret_test".to_string();
        config.storage.drive.access_token = "token_test".to_string();
        config.provisioner.root_folder_id = ROOT_FOLDER.to_string();
        adjust(&mut config);

        let automation = Arc::new(TicketAutomation::from_config(
            &config,
            records.clone(),
            storage.clone(),
        ));
        let state = Arc::new(kickoff_server::state::AppState::new(config, automation));
        let router = kickoff_server::api::create_router(state);

        Self {
            router,
            records,
            storage,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, Body::empty(), None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let bytes = serde_json::to_vec(&body).unwrap();
        self.request("POST", path, Body::from(bytes), Some("application/json"))
            .await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.request(
            "POST",
            path,
            Body::from(body.to_string()),
            Some("application/json"),
        )
        .await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let request = builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            $response.text
        );
    };
}
