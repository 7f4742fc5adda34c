//! HTTP integration tests for the automation endpoints.
//!
//! These tests run the router in-process with mock record store and
//! storage backend.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestFixture, ROOT_FOLDER};

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new();
    let response = fixture.get("/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["timestamp"].is_string());
}

#[tokio::test]
async fn test_config_endpoint_redacts_secrets() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["record_store"]["api_key_configured"], true);
    assert_eq!(response.body["storage"]["access_token_configured"], true);
    assert_eq!(response.body["provisioner"]["root_folder_configured"], true);
    assert!(!response.text.contains("secret_test"));
    assert!(!response.text.contains("token_test"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    fixture.get("/health").await;

    let response = fixture.get("/metrics").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("kickoff_http_requests_total"));
}

// =============================================================================
// Webhook
// =============================================================================

#[tokio::test]
async fn test_webhook_provisions_ticket() {
    let fixture = TestFixture::new();
    fixture.records.insert(fixtures::video_ticket("T-42")).await;

    let response = fixture
        .post(
            "/webhook/notion",
            fixtures::webhook_payload("T-42", "Active"),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(
        response.body["message"],
        "Ticket automation completed successfully"
    );
    assert_eq!(
        response.body["data"]["folder_result"]["folder_path"],
        "2024/Q3/T-42/Video"
    );
    assert!(response.body["data"]["folder_result"]["delivery_folder_link"]
        .as_str()
        .unwrap()
        .starts_with("https://drive.google.com/drive/folders/"));

    assert_eq!(fixture.storage.children(ROOT_FOLDER).await.len(), 1);
    assert_eq!(fixture.records.recorded_updates().await.len(), 1);
}

#[tokio::test]
async fn test_webhook_non_trigger_status_is_noop() {
    let fixture = TestFixture::new();
    fixture.records.insert(fixtures::video_ticket("T-42")).await;

    let response = fixture
        .post("/webhook/notion", fixtures::webhook_payload("T-42", "Done"))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(
        response.body["message"],
        "Status change does not trigger automation"
    );
    assert!(response.body.get("data").is_none());
    assert_eq!(fixture.storage.call_count().await, 0);
}

#[tokio::test]
async fn test_webhook_without_status_is_bad_request() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/webhook/notion", json!({"data": {"id": "T-42"}}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert!(response.body["error"].is_string());
    assert_eq!(fixture.records.retrieve_count().await, 0);
}

#[tokio::test]
async fn test_webhook_malformed_json_is_rejected() {
    let fixture = TestFixture::new();
    let response = fixture.post_raw("/webhook/notion", "{not json").await;

    assert!(response.status.is_client_error());
    assert_eq!(fixture.storage.call_count().await, 0);
}

#[tokio::test]
async fn test_webhook_unknown_ticket_is_server_error() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/webhook/notion",
            fixtures::webhook_payload("missing", "Active"),
        )
        .await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["success"], false);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("missing"));
    assert_eq!(fixture.storage.call_count().await, 0);
}

// =============================================================================
// Manual trigger
// =============================================================================

#[tokio::test]
async fn test_trigger_provisions_ticket() {
    let fixture = TestFixture::new();
    fixture.records.insert(fixtures::graphic_ticket("T-7")).await;

    let response = fixture
        .post(
            "/api/v1/automation/trigger",
            json!({"ticket_id": "T-7", "status": "Active"}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.body["data"]["folder_result"]["folder_path"],
        "2024/Q1/T-7/Graphic"
    );
}

#[tokio::test]
async fn test_trigger_storage_failure_is_server_error() {
    let fixture = TestFixture::new();
    fixture.records.insert(fixtures::video_ticket("T-42")).await;
    fixture.storage.fail_create_of("Q3").await;

    let response = fixture
        .post(
            "/api/v1/automation/trigger",
            json!({"ticket_id": "T-42", "status": "Active"}),
        )
        .await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["success"], false);
    assert!(response.body["error"].as_str().unwrap().contains("Q3"));
    assert!(fixture.records.recorded_updates().await.is_empty());
}

#[tokio::test]
async fn test_trigger_blank_fields_are_bad_request() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/automation/trigger",
            json!({"ticket_id": " ", "status": "Active"}),
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(fixture.records.retrieve_count().await, 0);
}

#[tokio::test]
async fn test_trigger_uses_configured_status() {
    let fixture = TestFixture::with_config(|config| {
        config.automation.trigger_status = "Kickoff".to_string();
    });
    fixture.records.insert(fixtures::video_ticket("T-42")).await;

    let skipped = fixture
        .post(
            "/api/v1/automation/trigger",
            json!({"ticket_id": "T-42", "status": "Active"}),
        )
        .await;
    assert!(skipped.body.get("data").is_none());

    let provisioned = fixture
        .post(
            "/api/v1/automation/trigger",
            json!({"ticket_id": "T-42", "status": "Kickoff"}),
        )
        .await;
    assert_status!(provisioned, StatusCode::OK);
    assert!(provisioned.body["data"].is_object());
}
