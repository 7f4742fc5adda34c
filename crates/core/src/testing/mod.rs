//! Testing utilities and mock implementations.
//!
//! This module provides in-memory implementations of the two collaborator
//! traits, so the whole automation can be exercised without Notion or
//! Drive.
//!
//! # Example
//!
//! ```rust,ignore
//! use kickoff_core::testing::{fixtures, MockRecordStore, MockStorage};
//!
//! let records = MockRecordStore::new();
//! let storage = MockStorage::new();
//!
//! records.insert(fixtures::video_ticket("T-42")).await;
//! storage.fail_create_of("Video").await;
//! ```

mod mock_record_store;
mod mock_storage;

pub use mock_record_store::{MockRecordStore, RecordedUpdate};
pub use mock_storage::{MockStorage, RecordedPermission, StoredFolder};

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::record::{PropertyValue, RawRecord};

    /// A ticket record with the default property names.
    pub fn ticket(id: &str, request_type: &str, due_date: &str) -> RawRecord {
        RawRecord::new(id)
            .with_property("Status", PropertyValue::status("Active"))
            .with_property("Request Type", PropertyValue::select(request_type))
            .with_property("Due Date", PropertyValue::date(due_date))
            .with_property("Ticket ID", PropertyValue::title(id))
    }

    /// A "Blue" (video) ticket due 2024-07-15.
    pub fn video_ticket(id: &str) -> RawRecord {
        ticket(id, "Blue", "2024-07-15")
    }

    /// A "Red" (graphic) ticket due 2024-02-01.
    pub fn graphic_ticket(id: &str) -> RawRecord {
        ticket(id, "Red", "2024-02-01")
    }

    /// A webhook payload as sent by a database automation.
    pub fn webhook_payload(page_id: &str, status: &str) -> Value {
        json!({
            "source": {"type": "automation"},
            "data": {
                "object": "page",
                "id": page_id,
                "properties": {
                    "Status (FOR CBP ONLY)": {
                        "id": "status",
                        "type": "status",
                        "status": {"name": status}
                    }
                }
            }
        })
    }
}
