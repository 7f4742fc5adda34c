//! Mock record store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::record::{PropertyUpdate, RawRecord, RecordStore, RecordStoreError};

/// A recorded property update for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpdate {
    pub id: String,
    pub property: String,
    pub value: PropertyUpdate,
}

/// In-memory implementation of the RecordStore trait.
///
/// Updates are recorded rather than applied, so tests can assert on
/// exactly what was written back.
#[derive(Debug, Default)]
pub struct MockRecordStore {
    records: Arc<RwLock<HashMap<String, RawRecord>>>,
    updates: Arc<RwLock<Vec<RecordedUpdate>>>,
    retrieve_calls: Arc<RwLock<usize>>,
    fail_updates: Arc<RwLock<bool>>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under its own id.
    pub async fn insert(&self, record: RawRecord) {
        let key = record.id.clone();
        self.insert_as(&key, record).await;
    }

    /// Store a record under an explicit key, regardless of its id.
    pub async fn insert_as(&self, key: &str, record: RawRecord) {
        self.records.write().await.insert(key.to_string(), record);
    }

    pub async fn retrieve_count(&self) -> usize {
        *self.retrieve_calls.read().await
    }

    pub async fn recorded_updates(&self) -> Vec<RecordedUpdate> {
        self.updates.read().await.clone()
    }

    /// Make every update fail.
    pub async fn set_fail_updates(&self, fail: bool) {
        *self.fail_updates.write().await = fail;
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn retrieve(&self, id: &str) -> Result<RawRecord, RecordStoreError> {
        *self.retrieve_calls.write().await += 1;
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RecordStoreError::NotFound(id.to_string()))
    }

    async fn update(
        &self,
        id: &str,
        property: &str,
        value: PropertyUpdate,
    ) -> Result<(), RecordStoreError> {
        if *self.fail_updates.read().await {
            return Err(RecordStoreError::ApiError {
                status: 400,
                message: "injected failure".to_string(),
            });
        }
        self.updates.write().await.push(RecordedUpdate {
            id: id.to_string(),
            property: property.to_string(),
            value,
        });
        Ok(())
    }
}
