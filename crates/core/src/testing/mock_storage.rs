//! Mock storage backend for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::{FolderEntry, PermissionRole, Principal, StorageBackend, StorageError};

/// A folder held by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFolder {
    pub id: String,
    pub name: String,
    pub parent_id: String,
    pub trashed: bool,
}

/// A recorded permission grant for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPermission {
    pub folder_id: String,
    pub role: PermissionRole,
    pub principal: Principal,
}

#[derive(Debug, Default)]
struct Calls {
    search: usize,
    list: usize,
    create: usize,
    permission: usize,
}

/// In-memory implementation of the StorageBackend trait.
///
/// Folders live in insertion order, which is also the order searches
/// return them in. Provides controllable behavior for testing:
/// - Seed existing (or trashed) folders
/// - Count calls per operation
/// - Fail creation of folders with a given name
/// - Fail permission grants
///
/// # Example
///
/// ```rust,ignore
/// use kickoff_core::testing::MockStorage;
///
/// let storage = MockStorage::new();
/// let year = storage.insert_folder("2024", "root").await;
///
/// storage.fail_create_of("Q3").await;
/// // ... provision ...
/// assert_eq!(storage.create_count().await, 0);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    folders: Arc<RwLock<Vec<StoredFolder>>>,
    permissions: Arc<RwLock<Vec<RecordedPermission>>>,
    calls: Arc<RwLock<Calls>>,
    failing_names: Arc<RwLock<HashSet<String>>>,
    fail_permissions: Arc<RwLock<bool>>,
}

fn injected_failure() -> StorageError {
    StorageError::ApiError {
        status: 500,
        message: "injected failure".to_string(),
    }
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    async fn push(&self, name: &str, parent_id: &str) -> String {
        let mut folders = self.folders.write().await;
        let id = format!("folder-{}", folders.len() + 1);
        folders.push(StoredFolder {
            id: id.clone(),
            name: name.to_string(),
            parent_id: parent_id.to_string(),
            trashed: false,
        });
        id
    }

    /// Seed a folder without counting it as a create call.
    pub async fn insert_folder(&self, name: &str, parent_id: &str) -> String {
        self.push(name, parent_id).await
    }

    /// Move a folder to the trash.
    pub async fn trash(&self, id: &str) {
        if let Some(folder) = self.folders.write().await.iter_mut().find(|f| f.id == id) {
            folder.trashed = true;
        }
    }

    /// All folders, trashed included.
    pub async fn folders(&self) -> Vec<StoredFolder> {
        self.folders.read().await.clone()
    }

    /// Non-trashed children of a folder in creation order.
    pub async fn children(&self, parent_id: &str) -> Vec<FolderEntry> {
        self.folders
            .read()
            .await
            .iter()
            .filter(|f| !f.trashed && f.parent_id == parent_id)
            .map(|f| FolderEntry {
                id: f.id.clone(),
                name: f.name.clone(),
            })
            .collect()
    }

    /// Number of non-trashed folders.
    pub async fn folder_count(&self) -> usize {
        self.folders.read().await.iter().filter(|f| !f.trashed).count()
    }

    pub async fn search_count(&self) -> usize {
        self.calls.read().await.search
    }

    pub async fn create_count(&self) -> usize {
        self.calls.read().await.create
    }

    pub async fn permission_count(&self) -> usize {
        self.calls.read().await.permission
    }

    /// Total number of backend calls of any kind.
    pub async fn call_count(&self) -> usize {
        let calls = self.calls.read().await;
        calls.search + calls.list + calls.create + calls.permission
    }

    pub async fn recorded_permissions(&self) -> Vec<RecordedPermission> {
        self.permissions.read().await.clone()
    }

    /// Make creation of any folder named `name` fail.
    pub async fn fail_create_of(&self, name: &str) {
        self.failing_names.write().await.insert(name.to_string());
    }

    /// Make permission grants fail.
    pub async fn set_fail_permissions(&self, fail: bool) {
        *self.fail_permissions.write().await = fail;
    }

    /// Clear all injected failures.
    pub async fn clear_failures(&self) {
        self.failing_names.write().await.clear();
        *self.fail_permissions.write().await = false;
    }
}

#[async_trait]
impl StorageBackend for MockStorage {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_folders(
        &self,
        name: &str,
        parent_id: &str,
    ) -> Result<Vec<FolderEntry>, StorageError> {
        self.calls.write().await.search += 1;
        Ok(self
            .children(parent_id)
            .await
            .into_iter()
            .filter(|f| f.name == name)
            .collect())
    }

    async fn list_child_folders(
        &self,
        parent_id: &str,
        fragment: &str,
    ) -> Result<Vec<FolderEntry>, StorageError> {
        self.calls.write().await.list += 1;
        Ok(self
            .children(parent_id)
            .await
            .into_iter()
            .filter(|f| f.name.contains(fragment))
            .collect())
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<String, StorageError> {
        self.calls.write().await.create += 1;
        if self.failing_names.read().await.contains(name) {
            return Err(injected_failure());
        }
        Ok(self.push(name, parent_id).await)
    }

    async fn set_permission(
        &self,
        folder_id: &str,
        role: PermissionRole,
        principal: Principal,
    ) -> Result<(), StorageError> {
        self.calls.write().await.permission += 1;
        if *self.fail_permissions.read().await {
            return Err(injected_failure());
        }
        self.permissions.write().await.push(RecordedPermission {
            folder_id: folder_id.to_string(),
            role,
            principal,
        });
        Ok(())
    }
}
