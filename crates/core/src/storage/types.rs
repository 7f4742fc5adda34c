use serde::{Deserialize, Serialize};

/// A folder as reported by the storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub id: String,
    pub name: String,
}

/// Access level granted by a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionRole {
    Reader,
    Commenter,
    Writer,
}

impl PermissionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionRole::Reader => "reader",
            PermissionRole::Commenter => "commenter",
            PermissionRole::Writer => "writer",
        }
    }
}

/// Who a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Principal {
    /// Anyone holding the link.
    Anyone,
}

impl Principal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Principal::Anyone => "anyone",
        }
    }
}
