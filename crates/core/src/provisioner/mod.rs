//! Folder provisioner.
//!
//! Computes the folder hierarchy for a ticket and materializes it in the
//! storage backend:
//!
//! ```text
//! <root>/<year>/Q<n>/<ticket folder>/<category>/<subfolders...>
//! ```
//!
//! The category and its subfolders come from a static layout table
//! ([`FolderLayout`]). The delivery subfolder is shared with anyone holding
//! the link, and that link is returned to the caller.

mod config;
mod folders;
mod layout;
mod types;

pub use config::{ProvisionerConfig, TicketFolderNaming};
pub use folders::FolderProvisioner;
pub use layout::{
    parse_ticket_date, quarter_label, quarter_of_month, CategoryLayout, FolderLayout,
    DELIVERY_FOLDER,
};
pub use types::{FolderResult, ProvisionRequest};

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while provisioning a folder tree.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A backend call failed while resolving a folder of the tree.
    #[error("failed to provision folder '{name}' under {parent_id}: {source}")]
    FolderCreation {
        name: String,
        parent_id: String,
        #[source]
        source: StorageError,
    },

    /// Sharing a folder failed.
    #[error("failed to set permissions on folder {folder_id}: {source}")]
    Permission {
        folder_id: String,
        #[source]
        source: StorageError,
    },

    /// The ticket date could not be parsed.
    #[error("invalid ticket date: {0}")]
    InvalidDate(String),

    /// No ticket id to name the ticket folder with.
    #[error("ticket id is required for the folder structure")]
    MissingTicketId,

    /// Existing numbered folders already use the highest sequence number.
    #[error("no ticket number left for '{request_type}' under {parent_id}")]
    NumberingExhausted {
        request_type: String,
        parent_id: String,
    },

    /// The layout has no category for this request type.
    #[error("no layout category for request type '{0}'")]
    UnknownCategory(String),
}

impl ProvisionError {
    pub(crate) fn folder_creation(name: &str, parent_id: &str, source: StorageError) -> Self {
        Self::FolderCreation {
            name: name.to_string(),
            parent_id: parent_id.to_string(),
            source,
        }
    }

    /// Report a permission failure as a failure of the folder it concerns.
    pub(crate) fn into_folder_creation(self, name: &str, parent_id: &str) -> Self {
        match self {
            Self::Permission { source, .. } => Self::folder_creation(name, parent_id, source),
            other => other,
        }
    }

    /// Whether the error comes from bad input rather than the backend.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate(_) | Self::MissingTicketId | Self::UnknownCategory(_)
        )
    }
}
