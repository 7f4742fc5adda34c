//! Provisioner configuration.

use serde::{Deserialize, Serialize};

use super::layout::{FolderLayout, DELIVERY_FOLDER};

/// How the per-ticket folder under the quarter is named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketFolderNaming {
    /// The record's raw id.
    #[default]
    RecordId,
    /// The record's display title, or the id when the title is empty.
    Title,
    /// `NN_<request type>`, numbered after the existing folders of that
    /// request type in the quarter. Allocates a new number on every run.
    Numbered,
}

/// Configuration for the folder provisioner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionerConfig {
    /// Folder under which year folders are created.
    #[serde(default)]
    pub root_folder_id: String,

    #[serde(default)]
    pub ticket_folder_naming: TicketFolderNaming,

    /// Subfolder that is shared publicly and linked back to the ticket.
    #[serde(default = "default_delivery_folder")]
    pub delivery_folder: String,

    /// Prefix of folder links; the folder id is appended.
    #[serde(default = "default_folder_link_base")]
    pub folder_link_base: String,

    /// When false, a failure to share the delivery folder is logged and
    /// provisioning carries on.
    #[serde(default = "default_permission_failure_fatal")]
    pub permission_failure_fatal: bool,

    #[serde(default)]
    pub layout: FolderLayout,
}

fn default_delivery_folder() -> String {
    DELIVERY_FOLDER.to_string()
}

fn default_folder_link_base() -> String {
    "https://drive.google.com/drive/folders".to_string()
}

fn default_permission_failure_fatal() -> bool {
    true
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            root_folder_id: String::new(),
            ticket_folder_naming: TicketFolderNaming::default(),
            delivery_folder: default_delivery_folder(),
            folder_link_base: default_folder_link_base(),
            permission_failure_fatal: default_permission_failure_fatal(),
            layout: FolderLayout::default(),
        }
    }
}
