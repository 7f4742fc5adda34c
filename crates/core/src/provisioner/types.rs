use serde::{Deserialize, Serialize};

/// Input of a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionRequest {
    /// Due date, RFC 3339 or `YYYY-MM-DD`.
    pub date: String,
    pub request_type: String,
    pub ticket_id: String,
    /// Display title, used by title-based folder naming.
    #[serde(default)]
    pub title: Option<String>,
}

/// Identifiers of the provisioned tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderResult {
    pub year_folder_id: String,
    pub quarter_folder_id: String,
    pub ticket_folder_id: String,
    pub ticket_folder_name: String,
    pub type_folder_id: String,
    /// `<year>/<quarter>/<ticket folder>/<category>`
    pub folder_path: String,
    pub delivery_folder_id: Option<String>,
    pub delivery_folder_link: Option<String>,
}
