//! Folder layout table: categories, their request types and subfolders,
//! plus the date arithmetic that places a ticket in a year and quarter.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ProvisionError;

/// Name of the designated delivery subfolder.
pub const DELIVERY_FOLDER: &str = "07_Delivery";

/// One category of the layout table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLayout {
    /// Folder name of the category, e.g. "Video".
    pub name: String,
    /// Request types classified into this category.
    #[serde(default)]
    pub request_types: Vec<String>,
    /// Subfolders created under the category folder, in order.
    pub subfolders: Vec<String>,
}

impl CategoryLayout {
    fn new(name: &str, request_types: &[&str], subfolders: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            request_types: request_types.iter().map(|s| s.to_string()).collect(),
            subfolders: subfolders.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn matches(&self, request_type: &str) -> bool {
        self.request_types.iter().any(|t| t == request_type)
    }
}

/// Closed classification table. A request type belongs to the first
/// category listing it; anything else falls to the fallback category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderLayout {
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryLayout>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_categories() -> Vec<CategoryLayout> {
    vec![
        CategoryLayout::new(
            "Video",
            &["Green", "Blue"],
            &[
                "00_Pre Production",
                "01_Assets",
                "02_Audio",
                "03_Footage",
                "04_Project Files",
                "05_Output Files",
                DELIVERY_FOLDER,
            ],
        ),
        CategoryLayout::new(
            "Graphic",
            &[],
            &[
                "00_Pre Production",
                "01_Assets",
                "03_Project Files",
                "06_Output Files",
                DELIVERY_FOLDER,
            ],
        ),
    ]
}

fn default_fallback() -> String {
    "Graphic".to_string()
}

impl Default for FolderLayout {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            fallback: default_fallback(),
        }
    }
}

impl FolderLayout {
    pub fn category(&self, name: &str) -> Option<&CategoryLayout> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Category for a request type.
    ///
    /// Returns `None` only when the fallback category is missing from the
    /// table, which `validate` rejects.
    pub fn classify(&self, request_type: &str) -> Option<&CategoryLayout> {
        self.categories
            .iter()
            .find(|c| c.matches(request_type))
            .or_else(|| self.category(&self.fallback))
    }

    /// Check that the table is usable: the fallback exists and every
    /// category contains the delivery folder.
    pub fn validate(&self, delivery_folder: &str) -> Result<(), String> {
        if self.category(&self.fallback).is_none() {
            return Err(format!(
                "fallback category '{}' is not in the layout",
                self.fallback
            ));
        }
        for category in &self.categories {
            if category.name.is_empty() {
                return Err("layout category name cannot be empty".to_string());
            }
            if !category.subfolders.iter().any(|s| s == delivery_folder) {
                return Err(format!(
                    "category '{}' has no '{}' subfolder",
                    category.name, delivery_folder
                ));
            }
        }
        Ok(())
    }
}

/// Parse a ticket date: an RFC 3339 timestamp, an ISO 8601 local
/// date-time without offset, or a plain `YYYY-MM-DD`.
///
/// Timestamps keep the calendar date of their own offset.
pub fn parse_ticket_date(value: &str) -> Result<NaiveDate, ProvisionError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.date_naive());
    }
    if let Ok(local) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(local.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ProvisionError::InvalidDate(value.to_string()))
}

/// Quarter number (1-4) of a month (1-12).
pub fn quarter_of_month(month: u32) -> u32 {
    month.div_ceil(3)
}

/// Quarter folder name for a date, `Q1`..`Q4`.
pub fn quarter_label(date: NaiveDate) -> String {
    format!("Q{}", quarter_of_month(date.month()))
}
