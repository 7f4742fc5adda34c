//! Folder tree provisioning on top of a [`StorageBackend`].

use std::sync::Arc;
use std::time::Instant;

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::{debug, info, warn};

use super::config::{ProvisionerConfig, TicketFolderNaming};
use super::layout::{parse_ticket_date, quarter_label, FolderLayout};
use super::types::{FolderResult, ProvisionRequest};
use super::ProvisionError;
use crate::metrics;
use crate::storage::{PermissionRole, Principal, StorageBackend};

/// Leading sequence number of a numbered ticket folder, e.g. `07_Blue`.
static TICKET_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)_").unwrap());

/// Builds the per-ticket folder tree.
///
/// Every level goes through [`find_or_create_folder`](Self::find_or_create_folder),
/// so re-running a provision reuses whatever an earlier run created. There
/// is no lock around search-then-create: two concurrent runs for the same
/// ticket can still race and create a duplicate folder.
pub struct FolderProvisioner {
    storage: Arc<dyn StorageBackend>,
    config: ProvisionerConfig,
}

impl FolderProvisioner {
    pub fn new(storage: Arc<dyn StorageBackend>, config: ProvisionerConfig) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &ProvisionerConfig {
        &self.config
    }

    pub fn layout(&self) -> &FolderLayout {
        &self.config.layout
    }

    /// Category folder name for a request type.
    pub fn classify(&self, request_type: &str) -> Option<&str> {
        self.config
            .layout
            .classify(request_type)
            .map(|c| c.name.as_str())
    }

    /// Public link of a folder.
    pub fn folder_link(&self, folder_id: &str) -> String {
        format!(
            "{}/{}",
            self.config.folder_link_base.trim_end_matches('/'),
            folder_id
        )
    }

    /// Return the first non-trashed folder named `name` under `parent_id`,
    /// creating it when there is none.
    pub async fn find_or_create_folder(
        &self,
        name: &str,
        parent_id: &str,
    ) -> Result<String, ProvisionError> {
        let existing = self
            .storage
            .search_folders(name, parent_id)
            .await
            .map_err(|source| ProvisionError::folder_creation(name, parent_id, source))?;

        if let Some(folder) = existing.into_iter().next() {
            debug!("Reusing folder '{}' ({}) under {}", name, folder.id, parent_id);
            metrics::FOLDERS_RESOLVED
                .with_label_values(&["reused"])
                .inc();
            return Ok(folder.id);
        }

        let id = self
            .storage
            .create_folder(name, parent_id)
            .await
            .map_err(|source| ProvisionError::folder_creation(name, parent_id, source))?;

        debug!("Created folder '{}' ({}) under {}", name, id, parent_id);
        metrics::FOLDERS_RESOLVED
            .with_label_values(&["created"])
            .inc();
        Ok(id)
    }

    /// Grant `role` on a folder to `principal`.
    pub async fn set_permissions(
        &self,
        folder_id: &str,
        role: PermissionRole,
        principal: Principal,
    ) -> Result<(), ProvisionError> {
        self.storage
            .set_permission(folder_id, role, principal)
            .await
            .map_err(|source| ProvisionError::Permission {
                folder_id: folder_id.to_string(),
                source,
            })
    }

    /// Next two-digit sequence number for a request type within a quarter
    /// folder: one past the highest `NN_` prefix among existing folders
    /// whose name contains the request type.
    pub async fn next_ticket_number(
        &self,
        request_type: &str,
        quarter_folder_id: &str,
    ) -> Result<String, ProvisionError> {
        let existing = self
            .storage
            .list_child_folders(quarter_folder_id, request_type)
            .await
            .map_err(|source| {
                ProvisionError::folder_creation(request_type, quarter_folder_id, source)
            })?;

        let max = existing
            .iter()
            .filter_map(|f| TICKET_NUMBER.captures(&f.name))
            .filter_map(|c| c[1].parse::<u32>().ok())
            .max()
            .unwrap_or(0);

        let next = max
            .checked_add(1)
            .ok_or_else(|| ProvisionError::NumberingExhausted {
                request_type: request_type.to_string(),
                parent_id: quarter_folder_id.to_string(),
            })?;
        Ok(format!("{:02}", next))
    }

    async fn ticket_folder_name(
        &self,
        request: &ProvisionRequest,
        quarter_folder_id: &str,
    ) -> Result<String, ProvisionError> {
        match self.config.ticket_folder_naming {
            TicketFolderNaming::RecordId => Ok(request.ticket_id.clone()),
            TicketFolderNaming::Title => Ok(request
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(&request.ticket_id)
                .to_string()),
            TicketFolderNaming::Numbered => {
                let number = self
                    .next_ticket_number(&request.request_type, quarter_folder_id)
                    .await?;
                Ok(format!("{}_{}", number, request.request_type))
            }
        }
    }

    /// Materialize year / quarter / ticket / category folders and the
    /// category's subfolders, sharing the delivery folder publicly.
    ///
    /// Stops at the first backend error. Folders created before the error
    /// are left in place and are reused by the next run.
    pub async fn provision(
        &self,
        request: &ProvisionRequest,
    ) -> Result<FolderResult, ProvisionError> {
        if request.ticket_id.trim().is_empty() {
            return Err(ProvisionError::MissingTicketId);
        }
        let date = parse_ticket_date(&request.date)?;
        let category = self
            .config
            .layout
            .classify(&request.request_type)
            .ok_or_else(|| ProvisionError::UnknownCategory(request.request_type.clone()))?;

        let start = Instant::now();
        let year = date.year().to_string();
        let quarter = quarter_label(date);

        info!(
            "Provisioning folders for ticket {}: {}/{} ({} -> {})",
            request.ticket_id, year, quarter, request.request_type, category.name
        );

        let year_folder_id = self
            .find_or_create_folder(&year, &self.config.root_folder_id)
            .await?;
        let quarter_folder_id = self
            .find_or_create_folder(&quarter, &year_folder_id)
            .await?;

        let ticket_folder_name = self.ticket_folder_name(request, &quarter_folder_id).await?;
        let ticket_folder_id = self
            .find_or_create_folder(&ticket_folder_name, &quarter_folder_id)
            .await?;

        let type_folder_id = self
            .find_or_create_folder(&category.name, &ticket_folder_id)
            .await?;

        let mut delivery_folder_id = None;
        let mut delivery_folder_link = None;
        for subfolder in &category.subfolders {
            let sub_id = self.find_or_create_folder(subfolder, &type_folder_id).await?;

            if *subfolder == self.config.delivery_folder {
                if let Err(e) = self
                    .set_permissions(&sub_id, PermissionRole::Reader, Principal::Anyone)
                    .await
                {
                    if self.config.permission_failure_fatal {
                        return Err(e.into_folder_creation(subfolder, &type_folder_id));
                    }
                    warn!("Could not share delivery folder {}: {}", sub_id, e);
                }
                delivery_folder_link = Some(self.folder_link(&sub_id));
                delivery_folder_id = Some(sub_id);
            }
        }

        let folder_path = format!(
            "{}/{}/{}/{}",
            year, quarter, ticket_folder_name, category.name
        );

        metrics::PROVISION_DURATION
            .with_label_values(&[category.name.as_str()])
            .observe(start.elapsed().as_secs_f64());
        info!("Provisioned {} for ticket {}", folder_path, request.ticket_id);

        Ok(FolderResult {
            year_folder_id,
            quarter_folder_id,
            ticket_folder_id,
            ticket_folder_name,
            type_folder_id,
            folder_path,
            delivery_folder_id,
            delivery_folder_link,
        })
    }
}
