use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::automation::AutomationConfig;
use crate::provisioner::{ProvisionerConfig, TicketFolderNaming};
use crate::record::{RecordStoreConfig, TicketFields};
use crate::storage::DriveConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub automation: AutomationConfig,
    #[serde(default)]
    pub record_store: RecordStoreConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub provisioner: ProvisionerConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

/// Storage backend configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub drive: DriveConfig,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub automation: AutomationConfig,
    pub record_store: SanitizedRecordStoreConfig,
    pub storage: SanitizedStorageConfig,
    pub provisioner: SanitizedProvisionerConfig,
}

/// Sanitized record store config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedRecordStoreConfig {
    pub api_key_configured: bool,
    pub api_version: String,
    pub timeout_secs: u32,
    pub fields: TicketFields,
    pub link_fields: Vec<String>,
}

/// Sanitized storage config (access token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedStorageConfig {
    pub access_token_configured: bool,
    pub timeout_secs: u32,
}

/// Provisioner config without the layout table
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedProvisionerConfig {
    pub root_folder_configured: bool,
    pub ticket_folder_naming: TicketFolderNaming,
    pub delivery_folder: String,
    pub categories: Vec<String>,
    pub fallback_category: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let notion = &config.record_store.notion;
        let drive = &config.storage.drive;
        let provisioner = &config.provisioner;
        Self {
            server: config.server.clone(),
            automation: config.automation.clone(),
            record_store: SanitizedRecordStoreConfig {
                api_key_configured: !notion.api_key.is_empty(),
                api_version: notion.api_version.clone(),
                timeout_secs: notion.timeout_secs,
                fields: config.record_store.fields.clone(),
                link_fields: config.record_store.link_fields.clone(),
            },
            storage: SanitizedStorageConfig {
                access_token_configured: !drive.access_token.is_empty(),
                timeout_secs: drive.timeout_secs,
            },
            provisioner: SanitizedProvisionerConfig {
                root_folder_configured: !provisioner.root_folder_id.is_empty(),
                ticket_folder_naming: provisioner.ticket_folder_naming,
                delivery_folder: provisioner.delivery_folder.clone(),
                categories: provisioner
                    .layout
                    .categories
                    .iter()
                    .map(|c| c.name.clone())
                    .collect(),
                fallback_category: provisioner.layout.fallback.clone(),
            },
        }
    }
}
