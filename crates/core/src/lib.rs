pub mod automation;
pub mod config;
pub mod metrics;
pub mod provisioner;
pub mod record;
pub mod storage;
pub mod testing;

pub use automation::{
    parse_webhook, AutomationConfig, AutomationData, AutomationError, AutomationResult,
    StatusTrigger, TicketAutomation,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig,
};
pub use provisioner::{
    FolderProvisioner, FolderResult, ProvisionError, ProvisionRequest, ProvisionerConfig,
    TicketFolderNaming,
};
pub use record::{
    NotionConfig, NotionRecordStore, RecordError, RecordReader, RecordStore, RecordStoreError,
    RecordWriter, TicketData,
};
pub use storage::{DriveConfig, DriveStorage, StorageBackend, StorageError};
