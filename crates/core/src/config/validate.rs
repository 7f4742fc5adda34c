use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Trigger status and delivery link field are set
/// - Credentials for both backends are present
/// - Root folder is set and the layout table is usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.automation.trigger_status.is_empty() {
        return Err(ConfigError::ValidationError(
            "automation.trigger_status cannot be empty".to_string(),
        ));
    }

    if config.automation.delivery_link_field.is_empty() {
        return Err(ConfigError::ValidationError(
            "automation.delivery_link_field cannot be empty".to_string(),
        ));
    }

    if config.record_store.notion.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "record_store.notion.api_key must be set".to_string(),
        ));
    }

    if config.storage.drive.access_token.is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.drive.access_token must be set".to_string(),
        ));
    }

    if config.provisioner.root_folder_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "provisioner.root_folder_id must be set".to_string(),
        ));
    }

    config
        .provisioner
        .layout
        .validate(&config.provisioner.delivery_folder)
        .map_err(|e| ConfigError::ValidationError(format!("provisioner.layout: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.record_store.notion.api_key = "secret_abc".to_string();
        config.storage.drive.access_token = "ya29.abc".to_string();
        config.provisioner.root_folder_id = "root-123".to_string();
        config
    }

    fn assert_invalid(config: &Config, needle: &str) {
        match validate_config(config) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains(needle), "{} does not mention {}", msg, needle)
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = valid_config();
        config.server.port = 0;
        assert_invalid(&config, "server.port");
    }

    #[test]
    fn test_validate_empty_trigger_fails() {
        let mut config = valid_config();
        config.automation.trigger_status.clear();
        assert_invalid(&config, "trigger_status");
    }

    #[test]
    fn test_validate_missing_credentials_fail() {
        let mut config = valid_config();
        config.record_store.notion.api_key.clear();
        assert_invalid(&config, "api_key");

        let mut config = valid_config();
        config.storage.drive.access_token.clear();
        assert_invalid(&config, "access_token");
    }

    #[test]
    fn test_validate_missing_root_folder_fails() {
        let mut config = valid_config();
        config.provisioner.root_folder_id.clear();
        assert_invalid(&config, "root_folder_id");
    }

    #[test]
    fn test_validate_layout_without_delivery_fails() {
        let mut config = valid_config();
        config.provisioner.delivery_folder = "99_Handoff".to_string();
        assert_invalid(&config, "provisioner.layout");
    }
}
