use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
///
/// Environment variables use the `KICKOFF_` prefix and `__` between nested
/// keys, e.g. `KICKOFF_STORAGE__DRIVE__ACCESS_TOKEN`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("KICKOFF_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[server]
port = 9000

[provisioner]
root_folder_id = "root-1"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.provisioner.root_folder_id, "root-1");
    }

    #[test]
    fn test_load_config_from_str_bad_type() {
        let toml = r#"
[server]
port = "eighty"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let example = include_str!("../../../../config.example.toml");
        let config = load_config_from_str(example).unwrap();
        let defaults = Config::default();
        assert_eq!(config.provisioner.layout, defaults.provisioner.layout);
        assert_eq!(config.record_store.fields, defaults.record_store.fields);
        assert_eq!(
            config.automation.trigger_status,
            defaults.automation.trigger_status
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[server]
host = "127.0.0.1"
port = 3001

[provisioner]
root_folder_id = "root-from-file"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.provisioner.root_folder_id, "root-from-file");
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[provisioner]
root_folder_id = "root-from-file"
"#,
            )?;
            jail.set_env("KICKOFF_PROVISIONER__ROOT_FOLDER_ID", "root-from-env");
            jail.set_env("KICKOFF_STORAGE__DRIVE__ACCESS_TOKEN", "ya29.env");

            let config = load_config(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.provisioner.root_folder_id, "root-from-env");
            assert_eq!(config.storage.drive.access_token, "ya29.env");
            Ok(())
        });
    }
}
