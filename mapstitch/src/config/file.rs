//! Configuration file handling for ~/.mapstitch/config.ini.
//!
//! Loads user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! and parsing in [`super::parser`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigFile {
    /// Load configuration from the default path (~/.mapstitch/config.ini).
    ///
    /// A missing file is not an error: defaults are returned.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }
}

/// Get the path to the config directory (~/.mapstitch).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mapstitch")
}

/// Get the path to the config file (~/.mapstitch/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DOWNLOAD_TIMEOUT_SECS;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.provider.provider_type, "osm");
        assert!(config.provider.user_agent.is_none());
        assert_eq!(config.cache.directory, PathBuf::from("cache"));
        assert_eq!(config.download.timeout, DEFAULT_DOWNLOAD_TIMEOUT_SECS);
        assert_eq!(config.download.parallel, 8);
        assert_eq!(config.output.zoom, 13);
        assert_eq!(config.output.ppi, 150);
        assert_eq!(config.output.size, "2048x2048");
        assert_eq!(config.logging.file, config_directory().join("mapstitch.log"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(
            &config_path,
            "[provider]\ntype = topo\nuser_agent = wall-maps/0.1\n\n\
             [download]\nparallel = 4\n\n\
             [output]\nsize = a2-portrait\nppi = 200\n",
        )
        .unwrap();

        let config = ConfigFile::load_from(&config_path).unwrap();

        let mut expected = ConfigFile::default();
        expected.provider.provider_type = "topo".to_string();
        expected.provider.user_agent = Some("wall-maps/0.1".to_string());
        expected.download.parallel = 4;
        expected.output.size = "a2-portrait".to_string();
        expected.output.ppi = 200;
        assert_eq!(config, expected);
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, "[provider\ntype = osm\n").unwrap();

        let result = ConfigFile::load_from(&config_path);

        assert!(matches!(result, Err(ConfigFileError::ReadError(_))));
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with(".mapstitch/config.ini"));
    }
}
