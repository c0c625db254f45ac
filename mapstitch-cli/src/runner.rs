//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and service creation.

use crate::error::CliError;
use crate::resolve::Resolved;
use mapstitch::config::ConfigFile;
use mapstitch::log::TracingLogger;
use mapstitch::logging::{init_logging, LoggingGuard};
use mapstitch::service::{MapStitchService, StitchReport};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit config file; must exist when given
    /// * `debug_mode` - When true, enables debug-level logging unless RUST_LOG is set
    pub fn new(config_path: Option<&Path>, debug_mode: bool) -> Result<Self, CliError> {
        let config = load_config(config_path)?;

        let logging_guard = init_logging(&config.logging.file, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information.
    pub fn log_startup(&self) {
        info!("mapstitch v{}", mapstitch::VERSION);
    }

    /// Create the service and run one render.
    pub fn render(&self, resolved: Resolved) -> Result<StitchReport, CliError> {
        // Use TracingLogger to delegate library logging to tracing crate
        let logger = Arc::new(TracingLogger);

        let service = MapStitchService::new(
            resolved.service,
            resolved.provider,
            resolved.user_agent,
            logger,
        )
        .map_err(CliError::ServiceCreation)?;

        Ok(service.render(&resolved.request)?)
    }
}

/// Load the config file, or defaults if the default file is absent.
pub fn load_config(config_path: Option<&Path>) -> Result<ConfigFile, CliError> {
    match config_path {
        Some(path) if !path.exists() => Err(CliError::Config(format!(
            "config file not found: {}",
            path.display()
        ))),
        Some(path) => Ok(ConfigFile::load_from(path)?),
        None => Ok(ConfigFile::load()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_config(Some(&dir.path().join("absent.ini")));
        assert!(matches!(result, Err(CliError::Config(ref msg)) if msg.contains("not found")));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[output]\nzoom = 7\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.output.zoom, 7);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[download]\ntimeout = never\n").unwrap();

        assert!(matches!(load_config(Some(&path)), Err(CliError::Config(_))));
    }
}
