//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Provider settings
    pub provider: ProviderSettings,
    /// Cache settings
    pub cache: CacheSettings,
    /// Download settings
    pub download: DownloadSettings,
    /// Output settings
    pub output: OutputSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Preset name ("osm", "satellite", "topo") or a URL template
    pub provider_type: String,
    /// User-Agent override sent with every tile request
    pub user_agent: Option<String>,
}

/// Cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Cache directory path
    pub directory: PathBuf,
}

/// Download configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    /// HTTP request timeout in seconds
    pub timeout: u64,
    /// Number of concurrent tile fetches
    pub parallel: usize,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub zoom: u8,
    /// Pixels per inch for paper sizes
    pub ppi: u32,
    /// `WIDTHxHEIGHT` or `a<rank>-<orientation>`
    pub size: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
