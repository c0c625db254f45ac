//! Configuration types for mapstitch.
//!
//! Two layers live here: the user's INI file ([`ConfigFile`], one struct per
//! section) and the structured configs handed to components
//! ([`DownloadConfig`]).
//!
//! # Example
//!
//! ```
//! use mapstitch::config::{ConfigFile, DownloadConfig};
//!
//! let file = ConfigFile::default();
//! let download = DownloadConfig::new()
//!     .with_timeout_secs(file.download.timeout)
//!     .with_parallel_downloads(file.download.parallel);
//! assert_eq!(download.parallel_downloads(), 8);
//! ```

mod defaults;
mod download;
mod file;
mod parser;
mod settings;

pub use defaults::*;
pub use download::DownloadConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    CacheSettings, ConfigFile, DownloadSettings, LoggingSettings, OutputSettings,
    ProviderSettings,
};
