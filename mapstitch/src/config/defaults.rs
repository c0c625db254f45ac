//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;

/// Default tile provider preset.
pub const DEFAULT_PROVIDER: &str = "osm";

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = crate::provider::DEFAULT_TIMEOUT_SECS;

/// Default number of concurrent tile fetches.
pub const DEFAULT_PARALLEL_DOWNLOADS: usize = 8;

/// Default zoom level.
pub const DEFAULT_ZOOM: u8 = 13;

/// Default density for paper sizes.
pub const DEFAULT_PPI: u32 = 150;

/// Default output size.
pub const DEFAULT_SIZE: &str = "2048x2048";

/// Default output image path.
pub const DEFAULT_OUTPUT: &str = "map.png";

/// Default log file name, inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "mapstitch.log";

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = config_directory();

        Self {
            provider: ProviderSettings {
                provider_type: DEFAULT_PROVIDER.to_string(),
                user_agent: None,
            },
            cache: CacheSettings {
                directory: PathBuf::from(DEFAULT_CACHE_DIR),
            },
            download: DownloadSettings {
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
                parallel: DEFAULT_PARALLEL_DOWNLOADS,
            },
            output: OutputSettings {
                zoom: DEFAULT_ZOOM,
                ppi: DEFAULT_PPI,
                size: DEFAULT_SIZE.to_string(),
            },
            logging: LoggingSettings {
                file: config_dir.join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
