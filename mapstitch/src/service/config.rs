//! Service configuration types.

use crate::config::{DownloadConfig, DEFAULT_CACHE_DIR};
use crate::grid::TILE_SIZE;
use std::path::{Path, PathBuf};

/// Configuration for the map stitching service.
///
/// # Example
///
/// ```
/// use mapstitch::config::DownloadConfig;
/// use mapstitch::service::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .cache_directory("tiles")
///     .download(DownloadConfig::new().with_parallel_downloads(4))
///     .build();
///
/// assert_eq!(config.download().parallel_downloads(), 4);
/// assert_eq!(config.tile_size(), 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Download configuration
    download: DownloadConfig,
    /// Tile cache root
    cache_directory: PathBuf,
    /// Edge length of server tiles in pixels
    tile_size: u32,
}

impl ServiceConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Get the download configuration.
    pub fn download(&self) -> &DownloadConfig {
        &self.download
    }

    /// Get the cache directory.
    pub fn cache_directory(&self) -> &Path {
        &self.cache_directory
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            download: DownloadConfig::default(),
            cache_directory: PathBuf::from(DEFAULT_CACHE_DIR),
            tile_size: TILE_SIZE,
        }
    }
}

/// Builder for ServiceConfig.
///
/// Provides a fluent API for constructing service configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfigBuilder {
    download: Option<DownloadConfig>,
    cache_directory: Option<PathBuf>,
    tile_size: Option<u32>,
}

impl ServiceConfigBuilder {
    /// Set the download configuration.
    pub fn download(mut self, config: DownloadConfig) -> Self {
        self.download = Some(config);
        self
    }

    /// Set the cache directory.
    pub fn cache_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_directory = Some(path.into());
        self
    }

    /// Set the server tile size. Zero is ignored.
    pub fn tile_size(mut self, size: u32) -> Self {
        self.tile_size = Some(size).filter(|size| *size > 0);
        self
    }

    /// Build the configuration, using defaults for unset values.
    pub fn build(self) -> ServiceConfig {
        let defaults = ServiceConfig::default();
        ServiceConfig {
            download: self.download.unwrap_or(defaults.download),
            cache_directory: self.cache_directory.unwrap_or(defaults.cache_directory),
            tile_size: self.tile_size.unwrap_or(defaults.tile_size),
        }
    }
}
