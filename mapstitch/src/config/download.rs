//! Download configuration.

use super::defaults::{DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_PARALLEL_DOWNLOADS};

/// Configuration for tile downloading.
///
/// # Example
///
/// ```
/// use mapstitch::config::DownloadConfig;
///
/// // Using defaults
/// let config = DownloadConfig::default();
/// assert_eq!(config.timeout_secs(), 30);
/// assert_eq!(config.parallel_downloads(), 8);
///
/// // Custom configuration
/// let config = DownloadConfig::new()
///     .with_timeout_secs(60)
///     .with_parallel_downloads(16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadConfig {
    /// HTTP request timeout (in seconds)
    timeout_secs: u64,
    /// Maximum number of concurrent downloads
    parallel_downloads: usize,
}

impl DownloadConfig {
    /// Create a new download configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP request timeout in seconds. Default: 30 seconds.
    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = timeout;
        self
    }

    /// Set the maximum number of parallel downloads.
    ///
    /// Values below 1 are raised to 1. Default: 8.
    pub fn with_parallel_downloads(mut self, parallel: usize) -> Self {
        self.parallel_downloads = parallel.max(1);
        self
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn parallel_downloads(&self) -> usize {
        self.parallel_downloads
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            parallel_downloads: DEFAULT_PARALLEL_DOWNLOADS,
        }
    }
}
