//! Cache statistics tracking.

/// Counters for one run of the tile cache.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Tiles served from disk without a network call
    pub hits: u64,
    /// Tiles downloaded and written to disk
    pub downloads: u64,
    /// Total bytes downloaded
    pub bytes_downloaded: u64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of requests served from disk (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.downloads;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total tile requests served.
    pub fn requests(&self) -> u64 {
        self.hits + self.downloads
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_download(&mut self, bytes: usize) {
        self.downloads += 1;
        self.bytes_downloaded += bytes as u64;
    }
}
