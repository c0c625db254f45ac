//! Core types for the tile cache.

use crate::provider::ProviderError;
use std::path::PathBuf;
use thiserror::Error;

/// Tile cache errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Network fetch on a cache miss failed
    #[error("Failed to fetch tile {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: ProviderError,
    },

    /// Cache directory or file could not be read, created or written
    #[error("Cache I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cached bytes are not a decodable image
    #[error("Failed to decode tile {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Tile URL cannot be mapped to a cache path
    #[error("Cannot derive a cache path from URL '{url}': {reason}")]
    InvalidKey { url: String, reason: String },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
