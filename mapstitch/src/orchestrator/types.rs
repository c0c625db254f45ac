//! Orchestrator types

use crate::cache::CacheError;
use crate::coord::TileCoord;
use image::DynamicImage;
use thiserror::Error;

/// One tile to fetch, with its position relative to the center tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileJob {
    /// Grid offset `(dx, dy)` from the center tile
    pub offset: (i64, i64),
    pub tile: TileCoord,
}

/// A decoded tile ready for placement.
#[derive(Debug, Clone)]
pub struct FetchedTile {
    pub offset: (i64, i64),
    pub tile: TileCoord,
    pub image: DynamicImage,
}

/// Result of fetching a whole grid.
#[derive(Debug, Default)]
pub struct FetchedGrid {
    pub tiles: Vec<FetchedTile>,
    /// Offsets whose row lies above or below the map
    pub skipped: Vec<(i64, i64)>,
}

impl FetchedGrid {
    /// Iterates over `(offset, image)` pairs in placement form.
    pub fn placements(&self) -> impl Iterator<Item = ((i64, i64), &DynamicImage)> {
        self.tiles.iter().map(|fetched| (fetched.offset, &fetched.image))
    }
}

/// Errors from grid fetching.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A tile could not be fetched, cached or decoded
    #[error("Failed to get tile {tile}: {source}")]
    Tile {
        tile: TileCoord,
        #[source]
        source: CacheError,
    },

    /// A worker thread panicked
    #[error("{0} tile worker(s) panicked")]
    WorkerPanicked(usize),
}
