//! Tile fetch orchestration
//!
//! Fans the tiles of a planned grid out over a bounded pool of worker
//! threads, each pulling through the shared [`TileCache`](crate::cache::TileCache),
//! and gathers the decoded tiles back on the calling thread.

mod download;
mod types;

pub use download::TileOrchestrator;
pub use types::{FetchedGrid, FetchedTile, OrchestratorError, TileJob};
