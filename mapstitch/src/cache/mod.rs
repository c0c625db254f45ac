//! Persistent tile cache.
//!
//! Tiles are stored one file per tile under
//! `<cache_dir>/<host>/<url path>`, exactly as returned by the server.
//! There is no eviction: the cache only grows.

mod disk;
mod path;
mod stats;
mod types;

pub use disk::{write_atomic, TileCache};
pub use path::cache_path;
pub use stats::CacheStats;
pub use types::CacheError;
