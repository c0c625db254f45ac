//! Coordinate type definitions

use std::fmt;
use thiserror::Error;

/// Web Mercator latitude band (exclusive)
pub const MIN_LAT: f64 = -85.0511;
pub const MAX_LAT: f64 = 85.0511;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Supported zoom levels
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 24;

/// Tile coordinates in the Web Mercator / slippy map system.
///
/// Represents one 256×256 pixel tile of the map pyramid at a given zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// X coordinate (east-west), 0 at the antimeridian west edge
    pub x: u32,
    /// Y coordinate (north-south), 0 at north
    pub y: u32,
    /// Zoom level
    pub zoom: u8,
}

impl TileCoord {
    /// Creates a tile coordinate without validation.
    pub fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }

    /// Number of tiles along one side of the grid at this zoom level.
    #[inline]
    pub fn grid_size(&self) -> u64 {
        1u64 << self.zoom
    }

    /// Returns true when both indices lie inside the grid.
    pub fn is_valid(&self) -> bool {
        u64::from(self.x) < self.grid_size() && u64::from(self.y) < self.grid_size()
    }

    /// Returns the tile `dx` columns and `dy` rows away from this one.
    ///
    /// Columns wrap around the antimeridian. Rows do not: `None` is returned
    /// when the target row falls above or below the grid.
    pub fn offset(&self, dx: i64, dy: i64) -> Option<TileCoord> {
        let n = self.grid_size() as i64;
        let y = i64::from(self.y) + dy;
        if !(0..n).contains(&y) {
            return None;
        }
        let x = (i64::from(self.x) + dx).rem_euclid(n);

        Some(TileCoord {
            x: x as u32,
            y: y as u32,
            zoom: self.zoom,
        })
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is outside the projection band
    #[error("Invalid latitude: {0} (must be strictly between {MIN_LAT} and {MAX_LAT})")]
    InvalidLatitude(f64),
    /// Longitude is outside [-180, 180]
    #[error("Invalid longitude: {0} (must be between {MIN_LON} and {MAX_LON})")]
    InvalidLongitude(f64),
    /// Zoom level is outside the supported range
    #[error("Invalid zoom level: {0} (must be between {MIN_ZOOM} and {MAX_ZOOM})")]
    InvalidZoom(u8),
}
