//! Tile grid planning.
//!
//! Works out how many tiles are needed around the center tile so that a
//! canvas of a given pixel size is fully covered. The center pixel of the
//! canvas sits on the center of the center tile, not on its corner, which is
//! why half a tile is subtracted before dividing.

/// Standard slippy-map tile edge length in pixels.
pub const TILE_SIZE: u32 = 256;

/// Number of tiles needed on each side of the center tile along one axis.
///
/// Computes `ceil((dimension/2 - tile_size/2) / tile_size)` with integer halves,
/// never going below zero.
///
/// # Example
///
/// ```
/// use mapstitch::grid::half_span;
///
/// assert_eq!(half_span(2048, 256), 4);
/// assert_eq!(half_span(256, 256), 0);
/// ```
pub fn half_span(dimension_px: u32, tile_size_px: u32) -> u32 {
    debug_assert!(tile_size_px > 0, "tile size must be positive");

    let excess = i64::from(dimension_px / 2) - i64::from(tile_size_px / 2);
    let tile = i64::from(tile_size_px);

    // Floor division of a shifted numerator is ceiling division
    let span = (excess + tile - 1).div_euclid(tile);
    span.max(0) as u32
}

/// Half-spans for both canvas axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfSpan {
    /// Extra columns on each side of the center tile
    pub x: u32,
    /// Extra rows above and below the center tile
    pub y: u32,
}

impl HalfSpan {
    /// Plans the grid for a `width`×`height` canvas.
    pub fn for_canvas(width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            x: half_span(width, tile_size),
            y: half_span(height, tile_size),
        }
    }

    /// Number of columns in the planned grid.
    pub fn columns(&self) -> u32 {
        2 * self.x + 1
    }

    /// Number of rows in the planned grid.
    pub fn rows(&self) -> u32 {
        2 * self.y + 1
    }

    /// Total number of tiles in the planned grid.
    pub fn tile_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Iterates over every `(dx, dy)` offset relative to the center tile.
    ///
    /// Offsets are yielded column by column, matching the order tiles are
    /// queued for download.
    pub fn offsets(&self) -> impl Iterator<Item = (i64, i64)> {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        (-x..=x).flat_map(move |dx| (-y..=y).map(move |dy| (dx, dy)))
    }
}
