//! Coordinate conversion module
//!
//! Converts geographic coordinates (latitude/longitude) to the Web Mercator
//! tile indices used by slippy-map tile servers, and back.

mod types;


pub use types::{CoordError, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM};

use std::f64::consts::PI;

/// Converts geographic coordinates to the index of the tile containing them.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees, strictly inside (-85.0511, 85.0511)
/// * `lon` - Longitude in degrees (-180.0 to 180.0), not normalized
/// * `zoom` - Zoom level (0 to 24)
///
/// # Example
///
/// ```
/// use mapstitch::coord::to_tile_coords;
///
/// let tile = to_tile_coords(0.0, 0.0, 0).unwrap();
/// assert_eq!((tile.x, tile.y), (0, 0));
/// ```
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    // Negated form so that NaN is rejected too
    if !(lat > MIN_LAT && lat < MAX_LAT) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = 2.0_f64.powi(i32::from(zoom));
    let max_index = (1u32 << zoom) - 1;

    // lon = 180 lands exactly on n, which is one past the last column
    let x = (((lon + 180.0) / 360.0 * n) as u32).min(max_index);

    let lat_rad = lat.to_radians();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n) as u32;

    Ok(TileCoord {
        x,
        y: y.min(max_index),
        zoom,
    })
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's north-west corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    let n = 2.0_f64.powi(i32::from(tile.zoom));

    let lon = f64::from(tile.x) / n * 360.0 - 180.0;

    let y = f64::from(tile.y) / n;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();

    (lat, lon)
}
