//! Canvas assembly.
//!
//! The output raster is an RGB buffer. Tiles are placed relative to the
//! canvas center: the center tile's center lands on the canvas's center pixel
//! and neighbours follow at whole-tile offsets. Anything falling outside the
//! canvas is clipped.

use image::{imageops, DynamicImage, ImageFormat, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Canvas errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Output path has no recognised image extension
    #[error("Unsupported output format for {}: use a .png or .jpg file name", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Output directory could not be created
    #[error("Failed to create output directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or writing the output image failed
    #[error("Failed to write image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// The output raster, exclusively owned by the assembly step.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
    tile_size: u32,
}

impl Canvas {
    /// Allocates a black `width`×`height` canvas for tiles of `tile_size` pixels.
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
            tile_size,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel position of the top-left corner of the tile at grid offset `(dx, dy)`.
    ///
    /// ```text
    /// px = dx * T - T/2 + width/2
    /// py = dy * T - T/2 + height/2
    /// ```
    pub fn tile_origin(&self, dx: i64, dy: i64) -> (i64, i64) {
        let tile = i64::from(self.tile_size);
        let half_tile = i64::from(self.tile_size / 2);

        (
            dx * tile - half_tile + i64::from(self.width() / 2),
            dy * tile - half_tile + i64::from(self.height() / 2),
        )
    }

    /// Places a tile at grid offset `(dx, dy)` from the center tile.
    ///
    /// Pixels outside the canvas are dropped. Tiles with an alpha channel are
    /// copied without blending.
    pub fn place(&mut self, dx: i64, dy: i64, tile: &DynamicImage) {
        let (px, py) = self.tile_origin(dx, dy);
        let rgb = tile.to_rgb8();
        imageops::replace(&mut self.image, &rgb, px, py);
    }

    /// Places every tile of a grid.
    ///
    /// Order does not matter: tiles never overlap.
    pub fn assemble<'a, I>(&mut self, tiles: I)
    where
        I: IntoIterator<Item = ((i64, i64), &'a DynamicImage)>,
    {
        for ((dx, dy), tile) in tiles {
            self.place(dx, dy, tile);
        }
    }

    /// Encodes the canvas to `path`, choosing the format from its extension.
    ///
    /// Missing parent directories are created.
    pub fn save(&self, path: &Path) -> Result<(), CanvasError> {
        let format = ImageFormat::from_path(path)
            .ok()
            .filter(|format| matches!(format, ImageFormat::Png | ImageFormat::Jpeg))
            .ok_or_else(|| CanvasError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| CanvasError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        self.image
            .save_with_format(path, format)
            .map_err(|source| CanvasError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Borrow the underlying pixel buffer.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}
