//! Render request and report types.

use crate::coord::TileCoord;
use crate::paper::OutputSize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// One map to render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub size: OutputSize,
    /// Output image path; the extension picks the format
    pub output: PathBuf,
    /// Also produce `<output stem>.pdf` (paper sizes only)
    pub pdf: bool,
}

impl RenderRequest {
    pub fn new(
        latitude: f64,
        longitude: f64,
        zoom: u8,
        size: OutputSize,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            zoom,
            size,
            output: output.into(),
            pdf: false,
        }
    }

    pub fn with_pdf(mut self, pdf: bool) -> Self {
        self.pdf = pdf;
        self
    }
}

/// Summary of a completed render.
#[derive(Debug, Clone, PartialEq)]
pub struct StitchReport {
    /// Tile containing the requested point
    pub center: TileCoord,
    pub width: u32,
    pub height: u32,
    /// Tiles drawn onto the canvas
    pub tiles_placed: usize,
    /// Grid positions above or below the map, left blank
    pub tiles_skipped: usize,
    pub cache_hits: u64,
    pub downloads: u64,
    pub bytes_downloaded: u64,
    pub elapsed: Duration,
    pub output: PathBuf,
    pub pdf: Option<PathBuf>,
}

impl fmt::Display for StitchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stitched {} tiles around {} into {}x{} {} ({} cached, {} downloaded, {}) in {:.1}s",
            self.tiles_placed,
            self.center,
            self.width,
            self.height,
            self.output.display(),
            self.cache_hits,
            self.downloads,
            format_bytes(self.bytes_downloaded),
            self.elapsed.as_secs_f64()
        )?;
        if self.tiles_skipped > 0 {
            write!(f, ", {} off-map", self.tiles_skipped)?;
        }
        Ok(())
    }
}

/// Human-readable byte count.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> StitchReport {
        StitchReport {
            center: TileCoord::new(4399, 2687, 13),
            width: 2048,
            height: 2048,
            tiles_placed: 81,
            tiles_skipped: 0,
            cache_hits: 75,
            downloads: 6,
            bytes_downloaded: 3 * 1024 * 1024 / 2,
            elapsed: Duration::from_millis(1300),
            output: PathBuf::from("map.png"),
            pdf: None,
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024 / 2), "1.5 MB");
    }

    #[test]
    fn test_report_display() {
        let text = report().to_string();
        assert_eq!(
            text,
            "Stitched 81 tiles around 13/4399/2687 into 2048x2048 map.png \
             (75 cached, 6 downloaded, 1.5 MB) in 1.3s"
        );
    }

    #[test]
    fn test_report_display_mentions_skipped() {
        let mut report = report();
        report.tiles_skipped = 9;
        assert!(report.to_string().ends_with(", 9 off-map"));
    }

    #[test]
    fn test_request_builder() {
        let size = OutputSize::Pixels {
            width: 10,
            height: 10,
        };
        let request = RenderRequest::new(1.0, 2.0, 3, size, "out.png").with_pdf(true);
        assert!(request.pdf);
        assert_eq!(request.output, PathBuf::from("out.png"));
    }
}
