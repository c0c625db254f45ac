//! Integration tests for the full stitching pipeline.
//!
//! A fake tile server generates a distinct solid-color PNG for every tile so
//! placement can be checked pixel by pixel. Everything runs against a
//! temporary cache directory.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use mapstitch::cache::TileCache;
use mapstitch::coord::{to_tile_coords, TileCoord};
use mapstitch::log::NoOpLogger;
use mapstitch::paper::OutputSize;
use mapstitch::provider::{HttpClient, ProviderConfig, ProviderError, TileProvider};
use mapstitch::service::{MapStitchService, RenderRequest, ServiceConfig};
use tempfile::TempDir;

const TEMPLATE: &str = "https://tiles.test/{z}/{x}/{y}.png";

/// Serves `<z>/<x>/<y>.png` as a 256×256 tile colored by its coordinates.
#[derive(Default)]
struct FakeTileServer {
    calls: AtomicUsize,
}

impl FakeTileServer {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn tile_color(x: u32, y: u32, z: u32) -> Rgb<u8> {
    Rgb([(x % 200) as u8 + 50, (y % 200) as u8 + 50, z as u8 + 1])
}

fn parse_tile_url(url: &str) -> Option<(u32, u32, u32)> {
    let mut parts = url.rsplit('/');
    let y = parts.next()?.strip_suffix(".png")?.parse().ok()?;
    let x = parts.next()?.parse().ok()?;
    let z = parts.next()?.parse().ok()?;
    Some((x, y, z))
}

impl HttpClient for FakeTileServer {
    fn get_with_headers(
        &self,
        url: &str,
        _headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let (x, y, z) = parse_tile_url(url)
            .ok_or_else(|| ProviderError::HttpError(format!("HTTP 404 Not Found from {}", url)))?;

        let img = RgbImage::from_pixel(256, 256, tile_color(x, y, z));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| ProviderError::HttpError(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

fn provider() -> TileProvider {
    ProviderConfig::parse(TEMPLATE).resolve(None).unwrap()
}

fn service(dir: &TempDir) -> MapStitchService<FakeTileServer> {
    let config = ServiceConfig::builder()
        .cache_directory(dir.path().join("cache"))
        .build();
    MapStitchService::with_http_client(
        config,
        provider(),
        FakeTileServer::default(),
        Arc::new(NoOpLogger),
    )
}

#[test]
fn test_cache_round_trip() {
    let dir = TempDir::new().unwrap();
    let cache = TileCache::new(dir.path(), FakeTileServer::default(), Arc::new(NoOpLogger));
    let provider = provider();
    let tile = TileCoord::new(1, 2, 3);

    let first = cache.load(&provider, &tile).unwrap();

    let expected_path: PathBuf = dir.path().join("tiles.test/3/1/2.png");
    assert!(expected_path.is_file());
    assert_eq!(std::fs::read(&expected_path).unwrap(), first);
    assert_eq!(cache.http_client().calls(), 1);

    let second = cache.load(&provider, &tile).unwrap();
    assert_eq!(second, first);
    assert_eq!(cache.http_client().calls(), 1);

    // Only the tile itself is left behind: no temporary files
    let entries: Vec<_> = std::fs::read_dir(dir.path().join("tiles.test/3/1"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_render_2048_square() {
    let dir = TempDir::new().unwrap();
    let service = service(&dir);
    let output = dir.path().join("out/map.png");
    let size = OutputSize::parse("2048x2048", 150).unwrap();

    let report = service
        .render(&RenderRequest::new(51.5074, -0.1278, 13, size, &output))
        .unwrap();

    assert_eq!(report.tiles_placed, 81);
    assert_eq!(report.tiles_skipped, 0);
    assert_eq!(report.downloads, 81);
    assert_eq!(service.cache().http_client().calls(), 81);

    let image = image::open(&output).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (2048, 2048));

    // Every pixel comes from some tile
    assert!(image.pixels().all(|p| p[2] == 14));

    // The canvas center lies on the center of the center tile
    let center = to_tile_coords(51.5074, -0.1278, 13).unwrap();
    assert_eq!(report.center, center);
    let expected = tile_color(center.x, center.y, 13);
    assert_eq!(*image.get_pixel(1024, 1024), expected);
    assert_eq!(*image.get_pixel(896, 896), expected);
    assert_eq!(*image.get_pixel(1151, 1151), expected);

    // Neighbours sit one tile away
    assert_eq!(
        *image.get_pixel(1024 + 256, 1024),
        tile_color(center.x + 1, center.y, 13)
    );
    assert_eq!(
        *image.get_pixel(1024, 1024 - 256),
        tile_color(center.x, center.y - 1, 13)
    );
}

#[test]
fn test_rerender_is_served_from_cache() {
    let dir = TempDir::new().unwrap();
    let service = service(&dir);
    let size = OutputSize::parse("a6-landscape", 100).unwrap();
    let request = RenderRequest::new(40.7128, -74.006, 12, size, dir.path().join("nyc.jpg"));

    let first = service.render(&request).unwrap();
    let second = service.render(&request).unwrap();

    assert!(first.downloads > 0);
    assert_eq!(second.downloads, 0);
    assert_eq!(second.cache_hits, first.downloads);
    assert_eq!(service.cache().http_client().calls() as u64, first.downloads);

    let image = image::open(dir.path().join("nyc.jpg")).unwrap();
    assert_eq!(Ok((image.width(), image.height())), size.dimensions());
}

#[test]
fn test_antimeridian_wraps() {
    let dir = TempDir::new().unwrap();
    let service = service(&dir);
    let output = dir.path().join("date-line.png");
    let size = OutputSize::Pixels {
        width: 768,
        height: 256,
    };

    // Zoom 3: the westernmost column is x = 0, its western neighbour is x = 7
    let report = service
        .render(&RenderRequest::new(0.5, -179.9, 3, size, &output))
        .unwrap();
    assert_eq!(report.center.x, 0);

    let image = image::open(&output).unwrap().to_rgb8();
    let row = report.center.y;
    assert_eq!(*image.get_pixel(0, 128), tile_color(7, row, 3));
    assert_eq!(*image.get_pixel(767, 128), tile_color(1, row, 3));
}
