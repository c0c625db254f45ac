//! On-disk tile cache with fetch-on-miss.

use crate::cache::path::cache_path;
use crate::cache::types::CacheError;
use crate::cache::CacheStats;
use crate::coord::TileCoord;
use crate::log::Logger;
use crate::provider::{HttpClient, TileProvider};
use crate::{log_debug, log_trace};
use image::DynamicImage;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Persistent tile cache backed by a directory tree.
///
/// Entries are written once, on the first request for a tile, and are never
/// invalidated or removed. Existing files are trusted as-is.
///
/// Writes go to a temporary file in the destination directory which is then
/// renamed into place, so concurrent workers or processes never observe a
/// partially written tile.
pub struct TileCache<C: HttpClient> {
    /// Cache directory root
    cache_dir: PathBuf,
    http_client: C,
    logger: Arc<dyn Logger>,
    stats: Mutex<CacheStats>,
}

impl<C: HttpClient> TileCache<C> {
    /// Create a tile cache rooted at `cache_dir`.
    ///
    /// The directory is created lazily on the first download.
    pub fn new(cache_dir: impl Into<PathBuf>, http_client: C, logger: Arc<dyn Logger>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            http_client,
            logger,
            stats: Mutex::new(CacheStats::new()),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn http_client(&self) -> &C {
        &self.http_client
    }

    /// Path where `tile` from `provider` is (or will be) cached.
    pub fn path_for(&self, provider: &TileProvider, tile: &TileCoord) -> Result<PathBuf, CacheError> {
        cache_path(&self.cache_dir, &provider.tile_url(tile))
    }

    /// Check if a tile is already on disk.
    pub fn contains(&self, provider: &TileProvider, tile: &TileCoord) -> bool {
        self.path_for(provider, tile)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Get the raw bytes of a tile, downloading it on a cache miss.
    pub fn load(&self, provider: &TileProvider, tile: &TileCoord) -> Result<Vec<u8>, CacheError> {
        let url = provider.tile_url(tile);
        let path = cache_path(&self.cache_dir, &url)?;

        if path.is_file() {
            let data = fs::read(&path).map_err(|e| CacheError::io(&path, e))?;
            log_trace!(self.logger, "Cache hit for {:?}: {}", tile, path.display());
            self.record(|stats| stats.record_hit());
            return Ok(data);
        }

        log_debug!(self.logger, "Downloading {}", url);
        let data = match provider.user_agent() {
            Some(user_agent) => self
                .http_client
                .get_with_headers(&url, &[("User-Agent", user_agent)]),
            None => self.http_client.get(&url),
        }
        .map_err(|source| CacheError::Fetch {
            url: url.clone(),
            source,
        })?;

        write_atomic(&path, &data)?;
        log_trace!(
            self.logger,
            "Cached {} bytes at {}",
            data.len(),
            path.display()
        );
        self.record(|stats| stats.record_download(data.len()));

        Ok(data)
    }

    /// Get a decoded tile image, downloading it on a cache miss.
    pub fn get(&self, provider: &TileProvider, tile: &TileCoord) -> Result<DynamicImage, CacheError> {
        let path = self.path_for(provider, tile)?;
        let data = self.load(provider, tile)?;

        image::load_from_memory(&data).map_err(|source| CacheError::Decode { path, source })
    }

    /// Snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    fn record(&self, update: impl FnOnce(&mut CacheStats)) {
        if let Ok(mut stats) = self.stats.lock() {
            update(&mut stats);
        }
    }
}

/// Write `data` to `path` via a temporary file and rename.
///
/// Missing parent directories are created.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), CacheError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(parent).map_err(|e| CacheError::io(parent, e))?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| CacheError::io(parent, e))?;
    if let Err(e) = temp.write_all(data).and_then(|()| temp.flush()) {
        return Err(CacheError::io(temp.path(), e));
    }
    temp.persist(path).map_err(|e| CacheError::io(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NoOpLogger;
    use crate::provider::{MockHttpClient, OSM_USER_AGENT};
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn png_tile(color: [u8; 3]) -> Vec<u8> {
        let image = RgbImage::from_pixel(256, 256, Rgb(color));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn provider(user_agent: Option<&str>) -> TileProvider {
        TileProvider::new(
            "test",
            "https://tiles.example.com/{z}/{x}/{y}.png",
            user_agent.map(String::from),
        )
        .unwrap()
    }

    fn cache(dir: &TempDir, client: MockHttpClient) -> TileCache<MockHttpClient> {
        TileCache::new(dir.path().join("cache"), client, Arc::new(NoOpLogger))
    }

    #[test]
    fn test_miss_writes_one_file_at_deterministic_path() {
        let dir = TempDir::new().unwrap();
        let body = png_tile([10, 20, 30]);
        let cache = cache(&dir, MockHttpClient::serving(body.clone()));
        let tile = TileCoord::new(1, 2, 3);

        let data = cache.load(&provider(None), &tile).unwrap();

        let expected = dir.path().join("cache/tiles.example.com/3/1/2.png");
        assert_eq!(cache.path_for(&provider(None), &tile).unwrap(), expected);
        assert_eq!(fs::read(&expected).unwrap(), body);
        assert_eq!(data, body);

        let files: Vec<_> = fs::read_dir(expected.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(files.len(), 1, "no temporary files may be left behind");
    }

    #[test]
    fn test_second_request_is_served_from_disk() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, MockHttpClient::serving(png_tile([1, 2, 3])));
        let tile = TileCoord::new(1, 2, 3);

        let first = cache.load(&provider(None), &tile).unwrap();
        let second = cache.load(&provider(None), &tile).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.http_client.call_count(), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.downloads, 1);
        assert_eq!(stats.bytes_downloaded, first.len() as u64);
    }

    #[test]
    fn test_existing_file_is_trusted() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, MockHttpClient::failing());
        let tile = TileCoord::new(5, 6, 7);
        let path = cache.path_for(&provider(None), &tile).unwrap();
        write_atomic(&path, b"not really a png").unwrap();

        assert_eq!(cache.load(&provider(None), &tile).unwrap(), b"not really a png");
        assert!(cache.contains(&provider(None), &tile));
        assert_eq!(cache.http_client.call_count(), 0);

        // Corrupt entries are replayed, then fail to decode
        assert!(matches!(
            cache.get(&provider(None), &tile),
            Err(CacheError::Decode { .. })
        ));
    }

    #[test]
    fn test_fetch_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, MockHttpClient::failing());
        let tile = TileCoord::new(0, 0, 1);

        let result = cache.load(&provider(None), &tile);

        assert!(matches!(result, Err(CacheError::Fetch { .. })));
        assert!(!cache.contains(&provider(None), &tile));
        assert_eq!(cache.stats().downloads, 0);
    }

    #[test]
    fn test_user_agent_header_sent() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, MockHttpClient::serving(png_tile([0, 0, 0])));

        cache
            .load(&provider(Some(OSM_USER_AGENT)), &TileCoord::new(0, 0, 0))
            .unwrap();
        cache
            .load(&provider(None), &TileCoord::new(1, 0, 1))
            .unwrap();

        let requests = cache.http_client.requests();
        assert_eq!(
            requests[0].1,
            vec![("User-Agent".to_string(), OSM_USER_AGENT.to_string())]
        );
        assert!(requests[1].1.is_empty());
    }

    #[test]
    fn test_get_decodes_image() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir, MockHttpClient::serving(png_tile([200, 100, 50])));

        let image = cache.get(&provider(None), &TileCoord::new(3, 3, 2)).unwrap();

        assert_eq!((image.width(), image.height()), (256, 256));
        assert_eq!(image.to_rgb8().get_pixel(17, 99), &Rgb([200, 100, 50]));
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c.png");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
    }
}
