//! Cache path construction.

use super::types::CacheError;
use std::path::{Path, PathBuf};
use url::Url;

/// Construct the cache path for a tile URL.
///
/// The layout mirrors the tile server:
/// ```text
/// <cache_dir>/<host>/<url path without leading slash>
/// ```
/// The query string and port are not part of the key.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use mapstitch::cache::cache_path;
///
/// let path = cache_path(
///     &PathBuf::from("/cache"),
///     "https://tile.openstreetmap.org/13/4346/2864.png",
/// )
/// .unwrap();
///
/// assert_eq!(
///     path,
///     PathBuf::from("/cache/tile.openstreetmap.org/13/4346/2864.png")
/// );
/// ```
pub fn cache_path(cache_dir: &Path, url: &str) -> Result<PathBuf, CacheError> {
    let invalid = |reason: &str| CacheError::InvalidKey {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
    let host = parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| invalid("URL has no host"))?;

    let mut path = cache_dir.join(host);
    let mut segments = 0;
    for segment in parsed.path().trim_start_matches('/').split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(invalid("path escapes the cache directory")),
            segment => {
                path.push(segment);
                segments += 1;
            }
        }
    }

    if segments == 0 {
        return Err(invalid("URL has an empty path"));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path_osm() {
        let path = cache_path(
            Path::new("cache/"),
            "https://tile.openstreetmap.org/3/1/2.png",
        )
        .unwrap();

        assert_eq!(path, PathBuf::from("cache/tile.openstreetmap.org/3/1/2.png"));
    }

    #[test]
    fn test_cache_path_without_extension() {
        let path = cache_path(
            Path::new("/var/cache/mapstitch"),
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/3/2/1",
        )
        .unwrap();

        assert_eq!(
            path,
            PathBuf::from(
                "/var/cache/mapstitch/server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/3/2/1"
            )
        );
    }

    #[test]
    fn test_query_and_port_ignored() {
        let a = cache_path(Path::new("/c"), "https://t.example.com:8443/1/2/3.png?key=a").unwrap();
        let b = cache_path(Path::new("/c"), "https://t.example.com/1/2/3.png").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hosts_are_separated() {
        let a = cache_path(Path::new("/c"), "https://a.example.com/1/2/3.png").unwrap();
        let b = cache_path(Path::new("/c"), "https://b.example.com/1/2/3.png").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with(Path::new("/c/a.example.com")));
    }

    #[test]
    fn test_empty_path_rejected() {
        let result = cache_path(Path::new("/c"), "https://t.example.com/");
        assert!(matches!(result, Err(CacheError::InvalidKey { .. })));
    }

    #[test]
    fn test_unparseable_url_rejected() {
        let result = cache_path(Path::new("/c"), "no scheme here");
        assert!(matches!(result, Err(CacheError::InvalidKey { .. })));
    }
}
