//! Provider types: errors and the resolved tile provider.

use crate::coord::TileCoord;
use thiserror::Error;
use url::Url;

/// Placeholders every URL template must contain.
pub const PLACEHOLDERS: [&str; 3] = ["{x}", "{y}", "{z}"];

/// Errors that can occur while talking to a tile server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// URL template cannot address tiles
    #[error("Invalid URL template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },
}

impl ProviderError {
    fn invalid_template(template: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

/// A tile server resolved to a concrete URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileProvider {
    name: String,
    url_template: String,
    user_agent: Option<String>,
}

impl TileProvider {
    /// Creates a provider from a URL template.
    ///
    /// The template must be an absolute URL with a host and must contain
    /// `{x}`, `{y}` and `{z}` in its path. Placeholders in the query string are
    /// rejected because cache paths are derived from host and path only.
    ///
    /// # Example
    ///
    /// ```
    /// use mapstitch::coord::TileCoord;
    /// use mapstitch::provider::TileProvider;
    ///
    /// let provider = TileProvider::new(
    ///     "custom",
    ///     "https://tiles.example.com/{z}/{x}/{y}.png",
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     provider.tile_url(&TileCoord::new(1, 2, 3)),
    ///     "https://tiles.example.com/3/1/2.png"
    /// );
    /// ```
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        user_agent: Option<String>,
    ) -> Result<Self, ProviderError> {
        let url_template = url_template.into();

        let path_part = url_template
            .split_once('?')
            .map_or(url_template.as_str(), |(path, _)| path);
        for placeholder in PLACEHOLDERS {
            if !path_part.contains(placeholder) {
                return Err(ProviderError::invalid_template(
                    &url_template,
                    format!("missing {} in the URL path", placeholder),
                ));
            }
        }

        let provider = Self {
            name: name.into(),
            url_template,
            user_agent: user_agent.filter(|ua| !ua.trim().is_empty()),
        };

        // Probe with a real tile so the host check sees a parseable URL
        let probe = provider.tile_url(&TileCoord::new(0, 0, 0));
        let url = Url::parse(&probe)
            .map_err(|e| ProviderError::invalid_template(&provider.url_template, e.to_string()))?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ProviderError::invalid_template(
                &provider.url_template,
                "URL has no host",
            ));
        }

        Ok(provider)
    }

    /// Returns a copy with the User-Agent replaced.
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent.filter(|ua| !ua.trim().is_empty());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Custom User-Agent to send with tile requests, if any.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Substitutes the tile index into the template.
    pub fn tile_url(&self, tile: &TileCoord) -> String {
        self.url_template
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
            .replace("{z}", &tile.zoom.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_url_substitution() {
        let provider = TileProvider::new(
            "esri",
            "https://server.example.com/tile/{z}/{y}/{x}",
            None,
        )
        .unwrap();

        assert_eq!(
            provider.tile_url(&TileCoord::new(4346, 2864, 13)),
            "https://server.example.com/tile/13/2864/4346"
        );
    }

    #[test]
    fn test_missing_placeholder() {
        let result = TileProvider::new("bad", "https://example.com/{z}/{x}.png", None);
        assert!(matches!(
            result,
            Err(ProviderError::InvalidTemplate { ref reason, .. }) if reason.contains("{y}")
        ));
    }

    #[test]
    fn test_placeholders_in_query_rejected() {
        let result = TileProvider::new("bad", "https://example.com/vt?x={x}&y={y}&z={z}", None);
        assert!(matches!(result, Err(ProviderError::InvalidTemplate { .. })));
    }

    #[test]
    fn test_query_after_placeholders_allowed() {
        let provider =
            TileProvider::new("keyed", "https://example.com/{z}/{x}/{y}.png?key=abc", None);
        assert!(provider.is_ok());
    }

    #[test]
    fn test_relative_template_rejected() {
        let result = TileProvider::new("bad", "tiles/{z}/{x}/{y}.png", None);
        assert!(matches!(result, Err(ProviderError::InvalidTemplate { .. })));
    }

    #[test]
    fn test_blank_user_agent_dropped() {
        let provider =
            TileProvider::new("p", "https://example.com/{z}/{x}/{y}.png", Some("  ".into()))
                .unwrap();
        assert_eq!(provider.user_agent(), None);

        let provider = provider.with_user_agent(Some("mapstitch-test/1.0".into()));
        assert_eq!(provider.user_agent(), Some("mapstitch-test/1.0"));
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::HttpError("HTTP 404 Not Found from https://x".into());
        assert!(err.to_string().contains("404"));
    }
}
