//! Tile provider abstraction
//!
//! A provider is a URL template plus an optional User-Agent. Providers are
//! selected through [`ProviderConfig`] (a named preset or a custom template)
//! and fetched through the [`HttpClient`] seam.
//!
//! ```
//! use mapstitch::provider::ProviderConfig;
//!
//! let provider = ProviderConfig::parse("osm").resolve(None).unwrap();
//! assert!(provider.url_template().contains("openstreetmap"));
//! ```

mod factory;
mod http;
mod types;

pub use factory::{Preset, ProviderConfig, OSM_USER_AGENT};
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use types::{ProviderError, TileProvider, PLACEHOLDERS};

#[cfg(test)]
pub use http::tests::MockHttpClient;
