//! Provider selection: named presets or a custom URL template.
//!
//! Users pick a provider with a short string. The well-known names map to
//! presets, anything else is taken verbatim as a URL template. Resolution to
//! a concrete [`TileProvider`] happens once, at the boundary.

use super::types::{ProviderError, TileProvider};
use std::fmt;

/// User-Agent sent to the OpenStreetMap tile servers, which require requests
/// to identify the application.
pub const OSM_USER_AGENT: &str = concat!(
    "mapstitch/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/mapstitch/mapstitch)"
);

/// Built-in tile providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Standard OpenStreetMap raster tiles
    Osm,
    /// Esri World Imagery satellite tiles
    Satellite,
    /// OpenTopoMap topographic tiles
    Topo,
}

impl Preset {
    /// All presets, in the order they are listed to users.
    pub const ALL: [Preset; 3] = [Preset::Osm, Preset::Satellite, Preset::Topo];

    /// Short name used on the command line and in the config file.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Osm => "osm",
            Self::Satellite => "satellite",
            Self::Topo => "topo",
        }
    }

    /// Looks up a preset by its short name (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn url_template(&self) -> &'static str {
        match self {
            Self::Osm => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            Self::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
            Self::Topo => "https://tile.opentopomap.org/{z}/{x}/{y}.png",
        }
    }

    pub fn user_agent(&self) -> Option<&'static str> {
        match self {
            Self::Osm => Some(OSM_USER_AGENT),
            Self::Satellite | Self::Topo => None,
        }
    }

    /// Human-readable provider name for logging.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Osm => "OpenStreetMap",
            Self::Satellite => "Esri World Imagery",
            Self::Topo => "OpenTopoMap",
        }
    }
}

/// Configuration for selecting a tile provider.
///
/// # Example
///
/// ```
/// use mapstitch::provider::{Preset, ProviderConfig};
///
/// assert_eq!(ProviderConfig::parse("topo"), ProviderConfig::Preset(Preset::Topo));
///
/// let custom = ProviderConfig::parse("https://tiles.example.com/{z}/{x}/{y}.png");
/// assert!(matches!(custom, ProviderConfig::Custom(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// One of the built-in providers
    Preset(Preset),
    /// A literal URL template with `{x}`, `{y}`, `{z}` placeholders
    Custom(String),
}

impl ProviderConfig {
    /// Interprets a user-supplied provider string.
    ///
    /// Never fails: unknown names become custom templates and are validated by
    /// [`ProviderConfig::resolve`].
    pub fn parse(s: &str) -> Self {
        match Preset::from_key(s) {
            Some(preset) => Self::Preset(preset),
            None => Self::Custom(s.trim().to_string()),
        }
    }

    /// Returns the provider name for this configuration.
    pub fn name(&self) -> &str {
        match self {
            Self::Preset(preset) => preset.display_name(),
            Self::Custom(_) => "custom",
        }
    }

    /// Resolves to a concrete provider.
    ///
    /// `user_agent` overrides the preset's User-Agent when given.
    pub fn resolve(&self, user_agent: Option<String>) -> Result<TileProvider, ProviderError> {
        match self {
            Self::Preset(preset) => {
                let user_agent = user_agent.or_else(|| preset.user_agent().map(String::from));
                TileProvider::new(preset.display_name(), preset.url_template(), user_agent)
            }
            Self::Custom(template) => TileProvider::new("custom", template.as_str(), user_agent),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::Preset(Preset::Osm)
    }
}

impl fmt::Display for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(preset) => f.write_str(preset.key()),
            Self::Custom(template) => f.write_str(template),
        }
    }
}
