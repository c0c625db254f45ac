//! mapstitch - printable maps from slippy-map tiles
//!
//! Renders a fixed-size raster centered on a latitude/longitude by fetching
//! the surrounding Web Mercator tiles from a tile server, caching them on
//! disk, and stitching them onto one canvas. Output sizes may be given in
//! pixels or as ISO A-series paper sizes at a pixel density.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use mapstitch::service::{MapStitchService, RenderRequest, ServiceConfig};
//! use mapstitch::provider::ProviderConfig;
//!
//! let service = MapStitchService::new(ServiceConfig::default(), ProviderConfig::default(), None, logger)?;
//! service.render(&request)?;
//! ```

pub mod cache;
pub mod canvas;
pub mod config;
pub mod coord;
pub mod grid;
pub mod log;
pub mod logging;
pub mod orchestrator;
pub mod paper;
pub mod pdf;
pub mod provider;
pub mod service;

/// Version of the mapstitch library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
