//! High-level service facade for map rendering.
//!
//! This module provides a simplified API that encapsulates all component
//! wiring and configuration, following the Facade pattern.
//!
//! # Example
//!
//! ```ignore
//! use mapstitch::config::DownloadConfig;
//! use mapstitch::paper::OutputSize;
//! use mapstitch::provider::ProviderConfig;
//! use mapstitch::service::{MapStitchService, RenderRequest, ServiceConfig};
//!
//! let config = ServiceConfig::builder()
//!     .cache_directory("cache")
//!     .download(DownloadConfig::default())
//!     .build();
//!
//! let service = MapStitchService::new(config, ProviderConfig::default(), None, logger)?;
//! let size = OutputSize::parse("2048x2048", 150)?;
//! let report = service.render(&RenderRequest::new(51.5, -0.12, 13, size, "map.png"))?;
//! ```

mod config;
mod error;
mod facade;
mod types;

pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::ServiceError;
pub use facade::MapStitchService;
pub use types::{format_bytes, RenderRequest, StitchReport};
