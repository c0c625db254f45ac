//! Service error types.

use crate::canvas::CanvasError;
use crate::config::ConfigFileError;
use crate::coord::CoordError;
use crate::orchestrator::OrchestratorError;
use crate::paper::PaperError;
use crate::pdf::PdfError;
use crate::provider::ProviderError;
use std::fmt;
use std::io;

/// Errors that can occur while rendering a map.
///
/// Every component error funnels into this type so a single boundary can
/// report it.
#[derive(Debug)]
pub enum ServiceError {
    /// Failed to create HTTP client
    HttpClientError(String),
    /// Invalid coordinates or zoom
    Coord(CoordError),
    /// Invalid output size
    Size(PaperError),
    /// Invalid provider configuration
    ProviderError(ProviderError),
    /// A tile could not be fetched or decoded
    Fetch(OrchestratorError),
    /// The output image could not be written
    Canvas(CanvasError),
    /// PDF conversion failed
    Pdf(PdfError),
    /// Invalid configuration
    ConfigError(String),
    /// Config file could not be loaded
    ConfigFile(ConfigFileError),
    /// I/O error (log files, output directories)
    IoError(io::Error),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpClientError(msg) => write!(f, "HTTP client error: {}", msg),
            Self::Coord(e) => write!(f, "Invalid coordinates: {}", e),
            Self::Size(e) => write!(f, "Invalid output size: {}", e),
            Self::ProviderError(e) => write!(f, "Provider error: {}", e),
            Self::Fetch(e) => write!(f, "Tile download failed: {}", e),
            Self::Canvas(e) => write!(f, "Output error: {}", e),
            Self::Pdf(e) => write!(f, "PDF conversion failed: {}", e),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::ConfigFile(e) => write!(f, "Configuration error: {}", e),
            Self::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Coord(e) => Some(e),
            Self::Size(e) => Some(e),
            Self::ProviderError(e) => Some(e),
            Self::Fetch(e) => Some(e),
            Self::Canvas(e) => Some(e),
            Self::Pdf(e) => Some(e),
            Self::ConfigFile(e) => Some(e),
            Self::IoError(e) => Some(e),
            Self::HttpClientError(_) | Self::ConfigError(_) => None,
        }
    }
}

impl From<CoordError> for ServiceError {
    fn from(e: CoordError) -> Self {
        Self::Coord(e)
    }
}

impl From<PaperError> for ServiceError {
    fn from(e: PaperError) -> Self {
        Self::Size(e)
    }
}

impl From<ProviderError> for ServiceError {
    fn from(e: ProviderError) -> Self {
        Self::ProviderError(e)
    }
}

impl From<OrchestratorError> for ServiceError {
    fn from(e: OrchestratorError) -> Self {
        Self::Fetch(e)
    }
}

impl From<CanvasError> for ServiceError {
    fn from(e: CanvasError) -> Self {
        Self::Canvas(e)
    }
}

impl From<PdfError> for ServiceError {
    fn from(e: PdfError) -> Self {
        Self::Pdf(e)
    }
}

impl From<ConfigFileError> for ServiceError {
    fn from(e: ConfigFileError) -> Self {
        Self::ConfigFile(e)
    }
}

impl From<io::Error> for ServiceError {
    fn from(e: io::Error) -> Self {
        Self::IoError(e)
    }
}
