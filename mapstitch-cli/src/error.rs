//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use mapstitch::config::ConfigFileError;
use mapstitch::service::ServiceError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create service
    ServiceCreation(ServiceError),
    /// Failed to render the map
    Render(ServiceError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        // Messages embed their causes, so one line carries the whole chain
        eprintln!("Error: {}", self);

        if let Some(hint) = self.hint() {
            eprintln!();
            eprintln!("{}", hint);
        }

        process::exit(1)
    }

    /// Extra advice for errors with a common fix.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Render(ServiceError::Pdf(_)) => Some(
                "PDF output needs ImageMagick 7 ('magick' on PATH):\n  \
                 Debian/Ubuntu: sudo apt install imagemagick\n  \
                 macOS: brew install imagemagick",
            ),
            CliError::Render(ServiceError::Fetch(_)) => Some(
                "Common issues:\n  \
                 1. No network connection or the tile server is down\n  \
                 2. The server rejects the User-Agent: set one with --user-agent\n  \
                 3. The zoom level is beyond what the provider serves",
            ),
            CliError::Render(ServiceError::Canvas(_)) => {
                Some("Use an output file name ending in .png, .jpg or .jpeg")
            }
            CliError::ServiceCreation(ServiceError::ProviderError(_)) => Some(
                "Use one of: osm, satellite, topo, or a URL template with {x}, {y} and {z} \
                 in its path, e.g. https://tiles.example.org/{z}/{x}/{y}.png",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ServiceCreation(e) => write!(f, "Failed to create service: {}", e),
            CliError::Render(e) => write!(f, "Failed to render map: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ServiceCreation(e) => Some(e),
            CliError::Render(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::Render(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}
