//! Merging command-line arguments with the config file.
//!
//! Each setting is taken from the command line if given, otherwise from the
//! config file, which itself carries the built-in defaults.

use mapstitch::config::{ConfigFile, DownloadConfig};
use mapstitch::paper::OutputSize;
use mapstitch::provider::ProviderConfig;
use mapstitch::service::{RenderRequest, ServiceConfig, ServiceError};

use crate::args::Args;
use crate::error::CliError;

/// Everything needed to build the service and run one render.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub service: ServiceConfig,
    pub provider: ProviderConfig,
    pub user_agent: Option<String>,
    pub request: RenderRequest,
}

/// Resolve all settings from CLI args and config.
pub fn resolve(args: &Args, config: &ConfigFile) -> Result<Resolved, CliError> {
    let ppi = args.ppi.unwrap_or(config.output.ppi);
    let size_spec = args.size.as_deref().unwrap_or(&config.output.size);
    let size = OutputSize::parse(size_spec, ppi)
        .map_err(|e| CliError::Render(ServiceError::from(e)))?;

    let download = DownloadConfig::new()
        .with_timeout_secs(config.download.timeout)
        .with_parallel_downloads(args.jobs.unwrap_or(config.download.parallel));

    let service = ServiceConfig::builder()
        .cache_directory(
            args.cache
                .clone()
                .unwrap_or_else(|| config.cache.directory.clone()),
        )
        .download(download)
        .build();

    let request = RenderRequest::new(
        args.latitude,
        args.longitude,
        args.zoom.unwrap_or(config.output.zoom),
        size,
        args.output.clone(),
    )
    .with_pdf(args.pdf);

    Ok(Resolved {
        service,
        provider: resolve_provider(args.provider.as_deref(), config),
        user_agent: args
            .user_agent
            .clone()
            .or_else(|| config.provider.user_agent.clone()),
        request,
    })
}

/// Resolve the provider from CLI args and config.
pub fn resolve_provider(cli_provider: Option<&str>, config: &ConfigFile) -> ProviderConfig {
    ProviderConfig::parse(cli_provider.unwrap_or(&config.provider.provider_type))
}
