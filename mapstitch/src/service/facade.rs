//! Map stitching service facade implementation.

use super::config::ServiceConfig;
use super::error::ServiceError;
use super::types::{format_bytes, RenderRequest, StitchReport};
use crate::cache::TileCache;
use crate::canvas::Canvas;
use crate::coord::{tile_to_lat_lon, to_tile_coords, TileCoord};
use crate::grid::HalfSpan;
use crate::log::Logger;
use crate::orchestrator::TileOrchestrator;
use crate::pdf::PdfConverter;
use crate::provider::{HttpClient, ProviderConfig, ReqwestClient, TileProvider};
use crate::{log_debug, log_info};
use std::sync::Arc;
use std::time::Instant;

/// High-level facade for rendering maps.
///
/// Wires the HTTP client, provider, tile cache and worker pool together and
/// runs one render per call: locate the center tile, plan the grid, fetch
/// every tile, assemble the canvas, write it, and optionally hand it to the
/// PDF converter.
///
/// # Example
///
/// ```ignore
/// use mapstitch::log::TracingLogger;
/// use mapstitch::paper::OutputSize;
/// use mapstitch::provider::ProviderConfig;
/// use mapstitch::service::{MapStitchService, RenderRequest, ServiceConfig};
/// use std::sync::Arc;
///
/// let service = MapStitchService::new(
///     ServiceConfig::default(),
///     ProviderConfig::default(),
///     None,
///     Arc::new(TracingLogger),
/// )?;
/// let size = OutputSize::parse("a4-landscape", 150)?;
/// let report = service.render(&RenderRequest::new(46.5, 7.9, 13, size, "map.png"))?;
/// ```
pub struct MapStitchService<C: HttpClient = ReqwestClient> {
    config: ServiceConfig,
    orchestrator: TileOrchestrator<C>,
    pdf_converter: PdfConverter,
    logger: Arc<dyn Logger>,
}

impl MapStitchService<ReqwestClient> {
    /// Create a service that fetches tiles over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider template is invalid or the HTTP
    /// client cannot be built.
    pub fn new(
        config: ServiceConfig,
        provider_config: ProviderConfig,
        user_agent: Option<String>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, ServiceError> {
        let provider = provider_config.resolve(user_agent)?;
        let http_client = ReqwestClient::with_timeout(config.download().timeout_secs())
            .map_err(|e| ServiceError::HttpClientError(e.to_string()))?;

        Ok(Self::with_http_client(config, provider, http_client, logger))
    }
}

impl<C: HttpClient> MapStitchService<C> {
    /// Create a service around an existing HTTP client.
    pub fn with_http_client(
        config: ServiceConfig,
        provider: TileProvider,
        http_client: C,
        logger: Arc<dyn Logger>,
    ) -> Self {
        log_info!(
            logger,
            "Provider: {} ({}), cache: {}",
            provider.name(),
            provider.url_template(),
            config.cache_directory().display()
        );

        let cache = TileCache::new(config.cache_directory(), http_client, Arc::clone(&logger));
        let orchestrator = TileOrchestrator::new(
            cache,
            provider,
            config.download().parallel_downloads(),
            Arc::clone(&logger),
        );

        Self {
            config,
            orchestrator,
            pdf_converter: PdfConverter::default(),
            logger,
        }
    }

    /// Replace the PDF converter.
    pub fn with_pdf_converter(mut self, converter: PdfConverter) -> Self {
        self.pdf_converter = converter;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn provider(&self) -> &TileProvider {
        self.orchestrator.provider()
    }

    pub fn cache(&self) -> &TileCache<C> {
        self.orchestrator.cache()
    }

    /// Render one map.
    ///
    /// Nothing is written unless every tile was obtained. A PDF is only
    /// produced for paper sizes.
    pub fn render(&self, request: &RenderRequest) -> Result<StitchReport, ServiceError> {
        let start = Instant::now();

        let (width, height) = request.size.dimensions()?;
        let paper = request.size.paper().copied();
        if request.pdf && paper.is_none() {
            return Err(ServiceError::ConfigError(format!(
                "PDF output needs a paper size such as a4-landscape, got {}",
                request.size
            )));
        }

        let center = to_tile_coords(request.latitude, request.longitude, request.zoom)?;
        let tile_size = self.config.tile_size();
        let span = HalfSpan::for_canvas(width, height, tile_size);

        log_info!(
            self.logger,
            "Rendering {} around ({}, {}) at zoom {}: center tile {}, {}x{} grid",
            request.size,
            request.latitude,
            request.longitude,
            request.zoom,
            center,
            span.columns(),
            span.rows()
        );
        self.log_bounds(&center, &span);

        let before = self.cache().stats();
        let grid = self.orchestrator.fetch_grid(&center, &span)?;
        let after = self.cache().stats();

        let mut canvas = Canvas::new(width, height, tile_size);
        canvas.assemble(grid.placements());
        canvas.save(&request.output)?;
        log_debug!(self.logger, "Wrote {}", request.output.display());

        let pdf = match paper {
            Some(paper) if request.pdf => {
                let path = self
                    .pdf_converter
                    .convert(&request.output, paper.ppi, (width, height))?;
                log_info!(self.logger, "Wrote {}", path.display());
                Some(path)
            }
            _ => None,
        };

        let report = StitchReport {
            center,
            width,
            height,
            tiles_placed: grid.tiles.len(),
            tiles_skipped: grid.skipped.len(),
            cache_hits: after.hits - before.hits,
            downloads: after.downloads - before.downloads,
            bytes_downloaded: after.bytes_downloaded - before.bytes_downloaded,
            elapsed: start.elapsed(),
            output: request.output.clone(),
            pdf,
        };

        log_info!(self.logger, "{}", report);
        log_debug!(
            self.logger,
            "Cache lifetime: {} requests, {:.0}% hits, {} downloaded",
            after.requests(),
            after.hit_rate() * 100.0,
            format_bytes(after.bytes_downloaded)
        );

        Ok(report)
    }

    /// Logs the approximate area covered by the grid, clamped to the map.
    fn log_bounds(&self, center: &TileCoord, span: &HalfSpan) {
        let last = (center.grid_size() - 1) as u32;
        let north_west = TileCoord::new(
            center.x.saturating_sub(span.x),
            center.y.saturating_sub(span.y),
            center.zoom,
        );
        let south_east = TileCoord::new(
            center.x.saturating_add(span.x).min(last) + 1,
            center.y.saturating_add(span.y).min(last) + 1,
            center.zoom,
        );

        let (north, west) = tile_to_lat_lon(&north_west);
        let (south, east) = tile_to_lat_lon(&south_east);
        log_debug!(
            self.logger,
            "Covering lat {:.4}..{:.4}, lon {:.4}..{:.4}",
            south,
            north,
            west,
            east
        );
    }
}
