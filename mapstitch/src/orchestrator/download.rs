//! Parallel grid download implementation

use super::types::{FetchedGrid, FetchedTile, OrchestratorError, TileJob};
use crate::cache::TileCache;
use crate::coord::TileCoord;
use crate::grid::HalfSpan;
use crate::log::Logger;
use crate::provider::{HttpClient, TileProvider};
use crate::{log_debug, log_warn};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

/// Fetches every tile of a grid through a shared cache.
///
/// Workers pull jobs from a shared queue until it is empty. The first failure
/// stops the pool: workers finish the request they are on, no new jobs are
/// started, and the error is returned. Decoded tiles are handed back over a
/// channel; nothing is placed until every worker has exited.
///
/// # Example
///
/// ```ignore
/// use mapstitch::cache::TileCache;
/// use mapstitch::orchestrator::TileOrchestrator;
/// use mapstitch::provider::{ProviderConfig, ReqwestClient};
///
/// let cache = TileCache::new("cache", ReqwestClient::new()?, logger.clone());
/// let provider = ProviderConfig::default().resolve(None)?;
/// let orchestrator = TileOrchestrator::new(cache, provider, 8, logger);
/// ```
pub struct TileOrchestrator<C: HttpClient> {
    cache: TileCache<C>,
    provider: TileProvider,
    max_parallel_downloads: usize,
    logger: Arc<dyn Logger>,
}

impl<C: HttpClient> TileOrchestrator<C> {
    /// Creates an orchestrator.
    ///
    /// `max_parallel_downloads` is raised to 1 if zero.
    pub fn new(
        cache: TileCache<C>,
        provider: TileProvider,
        max_parallel_downloads: usize,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            cache,
            provider,
            max_parallel_downloads: max_parallel_downloads.max(1),
            logger,
        }
    }

    pub fn cache(&self) -> &TileCache<C> {
        &self.cache
    }

    pub fn provider(&self) -> &TileProvider {
        &self.provider
    }

    pub fn max_parallel_downloads(&self) -> usize {
        self.max_parallel_downloads
    }

    /// Lists the tiles of the grid around `center`.
    ///
    /// Returns the jobs to run and the offsets that fall off the top or
    /// bottom of the map. Columns wrap around the antimeridian.
    pub fn plan(center: &TileCoord, span: &HalfSpan) -> (Vec<TileJob>, Vec<(i64, i64)>) {
        let mut jobs = Vec::with_capacity(span.tile_count());
        let mut skipped = Vec::new();

        for (dx, dy) in span.offsets() {
            match center.offset(dx, dy) {
                Some(tile) => jobs.push(TileJob {
                    offset: (dx, dy),
                    tile,
                }),
                None => skipped.push((dx, dy)),
            }
        }

        (jobs, skipped)
    }

    /// Splits jobs into the first job for each tile and the jobs that repeat
    /// an earlier tile.
    ///
    /// Repeats occur when the grid is wider than the map and columns wrap.
    pub fn dedupe(jobs: Vec<TileJob>) -> (Vec<TileJob>, Vec<TileJob>) {
        let mut seen = HashSet::with_capacity(jobs.len());
        jobs.into_iter().partition(|job| seen.insert(job.tile))
    }

    /// Fetches and decodes every tile of the grid around `center`.
    ///
    /// Each distinct tile is requested once; grid positions that repeat it
    /// share the decoded image.
    pub fn fetch_grid(
        &self,
        center: &TileCoord,
        span: &HalfSpan,
    ) -> Result<FetchedGrid, OrchestratorError> {
        let (jobs, skipped) = Self::plan(center, span);

        if !skipped.is_empty() {
            log_warn!(
                self.logger,
                "{} tile(s) around {} fall outside the map and will be left blank",
                skipped.len(),
                center
            );
        }

        let (unique, repeats) = Self::dedupe(jobs);
        if !repeats.is_empty() {
            log_debug!(
                self.logger,
                "{} grid position(s) repeat a wrapped column and reuse its tile",
                repeats.len()
            );
        }

        let mut tiles = self.run_jobs(unique)?;

        let positions: HashMap<TileCoord, usize> = tiles
            .iter()
            .enumerate()
            .map(|(index, fetched)| (fetched.tile, index))
            .collect();
        for job in repeats {
            if let Some(&index) = positions.get(&job.tile) {
                let image = tiles[index].image.clone();
                tiles.push(FetchedTile {
                    offset: job.offset,
                    tile: job.tile,
                    image,
                });
            }
        }
        tiles.sort_by_key(|fetched| fetched.offset);

        Ok(FetchedGrid { tiles, skipped })
    }

    fn run_jobs(&self, jobs: Vec<TileJob>) -> Result<Vec<FetchedTile>, OrchestratorError> {
        let job_count = jobs.len();
        let workers = self.max_parallel_downloads.min(job_count.max(1));
        log_debug!(
            self.logger,
            "Fetching {} tiles with {} worker(s)",
            job_count,
            workers
        );

        let queue = Mutex::new(jobs.into_iter());
        let abort = AtomicBool::new(false);
        let (tx, rx) = mpsc::channel();

        let panicked = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let tx = tx.clone();
                    let queue = &queue;
                    let abort = &abort;

                    scope.spawn(move || {
                        while !abort.load(Ordering::SeqCst) {
                            let job = match queue.lock() {
                                Ok(mut queue) => queue.next(),
                                Err(_) => None,
                            };
                            let Some(job) = job else {
                                break;
                            };

                            let result = self.fetch(job);
                            if result.is_err() {
                                abort.store(true, Ordering::SeqCst);
                            }
                            if tx.send(result).is_err() {
                                break;
                            }
                        }
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .filter(Result::is_err)
                .count()
        });

        // Drop sender so the receiver knows we're done
        drop(tx);

        if panicked > 0 {
            return Err(OrchestratorError::WorkerPanicked(panicked));
        }

        let mut tiles = Vec::with_capacity(job_count);
        for result in rx {
            tiles.push(result?);
        }

        Ok(tiles)
    }

    fn fetch(&self, job: TileJob) -> Result<FetchedTile, OrchestratorError> {
        let image = self
            .cache
            .get(&self.provider, &job.tile)
            .map_err(|source| OrchestratorError::Tile {
                tile: job.tile,
                source,
            })?;

        Ok(FetchedTile {
            offset: job.offset,
            tile: job.tile,
            image,
        })
    }
}
