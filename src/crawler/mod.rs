//! Crawler module for page fetching and index building
//!
//! This module contains the crawling logic, including:
//! - The crawl controller and its frontier
//! - HTTP and directory page fetchers
//! - HTML to document conversion
//! - The polling loop that drives the controller to a stopping condition

mod controller;
mod fetcher;
mod frontier;
mod parser;

pub use controller::{CrawlController, CrawlMode};
pub use fetcher::{
    build_http_client, user_agent_string, DirectoryFetcher, HttpFetcher, PageFetcher,
};
pub use frontier::Frontier;
pub use parser::ContentExtractor;

use crate::config::Config;
use crate::storage::{self, IndexStore, SharedIndex};
use crate::IndexerError;
use std::time::Instant;

/// Driver options chosen on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlOptions {
    /// Clear the index before crawling
    pub reset: bool,
    /// Load the seed's links into the frontier before the first cycle
    pub prime: bool,
    /// Crawl mode used for every cycle
    pub mode: CrawlMode,
}

/// When the polling loop stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    /// Upper bound on crawl cycles
    pub max_cycles: u32,
    /// Stop after this many pages are indexed
    pub pages_to_index: u32,
}

impl CrawlLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_cycles: config.crawler.max_cycles,
            pages_to_index: config.crawler.pages_to_index,
        }
    }
}

/// Outcome of a polling loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Cycles that popped a URL
    pub cycles: u32,
    /// URLs indexed, in order
    pub indexed: Vec<String>,
    /// Cycles that skipped an already indexed URL
    pub skipped: u32,
    /// Cycles whose fetch failed
    pub failed: u32,
    /// Whether the loop ended on an empty frontier
    pub exhausted: bool,
    /// Frontier entries left when the loop ended
    pub pending: usize,
}

/// Drives a controller until a stopping condition is met
///
/// Calls `crawl` until `pages_to_index` pages are indexed, the frontier is
/// exhausted, or `max_cycles` cycles have run. Failed fetches are logged and
/// the loop moves on to the next frontier entry; any other error aborts.
pub async fn drive<F, S>(
    controller: &mut CrawlController<F, S>,
    limits: CrawlLimits,
    mode: CrawlMode,
) -> crate::Result<CrawlReport>
where
    F: PageFetcher,
    S: IndexStore,
{
    let mut report = CrawlReport::default();

    while report.cycles < limits.max_cycles
        && report.indexed.len() < limits.pages_to_index as usize
    {
        match controller.crawl(mode).await {
            Ok(Some(url)) => report.indexed.push(url),
            Ok(None) => report.skipped += 1,
            Err(IndexerError::FrontierExhausted) => {
                tracing::info!("Frontier is empty, crawl complete");
                report.exhausted = true;
                break;
            }
            Err(IndexerError::Fetch(e)) => {
                tracing::warn!("Skipping page: {}", e);
                report.failed += 1;
            }
            Err(e) => return Err(e),
        }
        report.cycles += 1;

        if report.cycles % 10 == 0 {
            tracing::info!(
                "Progress: {} cycles, {} indexed, {} in frontier",
                report.cycles,
                report.indexed.len(),
                controller.queue_size()
            );
        }
    }

    report.pending = controller.queue_size();
    Ok(report)
}

/// Runs a complete crawl against an index
///
/// This function:
/// 1. Optionally clears the index
/// 2. Builds the page fetcher (directory cache or HTTP)
/// 3. Creates a controller seeded from the configuration
/// 4. Optionally primes the frontier from the seed's links
/// 5. Drives the controller until a stopping condition is met
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `options` - Driver options
/// * `index` - The shared index store
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The loop finished
/// * `Err(IndexerError)` - Setup failed or the index store failed
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use wiki_indexer::config::load_config;
/// use wiki_indexer::crawler::{run_crawl, CrawlOptions};
/// use wiki_indexer::storage::{open_index, shared};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let index = shared(open_index(Path::new(&config.output.database_path))?);
/// let report = run_crawl(&config, CrawlOptions::default(), index).await?;
/// println!("Indexed {} pages", report.indexed.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl<S: IndexStore>(
    config: &Config,
    options: CrawlOptions,
    index: SharedIndex<S>,
) -> crate::Result<CrawlReport> {
    if options.reset {
        storage::lock(&index)?.clear()?;
    }

    match &config.fetcher.cache_dir {
        Some(dir) => {
            tracing::info!("Reading pages from {}", dir);
            let extractor = ContentExtractor::from_config(&config.fetcher)?;
            let fetcher = DirectoryFetcher::new(dir, extractor);
            run_with_fetcher(config, options, fetcher, index).await
        }
        None => {
            let fetcher = HttpFetcher::from_config(config)?;
            run_with_fetcher(config, options, fetcher, index).await
        }
    }
}

async fn run_with_fetcher<F: PageFetcher, S: IndexStore>(
    config: &Config,
    options: CrawlOptions,
    fetcher: F,
    index: SharedIndex<S>,
) -> crate::Result<CrawlReport> {
    let mut controller = CrawlController::with_article_prefix(
        &config.crawler.seed,
        &config.crawler.article_prefix,
        fetcher,
        index,
    )?;

    if options.prime {
        controller.prime().await?;
    }

    tracing::info!("Starting crawl from {}", controller.source());
    let start_time = Instant::now();

    let report = drive(&mut controller, CrawlLimits::from_config(config), options.mode).await?;

    tracing::info!(
        "Crawl finished: {} indexed, {} skipped, {} failed in {:?}",
        report.indexed.len(),
        report.skipped,
        report.failed,
        start_time.elapsed()
    );

    Ok(report)
}
