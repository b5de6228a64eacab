//! Crawl controller - one fetch, index and enqueue cycle per call
//!
//! The controller owns the frontier and drives the pipeline:
//! - Pop the next URL from the frontier
//! - Skip it if the index store already has it (normal mode only)
//! - Fetch and parse the page
//! - Index the page
//! - Queue its same-site links at the back of the frontier
//!
//! It keeps no visited set of its own; the index store is the single source
//! of truth for "already indexed".

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::Frontier;
use crate::document::Document;
use crate::links::{extract_links, parse_seed, SiteScope, DEFAULT_ARTICLE_PREFIX};
use crate::storage::{self, IndexStore, SharedIndex};
use crate::IndexerError;

/// Whether a crawl cycle consults the index store before fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrawlMode {
    /// Skip URLs the store already has
    #[default]
    Normal,
    /// Always fetch and (re)index the popped URL
    Testing,
}

impl From<bool> for CrawlMode {
    fn from(testing: bool) -> Self {
        if testing {
            Self::Testing
        } else {
            Self::Normal
        }
    }
}

/// Crawl controller
pub struct CrawlController<F, S> {
    source: String,
    scope: SiteScope,
    frontier: Frontier,
    fetcher: F,
    index: SharedIndex<S>,
}

impl<F: PageFetcher, S: IndexStore> CrawlController<F, S> {
    /// Creates a controller seeded with a single URL
    ///
    /// The seed is validated here rather than at fetch time and queued in its
    /// normalized form, the same form resolved links take.
    ///
    /// # Arguments
    ///
    /// * `seed` - Absolute http(s) URL of the first page
    /// * `fetcher` - Page fetcher used for every cycle
    /// * `index` - Shared index store
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlController)` - Frontier holds exactly the seed
    /// * `Err(IndexerError::Config)` - The seed is empty or malformed
    pub fn new(seed: &str, fetcher: F, index: SharedIndex<S>) -> crate::Result<Self> {
        Self::with_article_prefix(seed, DEFAULT_ARTICLE_PREFIX, fetcher, index)
    }

    /// Creates a controller that follows links under a custom article prefix
    pub fn with_article_prefix(
        seed: &str,
        article_prefix: &str,
        fetcher: F,
        index: SharedIndex<S>,
    ) -> crate::Result<Self> {
        let url = parse_seed(seed)?;
        let scope = SiteScope::new(&url, article_prefix)?;
        let source = String::from(url);

        Ok(Self {
            frontier: Frontier::with_seed(source.clone()),
            source,
            scope,
            fetcher,
            index,
        })
    }

    /// The normalized seed URL
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn scope(&self) -> &SiteScope {
        &self.scope
    }

    /// Number of pending frontier entries, duplicates included
    pub fn queue_size(&self) -> usize {
        self.frontier.len()
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn index(&self) -> &SharedIndex<S> {
        &self.index
    }

    /// Runs one crawl cycle
    ///
    /// # Returns
    ///
    /// * `Ok(Some(url))` - The URL was fetched, indexed and its links queued
    /// * `Ok(None)` - The popped URL was already indexed and was skipped;
    ///   nothing else was popped
    /// * `Err(IndexerError::FrontierExhausted)` - Nothing left to pop
    /// * `Err(IndexerError::Fetch)` - The fetch failed; the URL is dropped
    /// * `Err(IndexerError::Storage)` - The index store failed
    pub async fn crawl(&mut self, mode: CrawlMode) -> crate::Result<Option<String>> {
        let url = self.frontier.pop().ok_or(IndexerError::FrontierExhausted)?;

        if mode == CrawlMode::Normal {
            let indexed = storage::lock(&self.index)?.is_indexed(&url)?;
            if indexed {
                tracing::debug!("Skipping {} (already indexed)", url);
                return Ok(None);
            }
        }

        let document = match self.fetcher.fetch(&url).await {
            Ok(document) => document,
            Err(e) => {
                tracing::debug!("Dropping {} after failed fetch", url);
                return Err(e.into());
            }
        };

        storage::lock(&self.index)?.index_page(&url, &document)?;

        let queued = self.queue_internal_links(&document);
        tracing::info!(
            "Indexed {} ({} links queued, {} pending)",
            url,
            queued,
            self.frontier.len()
        );

        Ok(Some(url))
    }

    /// Appends the document's same-site links to the back of the frontier
    ///
    /// Links are queued verbatim, in document order, without dedup.
    /// Returns the number of links queued.
    pub fn queue_internal_links(&mut self, document: &Document) -> usize {
        let before = self.frontier.len();
        self.frontier.extend(extract_links(document, &self.scope));
        self.frontier.len() - before
    }

    /// Fetches the seed page and queues its links without indexing it
    ///
    /// The seed itself stays in the frontier, so the first cycle still
    /// indexes it.
    pub async fn prime(&mut self) -> crate::Result<usize> {
        let document = self.fetcher.fetch(&self.source).await?;
        let queued = self.queue_internal_links(&document);
        tracing::info!("Primed frontier with {} links from {}", queued, self.source);
        Ok(queued)
    }
}
