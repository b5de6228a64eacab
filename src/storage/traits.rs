//! Index store trait and error types
//!
//! This module defines the contract the crawl controller relies on for
//! deduplication and persistence, plus the query surface used by reports.

use crate::document::Document;
use crate::storage::IndexedPage;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during index store operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Index store lock poisoned")]
    Poisoned,
}

/// Result type for index store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for index store backends
///
/// The store is the single source of truth for "already indexed": once
/// `index_page(url, ..)` returns, every later `is_indexed(url)` returns true.
pub trait IndexStore {
    // ===== Crawl Contract =====

    /// Returns whether the URL has a persisted entry
    ///
    /// Safe to call before any write for the URL (returns false).
    fn is_indexed(&self, url: &str) -> StorageResult<bool>;

    /// Persists the document's term frequencies under the URL
    ///
    /// Idempotent: indexing the same URL again replaces its previous counts.
    fn index_page(&mut self, url: &str, document: &Document) -> StorageResult<()>;

    // ===== Queries =====

    /// Gets the URL -> count map for a term
    fn get_counts(&self, term: &str) -> StorageResult<HashMap<String, u32>>;

    /// Gets the URLs containing a term
    fn get_urls(&self, term: &str) -> StorageResult<Vec<String>>;

    /// Gets the count of a term on one page (0 if absent)
    fn term_count(&self, url: &str, term: &str) -> StorageResult<u32>;

    /// Gets the index record for a page
    fn get_page(&self, url: &str) -> StorageResult<Option<IndexedPage>>;

    // ===== Statistics =====

    /// Counts indexed pages
    fn count_indexed(&self) -> StorageResult<u64>;

    /// Counts distinct terms across all pages
    fn count_terms(&self) -> StorageResult<u64>;

    // ===== Administration =====

    /// Removes every entry; used for bootstrap and tests only
    fn clear(&mut self) -> StorageResult<()>;
}
