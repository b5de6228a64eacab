//! Storage module for the term index
//!
//! This module handles persistence of indexed pages, including:
//! - The IndexStore contract used by the crawl controller
//! - SQLite database initialization and schema management
//! - An in-memory backend with the same contract
//! - Shared handles for stores used across the crawler and reports

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemoryIndex;
pub use sqlite::SqliteIndex;
pub use traits::{IndexStore, StorageError, StorageResult};

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to an index store
///
/// The store outlives any one crawl controller; the controller, the driver
/// and reports each hold a clone.
pub type SharedIndex<S> = Arc<Mutex<S>>;

/// Wraps a store in a shared handle
pub fn shared<S: IndexStore>(store: S) -> SharedIndex<S> {
    Arc::new(Mutex::new(store))
}

/// Locks a shared store, mapping a poisoned lock to a storage error
pub fn lock<S>(index: &Mutex<S>) -> StorageResult<MutexGuard<'_, S>> {
    index.lock().map_err(|_| StorageError::Poisoned)
}

/// Initializes or opens an index database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteIndex)` - Successfully initialized storage
/// * `Err(IndexerError)` - Failed to initialize storage
pub fn open_index(path: &Path) -> crate::Result<SqliteIndex> {
    SqliteIndex::new(path)
}

/// Represents an indexed page in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPage {
    pub url: String,
    /// RFC 3339 timestamp of the latest write
    pub indexed_at: String,
    /// Total term occurrences counted on the page
    pub term_total: u64,
}
