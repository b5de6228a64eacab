//! Statistics generation from the index
//!
//! This module provides functionality for extracting and displaying
//! index statistics from the storage layer.

use crate::storage::IndexStore;

/// Index statistics summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStatistics {
    /// Number of pages in the index
    pub indexed_pages: u64,

    /// Number of distinct terms across all pages
    pub distinct_terms: u64,
}

/// Loads statistics from an index store
///
/// # Arguments
///
/// * `store` - The index store to query
///
/// # Returns
///
/// * `Ok(IndexStatistics)` - Successfully loaded statistics
/// * `Err(IndexerError)` - Failed to query statistics
pub fn load_statistics(store: &dyn IndexStore) -> crate::Result<IndexStatistics> {
    Ok(IndexStatistics {
        indexed_pages: store.count_indexed()?,
        distinct_terms: store.count_terms()?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &IndexStatistics) {
    println!("=== Index Statistics ===\n");

    println!("Overview:");
    println!("  Indexed pages: {}", stats.indexed_pages);
    println!("  Distinct terms: {}", stats.distinct_terms);

    let per_page = if stats.indexed_pages > 0 {
        stats.distinct_terms as f64 / stats.indexed_pages as f64
    } else {
        0.0
    };
    println!("  Distinct terms per page: {:.1}", per_page);
}
