//! Output module for reporting on the index
//!
//! This module handles:
//! - Ranking the pages that contain a term
//! - Printing term counts and crawl outcomes
//! - Index statistics

pub mod stats;

pub use stats::{load_statistics, print_statistics, IndexStatistics};

use crate::crawler::CrawlReport;
use crate::storage::IndexStore;

/// Pages containing a term, highest count first
///
/// Ties are ordered by URL so the ranking is stable across runs.
///
/// # Arguments
///
/// * `store` - The index store to query
/// * `term` - The term to look up (case-sensitive; terms are stored lowercase)
///
/// # Returns
///
/// * `Ok(Vec<(url, count)>)` - Empty when no page contains the term
/// * `Err(IndexerError)` - The store query failed
pub fn ranked_counts(
    store: &dyn IndexStore,
    term: &str,
) -> crate::Result<Vec<(String, u32)>> {
    let mut ranked: Vec<(String, u32)> = store.get_counts(term)?.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(ranked)
}

/// Prints `count url` lines for a term
pub fn print_term_counts(term: &str, ranked: &[(String, u32)]) {
    println!("=== Counts for '{}' ({} pages) ===", term, ranked.len());
    for (url, count) in ranked {
        println!("{:>8}  {}", count, url);
    }
    println!();
}

/// Prints the outcome of a crawl loop
pub fn print_crawl_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");
    println!("  Cycles: {}", report.cycles);
    println!("  Indexed: {}", report.indexed.len());
    for url in &report.indexed {
        println!("    * {}", url);
    }
    println!("  Skipped (already indexed): {}", report.skipped);
    println!("  Failed fetches: {}", report.failed);
    println!("  Frontier left: {}", report.pending);
    if report.exhausted {
        println!("  Frontier exhausted");
    }
    println!();
}
