//! In-process index backend
//!
//! Same contract as the SQLite store, held in hash maps. Nothing survives the
//! process; useful for one-off runs and tests.

use crate::document::{Document, TermCounter};
use crate::storage::traits::{IndexStore, StorageResult};
use crate::storage::IndexedPage;
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug)]
struct Entry {
    indexed_at: String,
    counts: TermCounter,
}

/// In-memory index backend
#[derive(Debug, Default)]
pub struct MemoryIndex {
    pages: HashMap<String, Entry>,
    writes: usize,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `index_page` calls since creation
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl IndexStore for MemoryIndex {
    fn is_indexed(&self, url: &str) -> StorageResult<bool> {
        Ok(self.pages.contains_key(url))
    }

    fn index_page(&mut self, url: &str, document: &Document) -> StorageResult<()> {
        let entry = Entry {
            indexed_at: Utc::now().to_rfc3339(),
            counts: TermCounter::from_document(document),
        };
        self.pages.insert(url.to_string(), entry);
        self.writes += 1;
        Ok(())
    }

    fn get_counts(&self, term: &str) -> StorageResult<HashMap<String, u32>> {
        Ok(self
            .pages
            .iter()
            .filter_map(|(url, entry)| match entry.counts.get(term) {
                0 => None,
                count => Some((url.clone(), count)),
            })
            .collect())
    }

    fn get_urls(&self, term: &str) -> StorageResult<Vec<String>> {
        let mut urls: Vec<String> = self.get_counts(term)?.into_keys().collect();
        urls.sort();
        Ok(urls)
    }

    fn term_count(&self, url: &str, term: &str) -> StorageResult<u32> {
        Ok(self
            .pages
            .get(url)
            .map(|entry| entry.counts.get(term))
            .unwrap_or(0))
    }

    fn get_page(&self, url: &str) -> StorageResult<Option<IndexedPage>> {
        Ok(self.pages.get(url).map(|entry| IndexedPage {
            url: url.to_string(),
            indexed_at: entry.indexed_at.clone(),
            term_total: entry.counts.total(),
        }))
    }

    fn count_indexed(&self) -> StorageResult<u64> {
        Ok(self.pages.len() as u64)
    }

    fn count_terms(&self) -> StorageResult<u64> {
        let terms: BTreeSet<&str> = self
            .pages
            .values()
            .flat_map(|entry| entry.counts.iter().map(|(term, _)| term))
            .collect();
        Ok(terms.len() as u64)
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.pages.clear();
        Ok(())
    }
}
