//! Term frequency counting

use crate::document::Document;
use std::collections::HashMap;

/// Splits text into lowercase terms
///
/// Any character that is not alphanumeric separates terms; empty pieces are
/// dropped.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

/// Term frequencies for a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermCounter {
    counts: HashMap<String, u32>,
}

impl TermCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every term in every text run of the document
    pub fn from_document(document: &Document) -> Self {
        let mut counter = Self::new();
        for run in document.text_runs() {
            counter.process_text(run);
        }
        counter
    }

    pub fn process_text(&mut self, text: &str) {
        for term in tokenize(text) {
            self.increment(term);
        }
    }

    pub fn increment(&mut self, term: String) {
        *self.counts.entry(term).or_insert(0) += 1;
    }

    /// Count for one term (0 if absent)
    pub fn get(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all term occurrences
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(term, &count)| (term.as_str(), count))
    }
}
