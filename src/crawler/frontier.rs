//! Crawl frontier
//!
//! FIFO queue of discovered-but-unvisited URLs. Popping from the front and
//! pushing to the back gives a breadth-first traversal from the seed.
//!
//! Duplicates are kept on purpose: dedup happens when a URL is popped, by
//! asking the index store, so enqueueing never touches the store.

use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    queue: VecDeque<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier whose only entry is the seed
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let mut frontier = Self::new();
        frontier.push(seed);
        frontier
    }

    /// Appends a URL to the back, even if it is already queued
    pub fn push(&mut self, url: impl Into<String>) {
        self.queue.push_back(url.into());
    }

    /// Removes and returns the front URL
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// The URL the next pop would return
    pub fn peek(&self) -> Option<&str> {
        self.queue.front().map(String::as_str)
    }

    /// Number of pending entries, duplicates included
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending entries from front to back
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.queue.iter().map(String::as_str)
    }
}

impl Extend<String> for Frontier {
    fn extend<I: IntoIterator<Item = String>>(&mut self, urls: I) {
        self.queue.extend(urls);
    }
}
