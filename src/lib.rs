//! Wiki-Indexer: an incremental same-site crawler and term index
//!
//! This crate follows same-site article links outward from a seed page,
//! indexing the term frequencies of every page it visits exactly once.

pub mod config;
pub mod crawler;
pub mod document;
pub mod links;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for Wiki-Indexer operations
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Frontier exhausted: no URLs left to crawl")]
    FrontierExhausted,

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),
}

/// Errors raised while retrieving or parsing a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Failed to read cached page for {url}: {source}")]
    Io { url: String, source: std::io::Error },
}

/// Result type alias for Wiki-Indexer operations
pub type Result<T> = std::result::Result<T, IndexerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlController, CrawlMode, PageFetcher};
pub use document::{Block, Document, InlineNode};
pub use links::{extract_links, SiteScope};
pub use storage::{IndexStore, MemoryIndex, SqliteIndex};
