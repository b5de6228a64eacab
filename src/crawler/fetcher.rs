//! Page fetcher implementations
//!
//! This module handles retrieving pages for the crawl controller, including:
//! - The PageFetcher contract the controller is generic over
//! - Building HTTP clients with proper user agent strings
//! - HTTP fetching with status and content-type checks
//! - Reading saved pages from a local directory

use crate::config::{Config, UserAgentConfig};
use crate::crawler::parser::ContentExtractor;
use crate::document::Document;
use crate::FetchError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Retrieves a page and parses it into a document
///
/// Each call is a fresh retrieval; no caching is assumed.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError>;
}

/// Formats the user agent string: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Whole-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use wiki_indexer::config::UserAgentConfig;
/// use wiki_indexer::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "WikiIndexer".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP
///
/// # Failure Mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | Connection/timeout/body read failure | `FetchError::Http` |
/// | Non-2xx status | `FetchError::Status` |
/// | Content-Type not HTML | `FetchError::Parse` |
/// | No content root in page | `FetchError::Parse` |
pub struct HttpFetcher {
    client: Client,
    extractor: ContentExtractor,
}

impl HttpFetcher {
    pub fn new(client: Client, extractor: ContentExtractor) -> Self {
        Self { client, extractor }
    }

    /// Builds the client and content extractor from configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.fetcher.timeout_secs),
        )
        .map_err(|source| FetchError::Http {
            url: config.crawler.seed.clone(),
            source,
        })?;
        let extractor = ContentExtractor::from_config(&config.fetcher)?;
        Ok(Self::new(client, extractor))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing Content-Type is tolerated; a non-HTML one is not
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.contains("html") {
                return Err(FetchError::Parse {
                    url: url.to_string(),
                    message: format!("expected HTML, got {}", content_type),
                });
            }
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        self.extractor.parse(&body, url)
    }
}

/// Reads pages from saved HTML files
///
/// A URL maps to the file named after its last path segment inside the
/// directory, so `https://en.wikipedia.org/wiki/Java` reads `<dir>/Java`.
pub struct DirectoryFetcher {
    root: PathBuf,
    extractor: ContentExtractor,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>, extractor: ContentExtractor) -> Self {
        Self {
            root: root.into(),
            extractor,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the file backing a URL
    pub fn page_path(&self, url: &str) -> Result<PathBuf, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let name = parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .ok_or_else(|| FetchError::Parse {
                url: url.to_string(),
                message: "URL has no page name".to_string(),
            })?;

        Ok(self.root.join(name))
    }
}

impl PageFetcher for DirectoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let path = self.page_path(url)?;
        tracing::debug!("Reading {} from {}", url, path.display());

        let html = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io {
                url: url.to_string(),
                source,
            })?;

        self.extractor.parse(&html, url)
    }
}
