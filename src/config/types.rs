use serde::Deserialize;

/// Main configuration structure for Wiki-Indexer
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URL; the only initial frontier entry
    pub seed: String,

    /// Root-relative path prefix of same-site article links
    #[serde(rename = "article-prefix", default = "default_article_prefix")]
    pub article_prefix: String,

    /// Upper bound on crawl cycles per run
    #[serde(rename = "max-cycles", default = "default_max_cycles")]
    pub max_cycles: u32,

    /// Stop once this many new pages have been indexed
    #[serde(rename = "pages-to-index", default = "default_pages_to_index")]
    pub pages_to_index: u32,
}

/// Page fetching and content extraction configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// CSS selector of the element holding the article body
    #[serde(rename = "content-root", default = "default_content_root")]
    pub content_root: String,

    /// CSS selector, relative to the content root, of each content block
    #[serde(rename = "block-selector", default = "default_block_selector")]
    pub block_selector: String,

    /// Request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Read pages from saved HTML files in this directory instead of the network
    #[serde(rename = "cache-dir", default)]
    pub cache_dir: Option<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite index database
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Terms whose counts are reported after a crawl
    #[serde(rename = "report-terms", default = "default_report_terms")]
    pub report_terms: Vec<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            block_selector: default_block_selector(),
            timeout_secs: default_timeout_secs(),
            cache_dir: None,
        }
    }
}

fn default_article_prefix() -> String {
    crate::links::DEFAULT_ARTICLE_PREFIX.to_string()
}

fn default_max_cycles() -> u32 {
    1000
}

fn default_pages_to_index() -> u32 {
    1
}

fn default_content_root() -> String {
    "#mw-content-text".to_string()
}

fn default_block_selector() -> String {
    "p".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_report_terms() -> Vec<String> {
    vec!["the".to_string()]
}
