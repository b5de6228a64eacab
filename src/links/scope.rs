use crate::{ConfigError, ConfigResult};
use url::Url;

/// Path prefix under which a wiki serves its articles
pub const DEFAULT_ARTICLE_PREFIX: &str = "/wiki/";

/// Parses and validates a seed URL
///
/// The seed must be a non-empty absolute `http` or `https` URL with a host.
///
/// # Examples
///
/// ```
/// use wiki_indexer::links::parse_seed;
///
/// assert!(parse_seed("https://en.wikipedia.org/wiki/Rust").is_ok());
/// assert!(parse_seed("").is_err());
/// assert!(parse_seed("/wiki/Rust").is_err());
/// ```
pub fn parse_seed(seed: &str) -> ConfigResult<Url> {
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(ConfigError::InvalidSeed("seed URL is empty".to_string()));
    }

    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidSeed(format!("'{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidSeed(format!(
            "'{}': only HTTP and HTTPS schemes are supported, got {}",
            seed,
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidSeed(format!("'{}': missing host", seed)));
    }

    Ok(url)
}

/// The set of URLs considered part of the crawled site
///
/// A link is same-site when its target is a root-relative path starting with
/// the article prefix. It resolves by prepending the seed's origin
/// (scheme, host and port).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteScope {
    origin: String,
    article_prefix: String,
}

impl SiteScope {
    /// Builds the scope for a validated seed
    pub fn new(seed: &Url, article_prefix: &str) -> ConfigResult<Self> {
        if !article_prefix.starts_with('/') || article_prefix.starts_with("//") {
            return Err(ConfigError::Validation(format!(
                "article prefix must be a root-relative path, got '{}'",
                article_prefix
            )));
        }

        let origin = seed.origin();
        if !origin.is_tuple() {
            return Err(ConfigError::InvalidSeed(format!(
                "'{}': URL has no origin",
                seed
            )));
        }

        Ok(Self {
            origin: origin.ascii_serialization(),
            article_prefix: article_prefix.to_string(),
        })
    }

    /// Scheme and host (with port, if any) prepended to same-site paths
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn article_prefix(&self) -> &str {
        &self.article_prefix
    }

    /// Returns true if the href is a same-site article path
    pub fn is_same_site(&self, href: &str) -> bool {
        href.starts_with(&self.article_prefix)
    }

    /// Resolves a same-site href to an absolute URL, verbatim
    ///
    /// Returns None for anything else: absolute or protocol-relative URLs,
    /// fragments, other paths, `mailto:` and friends.
    pub fn resolve(&self, href: &str) -> Option<String> {
        if self.is_same_site(href) {
            Some(format!("{}{}", self.origin, href))
        } else {
            None
        }
    }
}
