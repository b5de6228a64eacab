//! Same-site link handling
//!
//! This module decides which hyperlinks the crawler follows:
//! - Seed URL validation
//! - The site scope (origin plus article path prefix) derived from the seed
//! - Lazy extraction of same-site article links from a document

mod extract;
mod scope;

pub use extract::extract_links;
pub use scope::{parse_seed, SiteScope, DEFAULT_ARTICLE_PREFIX};
