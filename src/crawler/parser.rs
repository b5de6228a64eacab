//! HTML to document conversion
//!
//! This module reduces a fetched HTML page to the document model:
//! - Locate the content root (the article body)
//! - Turn each block match under it into a content block
//! - Convert child markup into typed inline nodes

use crate::config::FetcherConfig;
use crate::document::{Block, Document, InlineNode};
use crate::{ConfigError, ConfigResult, FetchError};
use scraper::{ElementRef, Html, Node, Selector};

/// Extracts article content from HTML pages
///
/// # Conversion Rules
///
/// - `<a href="...">` becomes a link node (href kept verbatim)
/// - `<a>` without href and every other element become plain element nodes
/// - Text becomes text runs
/// - Comments and processing instructions are dropped
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    root: Selector,
    block: Selector,
    root_source: String,
}

impl ContentExtractor {
    /// Builds an extractor from the content root and block selectors
    pub fn new(content_root: &str, block_selector: &str) -> ConfigResult<Self> {
        Ok(Self {
            root: parse_selector(content_root)?,
            block: parse_selector(block_selector)?,
            root_source: content_root.to_string(),
        })
    }

    pub fn from_config(config: &FetcherConfig) -> ConfigResult<Self> {
        Self::new(&config.content_root, &config.block_selector)
    }

    /// Parses an HTML page into a document
    ///
    /// # Arguments
    ///
    /// * `html` - The HTML content to parse
    /// * `url` - The page URL, used in error messages
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The blocks found under the content root
    /// * `Err(FetchError::Parse)` - The page has no content root
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_indexer::crawler::ContentExtractor;
    ///
    /// let extractor = ContentExtractor::new("#mw-content-text", "p").unwrap();
    /// let html = r#"<div id="mw-content-text"><p>See <a href="/wiki/Rust">Rust</a>.</p></div>"#;
    /// let doc = extractor.parse(html, "https://site.example/wiki/Start").unwrap();
    /// assert_eq!(doc.blocks.len(), 1);
    /// assert_eq!(doc.text(), "See Rust.");
    /// ```
    pub fn parse(&self, html: &str, url: &str) -> Result<Document, FetchError> {
        let page = Html::parse_document(html);

        let root = page
            .select(&self.root)
            .next()
            .ok_or_else(|| FetchError::Parse {
                url: url.to_string(),
                message: format!("content root '{}' not found", self.root_source),
            })?;

        let blocks = root
            .select(&self.block)
            .map(|element| Block::new(convert_children(element)))
            .collect();

        Ok(Document::new(blocks))
    }
}

fn parse_selector(selector: &str) -> ConfigResult<Selector> {
    Selector::parse(selector).map_err(|e| {
        ConfigError::Validation(format!("'{}' is not a valid selector: {:?}", selector, e))
    })
}

/// Converts the children of an element into inline nodes
fn convert_children(parent: ElementRef<'_>) -> Vec<InlineNode> {
    parent
        .children()
        .filter_map(|child| {
            if let Some(element) = ElementRef::wrap(child) {
                return Some(convert_element(element));
            }
            match child.value() {
                Node::Text(text) => Some(InlineNode::text(&**text)),
                _ => None,
            }
        })
        .collect()
}

fn convert_element(element: ElementRef<'_>) -> InlineNode {
    let children = convert_children(element);
    let value = element.value();

    match (value.name(), value.attr("href")) {
        ("a", Some(href)) => InlineNode::Link {
            href: href.to_string(),
            children,
        },
        (tag, _) => InlineNode::element(tag, children),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://site.example/wiki/Start";

    fn extractor() -> ContentExtractor {
        ContentExtractor::new("#mw-content-text", "p").unwrap()
    }

    #[test]
    fn test_blocks_from_content_root_only() {
        let html = r#"<html><body>
            <p>Outside</p>
            <div id="mw-content-text">
                <p>First</p>
                <div><p>Second</p></div>
            </div>
        </body></html>"#;

        let doc = extractor().parse(html, URL).unwrap();
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].text(), "First");
        assert_eq!(doc.blocks[1].text(), "Second");
    }

    #[test]
    fn test_links_are_typed_nodes() {
        let html = r#"<div id="mw-content-text"><p>A <a href="/wiki/B" title="B">bee</a> and <b>bold</b></p></div>"#;

        let doc = extractor().parse(html, URL).unwrap();
        let nodes = &doc.blocks[0].nodes;
        assert_eq!(nodes[0], InlineNode::text("A "));
        assert_eq!(nodes[1], InlineNode::link("/wiki/B", "bee"));
        assert_eq!(nodes[2], InlineNode::text(" and "));
        assert_eq!(
            nodes[3],
            InlineNode::element("b", vec![InlineNode::text("bold")])
        );
    }

    #[test]
    fn test_nested_link_inside_element() {
        let html = r#"<div id="mw-content-text"><p><i><a href="/wiki/Deep">deep</a></i></p></div>"#;

        let doc = extractor().parse(html, URL).unwrap();
        let hrefs: Vec<&str> = doc.nodes().filter_map(InlineNode::href).collect();
        assert_eq!(hrefs, vec!["/wiki/Deep"]);
    }

    #[test]
    fn test_anchor_without_href_is_element() {
        let html = r#"<div id="mw-content-text"><p><a name="top">top</a></p></div>"#;

        let doc = extractor().parse(html, URL).unwrap();
        assert_eq!(
            doc.blocks[0].nodes[0],
            InlineNode::element("a", vec![InlineNode::text("top")])
        );
    }

    #[test]
    fn test_comments_dropped() {
        let html = r#"<div id="mw-content-text"><p>kept<!-- dropped --></p></div>"#;

        let doc = extractor().parse(html, URL).unwrap();
        assert_eq!(doc.blocks[0].nodes, vec![InlineNode::text("kept")]);
    }

    #[test]
    fn test_missing_content_root() {
        let html = r#"<html><body><p>No article here</p></body></html>"#;

        let result = extractor().parse(html, URL);
        assert!(matches!(result, Err(FetchError::Parse { .. })));
    }

    #[test]
    fn test_empty_content_root() {
        let html = r#"<div id="mw-content-text"></div>"#;

        let doc = extractor().parse(html, URL).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_invalid_selector_rejected() {
        assert!(ContentExtractor::new("#ok", "p[[").is_err());
    }
}
