use crate::document::{Document, InlineNode};
use crate::links::SiteScope;

/// Lazily yields the same-site article links of a document
///
/// Blocks are visited in order and nodes depth-first within each block, so
/// links come out in document order. Links outside the scope are skipped.
/// The iterator only borrows the document; calling this again yields the
/// same sequence.
///
/// # Examples
///
/// ```
/// use wiki_indexer::document::{Block, Document, InlineNode};
/// use wiki_indexer::links::{extract_links, parse_seed, SiteScope};
///
/// let seed = parse_seed("https://site.example/wiki/Start").unwrap();
/// let scope = SiteScope::new(&seed, "/wiki/").unwrap();
/// let doc = Document::new(vec![Block::new(vec![
///     InlineNode::link("/wiki/Next", "next"),
///     InlineNode::link("https://other.example/x", "elsewhere"),
/// ])]);
///
/// let links: Vec<String> = extract_links(&doc, &scope).collect();
/// assert_eq!(links, vec!["https://site.example/wiki/Next"]);
/// ```
pub fn extract_links<'a>(
    document: &'a Document,
    scope: &'a SiteScope,
) -> impl Iterator<Item = String> + 'a {
    document
        .nodes()
        .filter_map(InlineNode::href)
        .filter_map(move |href| scope.resolve(href))
}
