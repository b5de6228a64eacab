//! Parsed page content
//!
//! A fetched page is reduced to the part worth indexing: an ordered list of
//! content blocks (paragraphs), each holding inline nodes. This module holds:
//! - The document model shared by fetchers, the link extractor and the index
//! - Depth-first traversal over inline nodes
//! - Term counting over text runs

mod terms;
mod walk;

pub use terms::{tokenize, TermCounter};
pub use walk::Nodes;

/// An ordered sequence of content blocks extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A paragraph-like unit of content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub nodes: Vec<InlineNode>,
}

/// A node inside a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// A run of plain text
    Text(String),

    /// A hyperlink; `href` is the raw target reference, absolute or relative
    Link {
        href: String,
        children: Vec<InlineNode>,
    },

    /// Any other inline element (emphasis, spans, superscripts, ...)
    Element {
        tag: String,
        children: Vec<InlineNode>,
    },
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Returns true if the document has no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Walks every node of every block, in document order
    pub fn nodes(&self) -> impl Iterator<Item = &InlineNode> + '_ {
        self.blocks.iter().flat_map(Block::nodes)
    }

    /// Yields every text run of the document, including text inside links
    pub fn text_runs(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes().filter_map(|node| match node {
            InlineNode::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of the whole document, one line per block
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Block {
    pub fn new(nodes: Vec<InlineNode>) -> Self {
        Self { nodes }
    }

    /// Depth-first, pre-order walk over this block's nodes
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes::new(&self.nodes)
    }

    pub fn text(&self) -> String {
        self.nodes()
            .filter_map(|node| match node {
                InlineNode::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl InlineNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Builds a link whose only child is its anchor text
    pub fn link(href: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self::Link {
            href: href.into(),
            children: vec![Self::Text(anchor.into())],
        }
    }

    pub fn element(tag: impl Into<String>, children: Vec<InlineNode>) -> Self {
        Self::Element {
            tag: tag.into(),
            children,
        }
    }

    /// Child nodes; text runs have none
    pub fn children(&self) -> &[InlineNode] {
        match self {
            Self::Text(_) => &[],
            Self::Link { children, .. } | Self::Element { children, .. } => children,
        }
    }

    /// The target reference if this node is a hyperlink
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Link { href, .. } => Some(href),
            _ => None,
        }
    }
}
