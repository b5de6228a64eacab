use crate::document::InlineNode;

/// Depth-first, pre-order iterator over a slice of inline nodes
///
/// A node is yielded before its children, and siblings keep their document
/// order. The walk uses an explicit stack, so deeply nested markup cannot
/// overflow the call stack.
pub struct Nodes<'a> {
    stack: Vec<&'a InlineNode>,
}

impl<'a> Nodes<'a> {
    pub fn new(roots: &'a [InlineNode]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a InlineNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children reversed so the first child is popped next
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
