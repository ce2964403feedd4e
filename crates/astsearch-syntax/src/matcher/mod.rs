//! Structural matching of compiled patterns against syntax nodes.
//!
//! Matching is a pure predicate over a [`PatternNode`] and a [`SyntaxNode`]:
//! kinds must agree, then every constrained field must satisfy its slot.
//! Fields the pattern leaves unconstrained are ignored. A slot and a field of
//! different shapes never match; nothing in here can fail or panic.

mod matching;

use crate::pattern::{Pattern, PatternNode, Slot};
use crate::tree::SyntaxNode;

/// Returns whether `node` satisfies the pattern node `pattern`.
#[must_use]
pub fn node_matches(pattern: &PatternNode, node: &SyntaxNode) -> bool {
    matching::node_matches(pattern, node)
}

impl Pattern {
    /// Returns whether `node` itself matches this pattern.
    ///
    /// Only the node is tested; use [`Pattern::scan`] to search a tree.
    #[must_use]
    pub fn matches(&self, node: &SyntaxNode) -> bool {
        match self.root() {
            Slot::Node(root) => matching::node_matches(root, node),
            slot => matching::element_matches(slot, node),
        }
    }
}
