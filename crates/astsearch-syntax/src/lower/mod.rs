//! Lowering from Tree-sitter's concrete syntax tree to [`SyntaxNode`]s.
//!
//! The lowering drops punctuation, comments and parentheses, flattens
//! grammar-specific wrappers, and decodes literal values so that two
//! spellings of the same program construct produce equal nodes.

mod expressions;
mod literals;
mod parameters;
mod statements;

use tree_sitter::Node;

use crate::position::position_of;
use crate::tree::{NodeKind, Scalar, SyntaxNode};

/// Lowers a parsed `module` node.
pub(crate) fn lower_module(root: Node<'_>, source: &str) -> SyntaxNode {
    let lowerer = Lowerer { source };
    SyntaxNode::new(NodeKind::Module, position_of(root)).with_sequence("body", lowerer.block(root))
}

/// Lowering state: the source text the tree was parsed from.
struct Lowerer<'s> {
    source: &'s str,
}

impl<'s> Lowerer<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// Lowers any node, statement or expression.
    fn node(&self, node: Node<'_>) -> SyntaxNode {
        self.statement(node)
            .unwrap_or_else(|| self.expression(node))
    }

    /// Lowers the statements directly under `node`.
    fn block(&self, node: Node<'_>) -> Vec<SyntaxNode> {
        named_children(node)
            .into_iter()
            .map(|child| self.node(child))
            .collect()
    }

    /// Lowers the block stored in the named field; empty when absent.
    fn block_field(&self, node: Node<'_>, name: &str) -> Vec<SyntaxNode> {
        node.child_by_field_name(name)
            .map(|block| self.block(block))
            .unwrap_or_default()
    }

    fn field(&self, node: Node<'_>, name: &str) -> Option<SyntaxNode> {
        node.child_by_field_name(name)
            .map(|child| self.node(child))
    }

    fn identifier_field(&self, node: Node<'_>, name: &str) -> Option<Scalar> {
        node.child_by_field_name(name)
            .map(|child| Scalar::identifier(self.text(child)))
    }

    /// Lowers one or more expressions; several become an implicit tuple.
    fn expressions(&self, nodes: &[Node<'_>]) -> Option<SyntaxNode> {
        match nodes {
            [] => None,
            [single] => Some(self.node(*single)),
            [first, ..] => Some(
                SyntaxNode::new(NodeKind::Tuple, position_of(*first))
                    .with_sequence("elts", nodes.iter().map(|node| self.node(*node)).collect()),
            ),
        }
    }

    /// Keeps a construct without a dedicated kind as an `Other` node.
    ///
    /// Interior nodes record their grammar kind; leaves record their text so
    /// that distinct leaves never compare equal.
    fn other(&self, node: Node<'_>) -> SyntaxNode {
        let children = named_children(node);
        let syntax = if children.is_empty() {
            self.text(node)
        } else {
            node.kind()
        };
        SyntaxNode::new(NodeKind::Other, position_of(node))
            .with_scalar("syntax", Some(Scalar::Syntax(syntax.to_owned())))
            .with_sequence(
                "children",
                children.into_iter().map(|child| self.node(child)).collect(),
            )
    }
}

/// Named children of `node`, without comments.
fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Children stored under the named field, without comments.
fn field_children<'t>(node: Node<'t>, name: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(name, &mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Named children of the given grammar kind.
fn children_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    named_children(node)
        .into_iter()
        .filter(|child| child.kind() == kind)
        .collect()
}

fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    named_children(node).into_iter().next()
}

/// Whether `node` has an anonymous child token spelled `token`.
fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token)
}
