//! The lowered syntax tree that patterns are matched against.
//!
//! Tree-sitter's concrete syntax tree keeps every token. Structural search
//! wants the shape of the program instead, so the parser output is lowered
//! into [`SyntaxNode`]s whose kinds and fields follow Python's abstract
//! grammar.

mod kind;
mod node;
mod scalar;

pub use kind::{FieldShape, FieldSpec, NodeKind};
pub use node::{Descendants, FieldValue, Keyword, SyntaxNode};
pub use scalar::{Operator, Scalar};

pub(crate) use node::write_list;

use crate::error::SyntaxError;
use crate::lower;
use crate::parser::{ParseResult, Parser};

/// A parsed and lowered source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

impl SyntaxTree {
    /// Parses Python source into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnitSyntax`] describing the first syntax error
    /// when the source does not parse cleanly, or a parser error when the
    /// grammar cannot be loaded.
    pub fn parse(source: &str) -> Result<Self, SyntaxError> {
        let mut parser = Parser::new()?;
        let parsed = parser.parse(source)?;
        Self::from_parse_result(&parsed)
    }

    /// Lowers an existing parse result.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnitSyntax`] when the parse result holds
    /// syntax errors.
    pub fn from_parse_result(parsed: &ParseResult) -> Result<Self, SyntaxError> {
        if let Some(info) = parsed.first_error() {
            return Err(SyntaxError::unit_from_info(&info));
        }
        let root = lower::lower_module(parsed.root_node(), parsed.source());
        Ok(Self { root })
    }

    /// Returns the `Module` root node.
    #[must_use]
    pub const fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Iterates over every node of the tree in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        self.root.descendants()
    }
}
