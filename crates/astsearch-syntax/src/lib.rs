//! Structural search over Python source.
//!
//! This crate provides:
//!
//! - **Parsing** via [`Parser`] (Tree-sitter with the Python grammar) and
//!   [`SyntaxTree`], which lowers the concrete tree into nodes shaped like
//!   Python's abstract grammar
//! - **Pattern compilation** via [`Pattern::compile`], turning a fragment of
//!   Python with `?` and `??` wildcards into a structural pattern
//! - **Matching and scanning** via [`Pattern::matches`], [`Pattern::scan`]
//!   and [`scan_many`], which searches a corpus and skips units that do not
//!   parse
//!
//! # Pattern Language
//!
//! - `?` matches exactly one element: an expression, a name, a parameter, a
//!   keyword value or a statement
//! - `??` matches any number of elements, including none, in a list,
//!   argument list, parameter list or block
//! - `??=??` in a call matches any further keyword arguments
//! - a plain name also matches an attribute access ending in that name
//!
//! # Example
//!
//! ```
//! use astsearch_syntax::{Pattern, ScanEvent, SourceUnit, scan_many};
//!
//! let pattern = Pattern::compile("open(?, ??)")?;
//! let units = [
//!     SourceUnit::new("a.py", "with open(path, 'rb') as f:\n    pass\n"),
//!     SourceUnit::new("b.py", "def broken(:\n"),
//! ];
//!
//! for event in scan_many(&pattern, units)? {
//!     match event {
//!         ScanEvent::Match { unit, node } => println!("{unit}:{}", node.line()),
//!         ScanEvent::Skipped { unit, error } => eprintln!("{unit}: {error}"),
//!     }
//! }
//! # Ok::<(), astsearch_syntax::SyntaxError>(())
//! ```

mod error;
mod lower;
mod matcher;
mod parser;
mod pattern;
mod position;
mod scanner;
mod tree;

pub use error::SyntaxError;
pub use matcher::node_matches;
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use pattern::{KeyMatch, KeywordSlot, Pattern, PatternNode, Slot};
pub use position::Position;
pub use scanner::{Matches, ScanEvent, ScanMany, SourceUnit, parse_unit, scan_many};
pub use tree::{
    Descendants, FieldShape, FieldSpec, FieldValue, Keyword, NodeKind, Operator, Scalar,
    SyntaxNode, SyntaxTree,
};

#[cfg(test)]
mod tests;
