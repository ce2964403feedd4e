//! Pattern compilation for structural search.
//!
//! A pattern is a Python statement or expression in which `?` stands for
//! exactly one element and `??` for any number of elements (including none).
//! Compilation parses the pattern, lowers it like any other source, and then
//! generalises the literal tree into [`Slot`] directives:
//!
//! - names also match attribute accesses ending in the same name, so `foo`
//!   matches `bar.foo`;
//! - `?` in a field requires the field to be present but leaves its content
//!   free;
//! - `??` in a list leaves a prefix and suffix constrained and the middle
//!   free; as the last call argument it also frees the keywords;
//! - `??=??` among call keywords turns the keywords into a subset test;
//! - an empty argument or parameter list requires the candidate's to be
//!   empty too.
//!
//! # Example
//!
//! ```
//! use astsearch_syntax::{Pattern, SyntaxTree};
//!
//! let pattern = Pattern::compile("f(1, ??)")?;
//! let tree = SyntaxTree::parse("f(1)\nf(2)\nm.f(1, x=3)\n")?;
//! assert_eq!(pattern.scan(&tree).count(), 2);
//! # Ok::<(), astsearch_syntax::SyntaxError>(())
//! ```

mod arguments;
mod compile;
mod wildcards;

use std::fmt;

use tracing::debug;

use crate::error::SyntaxError;
use crate::parser::Parser;
use crate::tree::{NodeKind, Scalar, SyntaxNode, SyntaxTree, write_list};

/// A compiled structural pattern.
///
/// Patterns are immutable and may be shared across threads and reused for
/// any number of scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    root: Slot,
    root_kinds: Vec<NodeKind>,
}

/// A pattern for one node: its kind plus one optional slot per field.
///
/// `slots` is aligned with the kind's field table. A `None` slot leaves the
/// field unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternNode {
    kind: NodeKind,
    slots: Vec<Option<Slot>>,
}

impl PatternNode {
    /// Creates a pattern node from slots aligned with `kind`'s field table.
    #[must_use]
    pub const fn new(kind: NodeKind, slots: Vec<Option<Slot>>) -> Self {
        Self { kind, slots }
    }

    /// Returns the kind a candidate node must have.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the per-field slots, in field table order.
    #[must_use]
    pub fn slots(&self) -> &[Option<Slot>] {
        &self.slots
    }

    /// Returns the slot for the named field, if it is constrained.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.kind
            .field_index(name)
            .and_then(|index| self.slots.get(index))
            .and_then(Option::as_ref)
    }
}

/// A match directive for one field, sequence element or keyword value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// The scalar must equal this value.
    Literal(Scalar),
    /// The node must match this sub-pattern.
    Node(Box<PatternNode>),
    /// The field must be present and non-empty.
    Any,
    /// The field must be absent or empty.
    Absent,
    /// A `Name` with this id, or an `Attribute` whose attribute is this name.
    NameOrPath(String),
    /// The sequence must have exactly these elements, in order.
    Sequence(Vec<Slot>),
    /// The sequence must start with `front` and end with `back`; anything
    /// may sit between them.
    SequenceSplit {
        /// Slots for the leading elements.
        front: Vec<Slot>,
        /// Slots for the trailing elements.
        back: Vec<Slot>,
    },
    /// The keywords must be exactly these, in order.
    Keywords(Vec<KeywordSlot>),
    /// Each of these keywords must be present; others are ignored.
    KeywordSubset(Vec<KeywordSlot>),
    /// Each of these slots must match some element of the sequence, in any
    /// order; other elements are ignored.
    NodeSubset(Vec<Slot>),
}

/// A pattern for one keyword argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSlot {
    /// Which keys satisfy this slot.
    pub key: KeyMatch,
    /// The slot the keyword's value must match.
    pub value: Slot,
}

/// How a keyword slot's key is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMatch {
    /// A keyword with exactly this name.
    Named(String),
    /// A `**mapping` splat.
    Splat,
    /// Any named keyword.
    Any,
}

impl Pattern {
    /// Compiles a pattern from its text.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::PatternSyntax`] if the pattern does not parse
    /// as Python once wildcards are substituted, holds more than one
    /// statement, is nothing but a wildcard, or uses `??` twice in one list.
    /// Positions refer to the text as written.
    pub fn compile(text: &str) -> Result<Self, SyntaxError> {
        let substituted = wildcards::substitute(text);
        let mut parser = Parser::new()?;
        let parsed = parser.parse(&substituted)?;
        if let Some(info) = parsed.first_error() {
            let error = SyntaxError::pattern_from_info(&info);
            return Err(wildcards::restore_error(error, &substituted));
        }

        let tree = SyntaxTree::from_parse_result(&parsed)?;
        let statement = single_statement(tree.root())?;
        let root = compile::compile_root(statement)
            .map_err(|error| wildcards::restore_error(error, &substituted))?;
        let root_kinds = match &root {
            Slot::Node(node) => vec![node.kind()],
            _ => vec![NodeKind::Name, NodeKind::Attribute],
        };

        let pattern = Self {
            source: text.to_owned(),
            root,
            root_kinds,
        };
        debug!(pattern = text, compiled = %pattern, "compiled pattern");
        Ok(pattern)
    }

    /// Returns the pattern text as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compiled root slot: either [`Slot::Node`] or
    /// [`Slot::NameOrPath`].
    #[must_use]
    pub const fn root(&self) -> &Slot {
        &self.root
    }

    /// Returns the node kinds a match can have.
    #[must_use]
    pub fn root_kinds(&self) -> &[NodeKind] {
        &self.root_kinds
    }

    /// Whether nodes of `kind` are candidates for this pattern.
    #[must_use]
    pub fn accepts_kind(&self, kind: NodeKind) -> bool {
        self.root_kinds.contains(&kind)
    }
}

/// Extracts the only statement of a pattern module, unwrapping a bare
/// expression.
fn single_statement(module: &SyntaxNode) -> Result<SyntaxNode, SyntaxError> {
    let position = module.position();
    let statement = match module.sequence("body") {
        [statement] => statement.clone(),
        [_, second, ..] => {
            let at = second.position();
            return Err(SyntaxError::pattern_syntax(
                at.line,
                at.column,
                "pattern must be a single statement or expression",
            ));
        }
        [] => {
            return Err(SyntaxError::pattern_syntax(
                position.line,
                position.column,
                "pattern is empty",
            ));
        }
    };

    let value = (statement.kind() == NodeKind::Expr)
        .then(|| statement.child("value").cloned())
        .flatten();
    Ok(value.unwrap_or(statement))
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl fmt::Display for PatternNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        let constrained = self
            .kind
            .fields()
            .iter()
            .zip(&self.slots)
            .filter_map(|(spec, slot)| slot.as_ref().map(|constraint| (spec.name, constraint)));
        for (index, (name, slot)) in constrained.enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={slot}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(scalar) => write!(f, "{scalar}"),
            Self::Node(node) => write!(f, "{node}"),
            Self::Any => f.write_str("Any"),
            Self::Absent => f.write_str("Absent"),
            Self::NameOrPath(name) => write!(f, "NameOrPath({name:?})"),
            Self::Sequence(slots) => write_list(f, slots.iter()),
            Self::SequenceSplit { front, back } => {
                f.write_str("SequenceSplit(front=")?;
                write_list(f, front.iter())?;
                f.write_str(", back=")?;
                write_list(f, back.iter())?;
                f.write_str(")")
            }
            Self::Keywords(keywords) => write_list(f, keywords.iter()),
            Self::KeywordSubset(keywords) => {
                f.write_str("KeywordSubset(")?;
                write_list(f, keywords.iter())?;
                f.write_str(")")
            }
            Self::NodeSubset(slots) => {
                f.write_str("NodeSubset(")?;
                write_list(f, slots.iter())?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for KeywordSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            KeyMatch::Named(name) => write!(f, "{name}={}", self.value),
            KeyMatch::Splat => write!(f, "**{}", self.value),
            KeyMatch::Any => write!(f, "?={}", self.value),
        }
    }
}
