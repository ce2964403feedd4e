//! Syntax nodes and their field values.

use std::fmt;

use super::kind::{FieldShape, FieldSpec, NodeKind};
use super::scalar::Scalar;
use crate::position::Position;

/// A keyword argument of a call or class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    /// The keyword name; `None` for a `**mapping` splat.
    pub key: Option<String>,
    /// The argument value.
    pub value: SyntaxNode,
}

impl Keyword {
    /// Creates a keyword argument.
    #[must_use]
    pub const fn new(key: Option<String>, value: SyntaxNode) -> Self {
        Self { key, value }
    }
}

/// The value stored in one field of a [`SyntaxNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A scalar, or `None` when absent.
    Scalar(Option<Scalar>),
    /// A child node, or `None` when absent.
    Child(Option<Box<SyntaxNode>>),
    /// A sequence of nodes; also used for statement blocks.
    Sequence(Vec<SyntaxNode>),
    /// Keyword arguments.
    Keywords(Vec<Keyword>),
}

impl FieldValue {
    /// Returns the empty value for a field of the given shape.
    #[must_use]
    pub const fn empty(shape: FieldShape) -> Self {
        match shape {
            FieldShape::Scalar => Self::Scalar(None),
            FieldShape::Child => Self::Child(None),
            FieldShape::Sequence | FieldShape::Block { .. } => Self::Sequence(Vec::new()),
            FieldShape::Keywords => Self::Keywords(Vec::new()),
        }
    }

    /// Returns whether the field is absent or holds an empty collection.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(value) => value.is_none(),
            Self::Child(child) => child.is_none(),
            Self::Sequence(items) => items.is_empty(),
            Self::Keywords(keywords) => keywords.is_empty(),
        }
    }

    fn fits(&self, shape: FieldShape) -> bool {
        matches!(
            (self, shape),
            (Self::Scalar(_), FieldShape::Scalar)
                | (Self::Child(_), FieldShape::Child)
                | (Self::Sequence(_), FieldShape::Sequence | FieldShape::Block { .. })
                | (Self::Keywords(_), FieldShape::Keywords)
        )
    }
}

/// A node of the lowered syntax tree.
///
/// A node stores one [`FieldValue`] per entry of its kind's field table, in
/// table order. Nodes own their children; cloning a node clones its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: NodeKind,
    fields: Vec<FieldValue>,
    position: Position,
}

impl SyntaxNode {
    /// Creates a node of `kind` with every field empty.
    #[must_use]
    pub fn new(kind: NodeKind, position: Position) -> Self {
        let fields = kind
            .fields()
            .iter()
            .map(|spec| FieldValue::empty(spec.shape))
            .collect();
        Self {
            kind,
            fields,
            position,
        }
    }

    /// Sets a scalar field.
    #[must_use]
    pub fn with_scalar(mut self, name: &str, value: Option<Scalar>) -> Self {
        self.set_field(name, FieldValue::Scalar(value));
        self
    }

    /// Sets a child field.
    #[must_use]
    pub fn with_child(mut self, name: &str, child: Option<Self>) -> Self {
        self.set_field(name, FieldValue::Child(child.map(Box::new)));
        self
    }

    /// Sets a sequence or block field.
    #[must_use]
    pub fn with_sequence(mut self, name: &str, items: Vec<Self>) -> Self {
        self.set_field(name, FieldValue::Sequence(items));
        self
    }

    /// Sets a keywords field.
    #[must_use]
    pub fn with_keywords(mut self, name: &str, keywords: Vec<Keyword>) -> Self {
        self.set_field(name, FieldValue::Keywords(keywords));
        self
    }

    /// Replaces the named field's value.
    ///
    /// Unknown names and values of the wrong shape are ignored; both are
    /// programming errors caught by debug assertions.
    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        let index = self.kind.field_index(name);
        debug_assert!(index.is_some(), "{} has no field {name}", self.kind);
        let Some(index) = index else {
            return;
        };
        let fits = self
            .kind
            .fields()
            .get(index)
            .is_some_and(|spec| value.fits(spec.shape));
        debug_assert!(fits, "{}.{name} cannot hold {value:?}", self.kind);
        if let (true, Some(slot)) = (fits, self.fields.get_mut(index)) {
            *slot = value;
        }
    }

    /// Returns the node kind.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns where the node starts in its source.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the one-based line the node starts on.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.position.line
    }

    /// Returns the named field's value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.kind
            .field_index(name)
            .and_then(|index| self.fields.get(index))
    }

    /// Returns the named scalar field, if present.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        match self.field(name) {
            Some(FieldValue::Scalar(value)) => value.as_ref(),
            _ => None,
        }
    }

    /// Returns the named child field, if present.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        match self.field(name) {
            Some(FieldValue::Child(child)) => child.as_deref(),
            _ => None,
        }
    }

    /// Returns the named sequence field; empty when absent.
    #[must_use]
    pub fn sequence(&self, name: &str) -> &[Self] {
        match self.field(name) {
            Some(FieldValue::Sequence(items)) => items,
            _ => &[],
        }
    }

    /// Returns the named keywords field; empty when absent.
    #[must_use]
    pub fn keywords(&self, name: &str) -> &[Keyword] {
        match self.field(name) {
            Some(FieldValue::Keywords(keywords)) => keywords,
            _ => &[],
        }
    }

    /// Iterates over field specs paired with their values, in table order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &FieldValue)> {
        self.kind.fields().iter().zip(&self.fields)
    }

    /// Consumes the node, yielding field specs paired with owned values.
    pub fn into_fields(self) -> impl Iterator<Item = (&'static FieldSpec, FieldValue)> {
        self.kind.fields().iter().zip(self.fields)
    }

    /// Returns the identifier when this node is a `Name`.
    #[must_use]
    pub fn name_id(&self) -> Option<&str> {
        if self.kind == NodeKind::Name {
            self.scalar("id").and_then(Scalar::as_identifier)
        } else {
            None
        }
    }

    /// Returns the direct child nodes in field order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        let mut children = Vec::new();
        for value in &self.fields {
            match value {
                FieldValue::Scalar(_) => {}
                FieldValue::Child(child) => children.extend(child.as_deref()),
                FieldValue::Sequence(items) => children.extend(items),
                FieldValue::Keywords(keywords) => {
                    children.extend(keywords.iter().map(|keyword| &keyword.value));
                }
            }
        }
        children
    }

    /// Iterates over this node and all of its descendants in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator over a node and its descendants.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

impl fmt::Display for SyntaxNode {
    /// Renders the node as `Kind(field=value, ...)`, omitting empty fields.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        let mut first = true;
        for (spec, value) in self.fields().filter(|(_, value)| !value.is_empty()) {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}=", spec.name)?;
            match value {
                FieldValue::Scalar(Some(scalar)) => write!(f, "{scalar}")?,
                FieldValue::Child(Some(child)) => write!(f, "{child}")?,
                FieldValue::Sequence(items) => write_list(f, items.iter())?,
                FieldValue::Keywords(keywords) => write_list(f, keywords.iter())?,
                FieldValue::Scalar(None) | FieldValue::Child(None) => {}
            }
        }
        f.write_str(")")
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{key}={}", self.value),
            None => write!(f, "**{}", self.value),
        }
    }
}

pub(crate) fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    f.write_str("[")?;
    for (index, item) in items.enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}
