//! Generalisation of a lowered pattern tree into slots.
//!
//! The compiler is a pure transform: it consumes the pattern's syntax tree
//! and builds a new slot tree, never mutating nodes in place.

use super::arguments;
use super::wildcards::{Wildcard, is_multi_marker};
use super::{PatternNode, Slot};
use crate::error::SyntaxError;
use crate::tree::{FieldShape, FieldSpec, FieldValue, NodeKind, Scalar, SyntaxNode};

/// Compiles the pattern's root node.
///
/// The root must constrain a node: a bare `?` or `??` would match every
/// node of every tree, which is never what a search wants.
pub(super) fn compile_root(node: SyntaxNode) -> Result<Slot, SyntaxError> {
    let position = node.position();
    match compile_node(node)? {
        Some(slot @ (Slot::Node(_) | Slot::NameOrPath(_))) => Ok(slot),
        _ => Err(SyntaxError::pattern_syntax(
            position.line,
            position.column,
            "a wildcard cannot be the whole pattern",
        )),
    }
}

/// Compiles a node; `None` leaves the enclosing field unconstrained.
pub(super) fn compile_node(node: SyntaxNode) -> Result<Option<Slot>, SyntaxError> {
    match node.kind() {
        NodeKind::Name => Ok(compile_name(&node)),
        NodeKind::Call => arguments::compile_call_like(node, "args", Some(Slot::Absent)).map(Some),
        NodeKind::ClassDef => arguments::compile_call_like(node, "bases", None).map(Some),
        NodeKind::Arguments => arguments::compile_parameters(node).map(Some),
        _ => compile_fields(node).map(Some),
    }
}

/// Compiles a list element. Elements always occupy a position, so an
/// unconstrained element still requires something to be there.
pub(super) fn compile_element(node: SyntaxNode) -> Result<Slot, SyntaxError> {
    Ok(compile_node(node)?.unwrap_or(Slot::Any))
}

fn compile_name(node: &SyntaxNode) -> Option<Slot> {
    let id = node.scalar("id").and_then(Scalar::as_identifier)?;
    match Wildcard::of_identifier(id) {
        Some(Wildcard::Single) => Some(Slot::Any),
        Some(Wildcard::Multi) => None,
        None => Some(Slot::NameOrPath(id.to_owned())),
    }
}

fn compile_fields(node: SyntaxNode) -> Result<Slot, SyntaxError> {
    let kind = node.kind();
    let slots = node
        .into_fields()
        .map(|(spec, value)| compile_field(spec, value))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Slot::Node(Box::new(PatternNode::new(kind, slots))))
}

/// Compiles one field value according to its shape.
pub(super) fn compile_field(
    spec: &FieldSpec,
    value: FieldValue,
) -> Result<Option<Slot>, SyntaxError> {
    match value {
        FieldValue::Scalar(scalar) => Ok(scalar.and_then(compile_scalar)),
        FieldValue::Child(child) => child.map_or(Ok(None), |node| compile_node(*node)),
        FieldValue::Sequence(items) => match spec.shape {
            FieldShape::Block { required } => compile_block(items, required),
            _ => Ok(compile_elements(items)?.into_slot(None)),
        },
        FieldValue::Keywords(keywords) => arguments::compile_keyword_group(false, keywords, None),
    }
}

fn compile_scalar(scalar: Scalar) -> Option<Slot> {
    match Wildcard::of_scalar(&scalar) {
        Some(Wildcard::Single) => Some(Slot::Any),
        Some(Wildcard::Multi) => None,
        None => Some(Slot::Literal(scalar)),
    }
}

/// Compiles a statement block.
///
/// A block holding only `??` must merely be non-empty. The parser rejects
/// an empty required block (`if ?:`), so `Absent` there only guards trees
/// built by hand. An empty optional block (a missing `else`) leaves the
/// candidate's free.
fn compile_block(items: Vec<SyntaxNode>, required: bool) -> Result<Option<Slot>, SyntaxError> {
    if let [only] = items.as_slice()
        && is_multi_marker(only)
    {
        return Ok(Some(Slot::Any));
    }
    let when_empty = required.then_some(Slot::Absent);
    Ok(compile_elements(items)?.into_slot(when_empty))
}

/// List elements compiled around at most one `??` marker.
pub(super) enum Elements {
    /// No elements at all.
    Empty,
    /// Elements without a marker.
    Exact(Vec<Slot>),
    /// Elements before and after the marker.
    Split {
        front: Vec<Slot>,
        back: Vec<Slot>,
    },
}

impl Elements {
    /// Converts to a field slot, using `when_empty` for an empty list.
    pub(super) fn into_slot(self, when_empty: Option<Slot>) -> Option<Slot> {
        match self {
            Self::Empty => when_empty,
            Self::Exact(slots) => Some(Slot::Sequence(slots)),
            Self::Split { front, back } => Some(Slot::SequenceSplit { front, back }),
        }
    }
}

/// Compiles list elements, splitting around a `??` marker.
///
/// # Errors
///
/// Returns a pattern error located at the second marker when a list holds
/// more than one.
pub(super) fn compile_elements(items: Vec<SyntaxNode>) -> Result<Elements, SyntaxError> {
    let mut front = Vec::new();
    let mut back = Vec::new();
    let mut split = false;
    for item in items {
        if is_multi_marker(&item) {
            if split {
                let at = item.position();
                return Err(SyntaxError::pattern_syntax(
                    at.line,
                    at.column,
                    "only one ?? is allowed in each list",
                ));
            }
            split = true;
            continue;
        }
        let slot = compile_element(item)?;
        if split {
            back.push(slot);
        } else {
            front.push(slot);
        }
    }

    Ok(if split {
        Elements::Split { front, back }
    } else if front.is_empty() {
        Elements::Empty
    } else {
        Elements::Exact(front)
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{Pattern, SyntaxError};

    fn dump(pattern: &str) -> String {
        Pattern::compile(pattern).expect("pattern compiles").to_string()
    }

    #[rstest]
    #[case("1/2", "BinOp(left=Constant(value=1), op=Div, right=Constant(value=2))")]
    #[case("?/?", "BinOp(left=Any, op=Div, right=Any)")]
    #[case("a = 1", r#"Assign(targets=[NameOrPath("a")], value=Constant(value=1))"#)]
    #[case("foo", r#"NameOrPath("foo")"#)]
    #[case("?.attr", r#"Attribute(value=Any, attr="attr")"#)]
    #[case("[1, ??, 3]", "List(elts=SequenceSplit(front=[Constant(value=1)], back=[Constant(value=3)]))")]
    fn literal_fragments_generalise(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(dump(pattern), expected);
    }

    #[test]
    fn wildcard_block_collapses_to_any() {
        assert_eq!(
            dump("if True: ??\nelse: ??"),
            "If(test=Constant(value=True), body=Any, orelse=Any)"
        );
        assert_eq!(dump("if True: ??"), "If(test=Constant(value=True), body=Any)");
    }

    #[test]
    fn wildcard_inside_block_splits_it() {
        assert_eq!(
            dump("def foo():\n  ??\n  return a"),
            r#"FunctionDef(name="foo", args=Arguments(args=Absent, vararg=Absent, kwonlyargs=Absent, kwarg=Absent), body=SequenceSplit(front=[], back=[Return(value=NameOrPath("a"))]))"#
        );
    }

    #[rstest]
    #[case("?")]
    #[case("??")]
    #[case("f(??, 1, ??)")]
    #[case("x = 1\ny = 2")]
    #[case("if ?:")]
    fn unsupported_patterns_are_rejected(#[case] pattern: &str) {
        let error = Pattern::compile(pattern).expect_err("pattern should be rejected");
        assert!(matches!(error, SyntaxError::PatternSyntax { .. }), "{error:?}");
    }

    #[test]
    fn second_multi_wildcard_is_located_in_written_text() {
        let error = Pattern::compile("f(??, 1, ??)").expect_err("two markers");
        assert_eq!(
            error,
            SyntaxError::pattern_syntax(1, 10, "only one ?? is allowed in each list")
        );
    }

    #[test]
    fn compilation_is_deterministic() {
        let first = Pattern::compile("def ?(a, ??): ??").expect("compile");
        let second = Pattern::compile("def ?(a, ??): ??").expect("compile");
        assert_eq!(first, second);
    }
}
