//! Wildcard placeholder helpers shared by the compiler and error reporting.
//!
//! Patterns use `?` (one element) and `??` (any number of elements). Neither
//! is valid Python, so both are replaced by reserved identifiers before the
//! pattern text reaches the parser.

use crate::error::SyntaxError;
use crate::tree::{NodeKind, Scalar, SyntaxNode};

/// Placeholder identifier standing in for `?`.
pub(crate) const WILDCARD: &str = "__astsearch_wildcard";
/// Placeholder identifier standing in for `??`.
pub(crate) const MULTI_WILDCARD: &str = "__astsearch_multi_wildcard";

/// The wildcard an identifier stands for, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wildcard {
    /// `?`
    Single,
    /// `??`
    Multi,
}

impl Wildcard {
    pub(crate) fn of_identifier(text: &str) -> Option<Self> {
        match text {
            WILDCARD => Some(Self::Single),
            MULTI_WILDCARD => Some(Self::Multi),
            _ => None,
        }
    }

    pub(crate) fn of_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_identifier().and_then(Self::of_identifier)
    }
}

/// Replaces `??` and then `?` with their placeholder identifiers.
#[must_use]
pub(crate) fn substitute(pattern: &str) -> String {
    pattern.replace("??", MULTI_WILDCARD).replace('?', WILDCARD)
}

/// Whether `node` is a `??` standing alone as a list element.
///
/// The marker takes the shape of its context: a bare name in expression
/// lists, an expression statement in blocks, a parameter in parameter lists
/// (with or without a default) and an alias in import lists.
pub(crate) fn is_multi_marker(node: &SyntaxNode) -> bool {
    let is_multi = |scalar: Option<&Scalar>| {
        scalar.and_then(Wildcard::of_scalar) == Some(Wildcard::Multi)
    };
    match node.kind() {
        NodeKind::Name => is_multi(node.scalar("id")),
        NodeKind::Expr => node.child("value").is_some_and(is_multi_marker),
        NodeKind::Arg => is_multi(node.scalar("arg")) && node.child("annotation").is_none(),
        NodeKind::Alias => is_multi(node.scalar("name")) && node.scalar("asname").is_none(),
        _ => false,
    }
}

/// Maps a position in substituted pattern text back to the text the user
/// wrote.
#[must_use]
pub(crate) fn restore_position(substituted: &str, line: u32, column: u32) -> (u32, u32) {
    let Some(text) = usize::try_from(line.saturating_sub(1))
        .ok()
        .and_then(|index| substituted.lines().nth(index))
    else {
        return (line, column);
    };
    let end = usize::try_from(column.saturating_sub(1)).unwrap_or(usize::MAX);
    let prefix = text.get(..end).unwrap_or(text);

    let multi = prefix.matches(MULTI_WILDCARD).count();
    let single = prefix.replace(MULTI_WILDCARD, "").matches(WILDCARD).count();
    let extra_bytes = multi
        .saturating_mul(MULTI_WILDCARD.len().saturating_sub(2))
        .saturating_add(single.saturating_mul(WILDCARD.len().saturating_sub(1)));
    let shrink = u32::try_from(extra_bytes).unwrap_or(u32::MAX);
    (line, column.saturating_sub(shrink).max(1))
}

/// Rewrites a pattern error's position in terms of the original pattern.
#[must_use]
pub(crate) fn restore_error(error: SyntaxError, substituted: &str) -> SyntaxError {
    match error {
        SyntaxError::PatternSyntax {
            line,
            column,
            message,
        } => {
            let (restored_line, restored_column) = restore_position(substituted, line, column);
            SyntaxError::pattern_syntax(restored_line, restored_column, message)
        }
        other => other,
    }
}
