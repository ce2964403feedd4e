//! Slot-by-slot matching rules.

use crate::pattern::{KeyMatch, KeywordSlot, PatternNode, Slot};
use crate::tree::{FieldValue, Keyword, NodeKind, Scalar, SyntaxNode};

/// Checks the kind, then every constrained field of `node`.
pub(super) fn node_matches(pattern: &PatternNode, node: &SyntaxNode) -> bool {
    if pattern.kind() != node.kind() {
        return false;
    }

    node.fields()
        .zip(pattern.slots())
        .all(|((_, value), constraint)| {
            constraint
                .as_ref()
                .is_none_or(|slot| field_matches(slot, value))
        })
}

/// Checks one field value against its slot.
fn field_matches(slot: &Slot, value: &FieldValue) -> bool {
    match (slot, value) {
        (Slot::Any, _) => !value.is_empty(),
        (Slot::Absent, _) => value.is_empty(),
        (Slot::Literal(expected), FieldValue::Scalar(actual)) => actual.as_ref() == Some(expected),
        (Slot::Node(_) | Slot::NameOrPath(_), FieldValue::Child(child)) => child
            .as_deref()
            .is_some_and(|node| element_matches(slot, node)),
        (Slot::Sequence(slots), FieldValue::Sequence(items)) => {
            slots.len() == items.len() && all_pairs_match(slots, items)
        }
        (Slot::SequenceSplit { front, back }, FieldValue::Sequence(items)) => {
            split_matches(front, back, items)
        }
        (Slot::NodeSubset(required), FieldValue::Sequence(items)) => required
            .iter()
            .all(|slot| items.iter().any(|item| element_matches(slot, item))),
        (Slot::Keywords(slots), FieldValue::Keywords(keywords)) => {
            slots.len() == keywords.len()
                && slots
                    .iter()
                    .zip(keywords)
                    .all(|(slot, keyword)| keyword_matches(slot, keyword))
        }
        (Slot::KeywordSubset(required), FieldValue::Keywords(keywords)) => required
            .iter()
            .all(|slot| keywords.iter().any(|keyword| keyword_matches(slot, keyword))),
        _ => false,
    }
}

/// Checks a node occupying one position: a child field, a sequence element,
/// a keyword value or a scanned candidate.
pub(super) fn element_matches(slot: &Slot, node: &SyntaxNode) -> bool {
    match slot {
        Slot::Any => true,
        Slot::Node(pattern) => node_matches(pattern, node),
        Slot::NameOrPath(name) => name_or_path_matches(name, node),
        _ => false,
    }
}

/// A name matches a `Name` with that id, or an attribute access ending in it.
fn name_or_path_matches(name: &str, node: &SyntaxNode) -> bool {
    let id = match node.kind() {
        NodeKind::Name => node.scalar("id"),
        NodeKind::Attribute => node.scalar("attr"),
        _ => None,
    };
    id.and_then(Scalar::as_identifier) == Some(name)
}

fn all_pairs_match(slots: &[Slot], items: &[SyntaxNode]) -> bool {
    slots
        .iter()
        .zip(items)
        .all(|(slot, item)| element_matches(slot, item))
}

fn split_matches(front: &[Slot], back: &[Slot], items: &[SyntaxNode]) -> bool {
    let Some(back_start) = items.len().checked_sub(back.len()) else {
        return false;
    };
    if back_start < front.len() {
        return false;
    }
    let (Some(head), Some(tail)) = (items.get(..front.len()), items.get(back_start..)) else {
        return false;
    };
    all_pairs_match(front, head) && all_pairs_match(back, tail)
}

fn keyword_matches(slot: &KeywordSlot, keyword: &Keyword) -> bool {
    let key_matches = match (&slot.key, keyword.key.as_deref()) {
        (KeyMatch::Named(expected), Some(actual)) => expected == actual,
        (KeyMatch::Splat, None) | (KeyMatch::Any, Some(_)) => true,
        _ => false,
    };
    key_matches && element_matches(&slot.value, &keyword.value)
}
