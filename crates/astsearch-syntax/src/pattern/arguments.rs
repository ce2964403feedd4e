//! Argument and parameter list rules.
//!
//! Calls, class bases and parameter lists group their elements (positional,
//! keyword, variadic) and a wildcard in one group can free the groups after
//! it, so these rules see the whole list at once instead of one field at a
//! time.

use super::compile::{Elements, compile_element, compile_elements, compile_field, compile_node};
use super::wildcards::{Wildcard, is_multi_marker};
use super::{KeyMatch, KeywordSlot, PatternNode, Slot};
use crate::error::SyntaxError;
use crate::tree::{FieldValue, Keyword, NodeKind, SyntaxNode};

/// Compiles a node with a positional list and a `keywords` field: a call, or
/// a class definition's bases.
///
/// - `??` as the last positional element frees the keywords; elsewhere it
///   splits the positional list;
/// - a `??=??` keyword is dropped and turns the rest into a subset test;
/// - an empty group compiles to `when_empty`.
pub(super) fn compile_call_like(
    node: SyntaxNode,
    positional_field: &str,
    when_empty: Option<Slot>,
) -> Result<Slot, SyntaxError> {
    let kind = node.kind();
    let mut slots = Vec::new();
    let mut positional = None;
    let mut keywords = None;
    for (index, (spec, value)) in node.into_fields().enumerate() {
        match value {
            FieldValue::Sequence(items) if spec.name == positional_field => {
                positional = Some((index, items));
                slots.push(None);
            }
            FieldValue::Keywords(items) => {
                keywords = Some((index, items));
                slots.push(None);
            }
            other => slots.push(compile_field(spec, other)?),
        }
    }

    let keywords_are_subset = positional
        .as_ref()
        .is_some_and(|(_, items)| items.last().is_some_and(is_multi_marker));
    if let Some((index, items)) = positional
        && let Some(slot) = slots.get_mut(index)
    {
        *slot = compile_elements(items)?.into_slot(when_empty.clone());
    }
    if let Some((index, items)) = keywords
        && let Some(slot) = slots.get_mut(index)
    {
        *slot = compile_keyword_group(keywords_are_subset, items, when_empty)?;
    }
    Ok(Slot::Node(Box::new(PatternNode::new(kind, slots))))
}

/// Compiles a keyword list.
///
/// In subset mode, or when a `??=??` keyword is present, the explicit
/// keywords must each appear and others are ignored; with no explicit
/// keywords left the field is unconstrained. Otherwise the keywords must
/// match exactly, and an empty list compiles to `when_empty`.
pub(super) fn compile_keyword_group(
    mut subset: bool,
    keywords: Vec<Keyword>,
    when_empty: Option<Slot>,
) -> Result<Option<Slot>, SyntaxError> {
    let mut explicit = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let key_wildcard = keyword.key.as_deref().and_then(Wildcard::of_identifier);
        if key_wildcard == Some(Wildcard::Multi) {
            subset = true;
            continue;
        }
        explicit.push(compile_keyword(keyword)?);
    }

    Ok(if subset {
        (!explicit.is_empty()).then(|| Slot::KeywordSubset(explicit))
    } else if explicit.is_empty() {
        when_empty
    } else {
        Some(Slot::Keywords(explicit))
    })
}

fn compile_keyword(keyword: Keyword) -> Result<KeywordSlot, SyntaxError> {
    let key = match keyword.key {
        None => KeyMatch::Splat,
        Some(name) if Wildcard::of_identifier(&name).is_some() => KeyMatch::Any,
        Some(name) => KeyMatch::Named(name),
    };
    let value = compile_element(keyword.value)?;
    Ok(KeywordSlot { key, value })
}

/// Compiles an `Arguments` node (a `def` or `lambda` parameter list).
///
/// `??` as the last plain parameter frees the variadic, keyword-only and
/// variadic keyword groups. `??` among keyword-only parameters turns them
/// into an unordered subset test and frees the variadic keyword group.
/// `*??` and `**??` free their own group. Any group neither given nor freed
/// must be empty.
pub(super) fn compile_parameters(node: SyntaxNode) -> Result<Slot, SyntaxError> {
    let mut args = Vec::new();
    let mut vararg = None;
    let mut kwonlyargs = Vec::new();
    let mut kwarg = None;
    for (spec, value) in node.into_fields() {
        match (spec.name, value) {
            ("args", FieldValue::Sequence(items)) => args = items,
            ("vararg", FieldValue::Child(child)) => vararg = child,
            ("kwonlyargs", FieldValue::Sequence(items)) => kwonlyargs = items,
            ("kwarg", FieldValue::Child(child)) => kwarg = child,
            _ => {}
        }
    }

    let trailing_wildcard = args.last().is_some_and(is_multi_marker);
    let keyword_only_wildcard = kwonlyargs.iter().any(is_multi_marker);

    let args_slot = compile_elements(args)?.into_slot(Some(Slot::Absent));
    let vararg_slot = compile_variadic(vararg, trailing_wildcard)?;
    let kwonlyargs_slot = if keyword_only_wildcard {
        let required = kwonlyargs
            .into_iter()
            .filter(|arg| !is_multi_marker(arg))
            .map(compile_element)
            .collect::<Result<Vec<_>, _>>()?;
        (!required.is_empty()).then(|| Slot::NodeSubset(required))
    } else {
        let when_empty = (!trailing_wildcard).then_some(Slot::Absent);
        match compile_elements(kwonlyargs)? {
            Elements::Empty => when_empty,
            elements => elements.into_slot(None),
        }
    };
    let kwarg_slot = compile_variadic(kwarg, trailing_wildcard || keyword_only_wildcard)?;

    Ok(Slot::Node(Box::new(PatternNode::new(
        NodeKind::Arguments,
        vec![args_slot, vararg_slot, kwonlyargs_slot, kwarg_slot],
    ))))
}

/// Compiles `*args` or `**kwargs`.
fn compile_variadic(
    arg: Option<Box<SyntaxNode>>,
    freed: bool,
) -> Result<Option<Slot>, SyntaxError> {
    match arg {
        Some(arg) if is_multi_marker(&arg) => Ok(None),
        Some(arg) => compile_node(*arg),
        None if freed => Ok(None),
        None => Ok(Some(Slot::Absent)),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::Pattern;

    fn dump(pattern: &str) -> String {
        Pattern::compile(pattern).expect("pattern compiles").to_string()
    }

    #[rstest]
    #[case("f(??)", r#"Call(func=NameOrPath("f"), args=SequenceSplit(front=[], back=[]))"#)]
    #[case("f()", r#"Call(func=NameOrPath("f"), args=Absent, keywords=Absent)"#)]
    #[case(
        "f(??, 1)",
        r#"Call(func=NameOrPath("f"), args=SequenceSplit(front=[], back=[Constant(value=1)]), keywords=Absent)"#
    )]
    #[case(
        "f(a=1, ??=??)",
        r#"Call(func=NameOrPath("f"), args=Absent, keywords=KeywordSubset([a=Constant(value=1)]))"#
    )]
    #[case(
        "f(1, ??, a=2, **{'b': 3})",
        r#"Call(func=NameOrPath("f"), args=SequenceSplit(front=[Constant(value=1)], back=[]), keywords=KeywordSubset([a=Constant(value=2), **Dict(items=[DictItem(key=Constant(value="b"), value=Constant(value=3))])]))"#
    )]
    #[case("f(?=1)", r#"Call(func=NameOrPath("f"), args=Absent, keywords=[?=Constant(value=1)])"#)]
    fn call_arguments_follow_group_rules(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(dump(pattern), expected);
    }

    #[rstest]
    #[case("def f(??): ??", "args=SequenceSplit(front=[], back=[])")]
    #[case(
        "def f(??, a): ??",
        r#"args=SequenceSplit(front=[], back=[Arg(arg="a")]), vararg=Absent, kwonlyargs=Absent, kwarg=Absent"#
    )]
    #[case("def f(*, a, ??): ??", r#"args=Absent, vararg=Absent, kwonlyargs=NodeSubset([Arg(arg="a")])"#)]
    #[case("def f(*??, **??): ??", "args=Absent, kwonlyargs=Absent")]
    fn parameter_groups_widen_after_wildcards(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(
            dump(pattern),
            format!(r#"FunctionDef(name="f", args=Arguments({expected}), body=Any)"#)
        );
    }
}
