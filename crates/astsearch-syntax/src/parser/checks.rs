//! Python syntax rules the Tree-sitter grammar does not enforce.
//!
//! The grammar is deliberately permissive: it accepts an empty block after
//! a colon, positional arguments after keyword arguments, and parameters
//! without defaults after ones with defaults. Python rejects all three.

use tree_sitter::Node;

const EMPTY_BLOCK: &str = "expected an indented block";
const POSITIONAL_AFTER_KEYWORD: &str = "positional argument follows keyword argument";
const REQUIRED_AFTER_DEFAULT: &str = "parameter without a default follows parameter with a default";

/// Compound statements and the field holding their body.
const BODY_FIELDS: &[(&str, &str)] = &[
    ("if_statement", "consequence"),
    ("elif_clause", "consequence"),
    ("else_clause", "body"),
    ("while_statement", "body"),
    ("for_statement", "body"),
    ("with_statement", "body"),
    ("try_statement", "body"),
    ("function_definition", "body"),
    ("class_definition", "body"),
];

/// Returns the offending node and message for every rule violation, in
/// pre-order.
pub(super) fn violations(root: Node<'_>) -> Vec<(Node<'_>, &'static str)> {
    let mut found = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let Some(violation) = check(node) {
            found.push(violation);
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    found
}

fn check(node: Node<'_>) -> Option<(Node<'_>, &'static str)> {
    match node.kind() {
        "block" => is_empty_block(node).then_some((node, EMPTY_BLOCK)),
        "argument_list" => {
            positional_after_keyword(node).map(|argument| (argument, POSITIONAL_AFTER_KEYWORD))
        }
        "parameters" | "lambda_parameters" => {
            required_after_default(node).map(|param| (param, REQUIRED_AFTER_DEFAULT))
        }
        kind => BODY_FIELDS
            .iter()
            .find(|(statement, _)| *statement == kind)
            .filter(|(_, field)| node.child_by_field_name(field).is_none())
            .map(|_| (node, EMPTY_BLOCK)),
    }
}

/// A block with no statements; comments do not count.
fn is_empty_block(block: Node<'_>) -> bool {
    let mut cursor = block.walk();
    block
        .named_children(&mut cursor)
        .all(|child| child.kind() == "comment")
}

/// `*args` may follow a keyword argument; a plain expression may not.
fn positional_after_keyword(arguments: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = arguments.walk();
    let mut seen_keyword = false;
    for argument in arguments.named_children(&mut cursor) {
        match argument.kind() {
            "keyword_argument" | "dictionary_splat" => seen_keyword = true,
            "list_splat" | "comment" => {}
            _ if seen_keyword => return Some(argument),
            _ => {}
        }
    }
    None
}

/// Defaults are only required up to the first `*`, `*args` or `**kwargs`.
fn required_after_default(parameters: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = parameters.walk();
    let mut seen_default = false;
    for parameter in parameters.named_children(&mut cursor) {
        match parameter_kind(parameter) {
            "default_parameter" | "typed_default_parameter" => seen_default = true,
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                return None;
            }
            "identifier" | "typed_parameter" if seen_default => return Some(parameter),
            _ => {}
        }
    }
    None
}

/// The kind of a parameter, looking through `*args: T` annotations.
fn parameter_kind(parameter: Node<'_>) -> &'static str {
    if parameter.kind() == "typed_parameter"
        && let Some(inner) = parameter.named_child(0)
        && matches!(inner.kind(), "list_splat_pattern" | "dictionary_splat_pattern")
    {
        return inner.kind();
    }
    parameter.kind()
}
