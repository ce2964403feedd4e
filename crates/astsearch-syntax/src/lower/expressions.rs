//! Expression lowering.

use tree_sitter::Node;

use super::literals::{StringLiteral, number_scalar, parse_string};
use super::{Lowerer, children_of_kind, field_children, first_named_child, has_token, named_children};
use crate::position::position_of;
use crate::tree::{NodeKind, Operator, Scalar, SyntaxNode};

impl Lowerer<'_> {
    /// Lowers an expression; unknown constructs become `Other` nodes.
    pub(super) fn expression(&self, node: Node<'_>) -> SyntaxNode {
        let position = position_of(node);
        match node.kind() {
            "identifier" | "keyword_identifier" => SyntaxNode::new(NodeKind::Name, position)
                .with_scalar("id", Some(Scalar::identifier(self.text(node)))),
            "integer" | "float" => self.constant(node, number_scalar(self.text(node))),
            "true" => self.constant(node, Scalar::Bool(true)),
            "false" => self.constant(node, Scalar::Bool(false)),
            "none" => self.constant(node, Scalar::None),
            "ellipsis" => self.constant(node, Scalar::Ellipsis),
            "string" | "concatenated_string" => self.string(node),
            "parenthesized_expression" | "parenthesized_list_splat" | "type"
            | "as_pattern_target" => first_named_child(node)
                .map_or_else(|| self.other(node), |inner| self.node(inner)),
            "attribute" => SyntaxNode::new(NodeKind::Attribute, position)
                .with_child("value", self.field(node, "object"))
                .with_scalar("attr", self.identifier_field(node, "attribute")),
            "subscript" => SyntaxNode::new(NodeKind::Subscript, position)
                .with_child("value", self.field(node, "value"))
                .with_child("slice", self.expressions(&field_children(node, "subscript"))),
            "slice" => self.slice(node),
            "call" => self.call(node),
            "binary_operator" => {
                let op = node
                    .child_by_field_name("operator")
                    .and_then(|op| Operator::binary(op.kind()));
                SyntaxNode::new(NodeKind::BinOp, position)
                    .with_child("left", self.field(node, "left"))
                    .with_scalar("op", op.map(Scalar::Operator))
                    .with_child("right", self.field(node, "right"))
            }
            "unary_operator" => {
                let op = node
                    .child_by_field_name("operator")
                    .and_then(|op| Operator::unary(op.kind()));
                SyntaxNode::new(NodeKind::UnaryOp, position)
                    .with_scalar("op", op.map(Scalar::Operator))
                    .with_child("operand", self.field(node, "argument"))
            }
            "not_operator" => SyntaxNode::new(NodeKind::UnaryOp, position)
                .with_scalar("op", Some(Scalar::Operator(Operator::Not)))
                .with_child("operand", self.field(node, "argument")),
            "boolean_operator" => self.boolean_operator(node),
            "comparison_operator" => self.comparison(node),
            "conditional_expression" => {
                let mut parts = named_children(node).into_iter().map(|part| self.node(part));
                let body = parts.next();
                let test = parts.next();
                SyntaxNode::new(NodeKind::IfExp, position)
                    .with_child("test", test)
                    .with_child("body", body)
                    .with_child("orelse", parts.next())
            }
            "named_expression" => SyntaxNode::new(NodeKind::NamedExpr, position)
                .with_child("target", self.field(node, "name"))
                .with_child("value", self.field(node, "value")),
            "lambda" => SyntaxNode::new(NodeKind::Lambda, position)
                .with_child(
                    "args",
                    Some(self.parameters(node.child_by_field_name("parameters"), position)),
                )
                .with_child("body", self.field(node, "body")),
            "await" => SyntaxNode::new(NodeKind::Await, position)
                .with_child("value", first_named_child(node).map(|value| self.node(value))),
            "yield" => {
                let kind = if has_token(node, "from") {
                    NodeKind::YieldFrom
                } else {
                    NodeKind::Yield
                };
                SyntaxNode::new(kind, position)
                    .with_child("value", self.expressions(&named_children(node)))
            }
            "list" | "list_pattern" => self.elements(node, NodeKind::List),
            "tuple" | "tuple_pattern" | "expression_list" | "pattern_list" => {
                self.elements(node, NodeKind::Tuple)
            }
            "set" => self.elements(node, NodeKind::Set),
            "dictionary" => self.dictionary(node),
            "list_comprehension" => self.comprehension(node, NodeKind::ListComp),
            "set_comprehension" => self.comprehension(node, NodeKind::SetComp),
            "generator_expression" => self.comprehension(node, NodeKind::GeneratorExp),
            "dictionary_comprehension" => {
                let pair = node.child_by_field_name("body");
                SyntaxNode::new(NodeKind::DictComp, position)
                    .with_child("key", pair.and_then(|pair| self.field(pair, "key")))
                    .with_child("value", pair.and_then(|pair| self.field(pair, "value")))
                    .with_sequence("generators", self.generators(node))
            }
            "list_splat" | "list_splat_pattern" => SyntaxNode::new(NodeKind::Starred, position)
                .with_child("value", first_named_child(node).map(|value| self.node(value))),
            "dictionary_splat" | "dictionary_splat_pattern" => {
                SyntaxNode::new(NodeKind::DoubleStarred, position)
                    .with_child("value", first_named_child(node).map(|value| self.node(value)))
            }
            _ => self.other(node),
        }
    }

    fn constant(&self, node: Node<'_>, value: Scalar) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Constant, position_of(node)).with_scalar("value", Some(value))
    }

    fn string(&self, node: Node<'_>) -> SyntaxNode {
        let parts = if node.kind() == "concatenated_string" {
            children_of_kind(node, "string")
        } else {
            vec![node]
        };

        let mut text = String::new();
        let mut bytes = Vec::new();
        let mut is_bytes = false;
        for part in parts {
            match parse_string(self.text(part)) {
                StringLiteral::Str(value) => text.push_str(&value),
                StringLiteral::Bytes(value) => {
                    is_bytes = true;
                    bytes.extend(value);
                }
                StringLiteral::Formatted => {
                    return SyntaxNode::new(NodeKind::JoinedStr, position_of(node)).with_scalar(
                        "value",
                        Some(Scalar::Syntax(self.text(node).to_owned())),
                    );
                }
            }
        }

        if is_bytes {
            self.constant(node, Scalar::Bytes(bytes))
        } else {
            self.constant(node, Scalar::Str(text))
        }
    }

    fn slice(&self, node: Node<'_>) -> SyntaxNode {
        let mut bounds: [Option<SyntaxNode>; 3] = [None, None, None];
        let mut section = 0_usize;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if !child.is_named() && child.kind() == ":" {
                section = section.saturating_add(1);
            } else if child.is_named() && child.kind() != "comment" {
                if let Some(bound) = bounds.get_mut(section) {
                    *bound = Some(self.node(child));
                }
            }
        }
        let [lower, upper, step] = bounds;
        SyntaxNode::new(NodeKind::Slice, position_of(node))
            .with_child("lower", lower)
            .with_child("upper", upper)
            .with_child("step", step)
    }

    fn call(&self, node: Node<'_>) -> SyntaxNode {
        let mut args = Vec::new();
        let mut keywords = Vec::new();
        match node.child_by_field_name("arguments") {
            Some(generator) if generator.kind() == "generator_expression" => {
                args.push(self.node(generator));
            }
            Some(arguments) => self.arguments(arguments, &mut args, &mut keywords),
            None => {}
        }
        SyntaxNode::new(NodeKind::Call, position_of(node))
            .with_child("func", self.field(node, "function"))
            .with_sequence("args", args)
            .with_keywords("keywords", keywords)
    }

    /// Flattens `a and b and c` into one `BoolOp` with three values.
    ///
    /// Parenthesised operands stay nested, as they are separate groups.
    fn boolean_operator(&self, node: Node<'_>) -> SyntaxNode {
        let op_token = node.child_by_field_name("operator").map(|op| op.kind());
        let mut operands = Vec::new();
        let mut current = node;
        loop {
            operands.extend(current.child_by_field_name("right"));
            match current.child_by_field_name("left") {
                Some(left)
                    if left.kind() == "boolean_operator"
                        && left.child_by_field_name("operator").map(|op| op.kind()) == op_token =>
                {
                    current = left;
                }
                left => {
                    operands.extend(left);
                    break;
                }
            }
        }
        let values = operands.into_iter().rev().map(|operand| self.node(operand)).collect();
        SyntaxNode::new(NodeKind::BoolOp, position_of(node))
            .with_scalar("op", op_token.and_then(Operator::boolean).map(Scalar::Operator))
            .with_sequence("values", values)
    }

    /// Lowers a comparison chain.
    ///
    /// Operators are read from the anonymous tokens between operands, so
    /// two-word operators arrive either as one token or as two.
    fn comparison(&self, node: Node<'_>) -> SyntaxNode {
        let mut operands = Vec::new();
        let mut ops = Vec::new();
        let mut pending = String::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "comment" {
                continue;
            }
            if child.is_named() {
                if let Some(op) = Operator::comparison(&pending) {
                    ops.push(op);
                }
                pending.clear();
                operands.push(self.node(child));
            } else {
                if !pending.is_empty() {
                    pending.push(' ');
                }
                pending.push_str(child.kind());
            }
        }

        let mut operands = operands.into_iter();
        SyntaxNode::new(NodeKind::Compare, position_of(node))
            .with_child("left", operands.next())
            .with_scalar("ops", Some(Scalar::Operators(ops)))
            .with_sequence("comparators", operands.collect())
    }

    fn elements(&self, node: Node<'_>, kind: NodeKind) -> SyntaxNode {
        SyntaxNode::new(kind, position_of(node)).with_sequence("elts", self.block(node))
    }

    fn dictionary(&self, node: Node<'_>) -> SyntaxNode {
        let items = named_children(node)
            .into_iter()
            .map(|item| {
                if item.kind() == "pair" {
                    SyntaxNode::new(NodeKind::DictItem, position_of(item))
                        .with_child("key", self.field(item, "key"))
                        .with_child("value", self.field(item, "value"))
                } else {
                    self.node(item)
                }
            })
            .collect();
        SyntaxNode::new(NodeKind::Dict, position_of(node)).with_sequence("items", items)
    }

    fn comprehension(&self, node: Node<'_>, kind: NodeKind) -> SyntaxNode {
        SyntaxNode::new(kind, position_of(node))
            .with_child("elt", self.field(node, "body"))
            .with_sequence("generators", self.generators(node))
    }

    /// Groups `for` clauses with the `if` clauses that follow them.
    fn generators(&self, node: Node<'_>) -> Vec<SyntaxNode> {
        let mut clauses: Vec<(Node<'_>, Vec<SyntaxNode>)> = Vec::new();
        for clause in named_children(node) {
            match clause.kind() {
                "for_in_clause" => clauses.push((clause, Vec::new())),
                "if_clause" => {
                    if let (Some((_, ifs)), Some(test)) = (clauses.last_mut(), first_named_child(clause)) {
                        ifs.push(self.node(test));
                    }
                }
                _ => {}
            }
        }

        clauses
            .into_iter()
            .map(|(clause, ifs)| {
                SyntaxNode::new(NodeKind::Comprehension, position_of(clause))
                    .with_child("target", self.field(clause, "left"))
                    .with_child("iter", self.expressions(&field_children(clause, "right")))
                    .with_sequence("ifs", ifs)
                    .with_scalar("is_async", Some(Scalar::Bool(has_token(clause, "async"))))
            })
            .collect()
    }
}
