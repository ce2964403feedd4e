//! Statement lowering.

use tree_sitter::Node;

use super::{
    Lowerer, children_of_kind, field_children, first_named_child, has_token, named_children,
};
use crate::position::{Position, position_of};
use crate::tree::{Keyword, NodeKind, Operator, Scalar, SyntaxNode};

impl Lowerer<'_> {
    /// Lowers `node` when it is a statement; `None` for anything else.
    pub(super) fn statement(&self, node: Node<'_>) -> Option<SyntaxNode> {
        let position = position_of(node);
        let lowered = match node.kind() {
            "expression_statement" => self.expression_statement(node),
            "return_statement" => SyntaxNode::new(NodeKind::Return, position)
                .with_child("value", self.expressions(&named_children(node))),
            "delete_statement" => SyntaxNode::new(NodeKind::Delete, position)
                .with_sequence("targets", self.delete_targets(node)),
            "pass_statement" => SyntaxNode::new(NodeKind::Pass, position),
            "break_statement" => SyntaxNode::new(NodeKind::Break, position),
            "continue_statement" => SyntaxNode::new(NodeKind::Continue, position),
            "raise_statement" => self.raise(node),
            "assert_statement" => {
                let mut parts = named_children(node).into_iter().map(|child| self.node(child));
                SyntaxNode::new(NodeKind::Assert, position)
                    .with_child("test", parts.next())
                    .with_child("msg", parts.next())
            }
            "global_statement" => self.name_list(node, NodeKind::Global),
            "nonlocal_statement" => self.name_list(node, NodeKind::Nonlocal),
            "import_statement" => SyntaxNode::new(NodeKind::Import, position)
                .with_sequence("names", self.aliases(node)),
            "import_from_statement" => self.import_from(node),
            "future_import_statement" => SyntaxNode::new(NodeKind::ImportFrom, position)
                .with_scalar("module", Some(Scalar::identifier("__future__")))
                .with_sequence("names", self.aliases(node))
                .with_scalar("level", Some(Scalar::Level(0))),
            "if_statement" => self.if_statement(node),
            "for_statement" => self.for_statement(node),
            "while_statement" => SyntaxNode::new(NodeKind::While, position)
                .with_child("test", self.field(node, "condition"))
                .with_sequence("body", self.block_field(node, "body"))
                .with_sequence("orelse", self.else_block(node)),
            "try_statement" => self.try_statement(node),
            "with_statement" => self.with_statement(node),
            "function_definition" => self.function_definition(node),
            "class_definition" => self.class_definition(node),
            "decorated_definition" => self.decorated_definition(node),
            _ => return None,
        };
        Some(lowered)
    }

    fn expression_statement(&self, node: Node<'_>) -> SyntaxNode {
        let position = position_of(node);
        let children = named_children(node);
        match children.as_slice() {
            [single] if single.kind() == "assignment" => self.assignment(*single, position),
            [single] if single.kind() == "augmented_assignment" => {
                let op = single
                    .child_by_field_name("operator")
                    .and_then(|op| Operator::binary(op.kind()));
                SyntaxNode::new(NodeKind::AugAssign, position)
                    .with_child("target", self.field(*single, "left"))
                    .with_scalar("op", op.map(Scalar::Operator))
                    .with_child("value", self.field(*single, "right"))
            }
            _ => SyntaxNode::new(NodeKind::Expr, position)
                .with_child("value", self.expressions(&children)),
        }
    }

    fn assignment(&self, node: Node<'_>, position: Position) -> SyntaxNode {
        if node.child_by_field_name("type").is_some() {
            return SyntaxNode::new(NodeKind::AnnAssign, position)
                .with_child("target", self.field(node, "left"))
                .with_child("annotation", self.field(node, "type"))
                .with_child("value", self.field(node, "right"));
        }

        let mut targets = Vec::new();
        let mut current = node;
        loop {
            targets.extend(self.field(current, "left"));
            match current.child_by_field_name("right") {
                Some(right)
                    if right.kind() == "assignment" && right.child_by_field_name("type").is_none() =>
                {
                    current = right;
                }
                right => {
                    return SyntaxNode::new(NodeKind::Assign, position)
                        .with_sequence("targets", targets)
                        .with_child("value", right.map(|value| self.node(value)));
                }
            }
        }
    }

    fn delete_targets(&self, node: Node<'_>) -> Vec<SyntaxNode> {
        match first_named_child(node) {
            Some(list) if list.kind() == "expression_list" => self.block(list),
            Some(target) => vec![self.node(target)],
            None => Vec::new(),
        }
    }

    fn raise(&self, node: Node<'_>) -> SyntaxNode {
        let cause = node.child_by_field_name("cause");
        let exc = named_children(node)
            .into_iter()
            .find(|child| cause.is_none_or(|cause| cause.id() != child.id()));
        SyntaxNode::new(NodeKind::Raise, position_of(node))
            .with_child("exc", exc.map(|exc| self.node(exc)))
            .with_child("cause", cause.map(|cause| self.node(cause)))
    }

    fn name_list(&self, node: Node<'_>, kind: NodeKind) -> SyntaxNode {
        SyntaxNode::new(kind, position_of(node)).with_sequence("names", self.block(node))
    }

    fn aliases(&self, node: Node<'_>) -> Vec<SyntaxNode> {
        let mut names: Vec<SyntaxNode> = field_children(node, "name")
            .into_iter()
            .map(|name| self.alias(name))
            .collect();
        names.extend(
            children_of_kind(node, "wildcard_import")
                .into_iter()
                .map(|wildcard| {
                    SyntaxNode::new(NodeKind::Alias, position_of(wildcard))
                        .with_scalar("name", Some(Scalar::identifier("*")))
                }),
        );
        names
    }

    fn alias(&self, node: Node<'_>) -> SyntaxNode {
        let alias = SyntaxNode::new(NodeKind::Alias, position_of(node));
        if node.kind() == "aliased_import" {
            alias
                .with_scalar("name", self.identifier_field(node, "name"))
                .with_scalar("asname", self.identifier_field(node, "alias"))
        } else {
            alias.with_scalar("name", Some(Scalar::identifier(self.text(node))))
        }
    }

    fn import_from(&self, node: Node<'_>) -> SyntaxNode {
        let (module, level) = match node.child_by_field_name("module_name") {
            Some(relative) if relative.kind() == "relative_import" => {
                let level = children_of_kind(relative, "import_prefix")
                    .first()
                    .map_or(0, |prefix| self.text(*prefix).matches('.').count());
                let module = children_of_kind(relative, "dotted_name")
                    .first()
                    .map(|name| Scalar::identifier(self.text(*name)));
                (module, level)
            }
            Some(name) => (Some(Scalar::identifier(self.text(name))), 0),
            None => (None, 0),
        };
        SyntaxNode::new(NodeKind::ImportFrom, position_of(node))
            .with_scalar("module", module)
            .with_sequence("names", self.aliases(node))
            .with_scalar("level", Some(Scalar::Level(level)))
    }

    fn if_statement(&self, node: Node<'_>) -> SyntaxNode {
        let alternatives = field_children(node, "alternative");
        let mut orelse = alternatives
            .iter()
            .find(|alternative| alternative.kind() == "else_clause")
            .map(|clause| self.block_field(*clause, "body"))
            .unwrap_or_default();
        for clause in alternatives
            .iter()
            .rev()
            .filter(|alternative| alternative.kind() == "elif_clause")
        {
            let nested = SyntaxNode::new(NodeKind::If, position_of(*clause))
                .with_child("test", self.field(*clause, "condition"))
                .with_sequence("body", self.block_field(*clause, "consequence"))
                .with_sequence("orelse", orelse);
            orelse = vec![nested];
        }
        SyntaxNode::new(NodeKind::If, position_of(node))
            .with_child("test", self.field(node, "condition"))
            .with_sequence("body", self.block_field(node, "consequence"))
            .with_sequence("orelse", orelse)
    }

    /// The body of an `else` clause stored in the `alternative` field.
    fn else_block(&self, node: Node<'_>) -> Vec<SyntaxNode> {
        node.child_by_field_name("alternative")
            .filter(|clause| clause.kind() == "else_clause")
            .map(|clause| self.block_field(clause, "body"))
            .unwrap_or_default()
    }

    fn for_statement(&self, node: Node<'_>) -> SyntaxNode {
        let kind = if has_token(node, "async") {
            NodeKind::AsyncFor
        } else {
            NodeKind::For
        };
        SyntaxNode::new(kind, position_of(node))
            .with_child("target", self.field(node, "left"))
            .with_child("iter", self.expressions(&field_children(node, "right")))
            .with_sequence("body", self.block_field(node, "body"))
            .with_sequence("orelse", self.else_block(node))
    }

    fn try_statement(&self, node: Node<'_>) -> SyntaxNode {
        let mut handlers = Vec::new();
        let mut orelse = Vec::new();
        let mut finalbody = Vec::new();
        for clause in named_children(node) {
            match clause.kind() {
                "except_clause" | "except_group_clause" => handlers.push(self.except_handler(clause)),
                "else_clause" => orelse = self.block_field(clause, "body"),
                "finally_clause" => {
                    finalbody = children_of_kind(clause, "block")
                        .first()
                        .map(|block| self.block(*block))
                        .unwrap_or_default();
                }
                _ => {}
            }
        }
        SyntaxNode::new(NodeKind::Try, position_of(node))
            .with_sequence("body", self.block_field(node, "body"))
            .with_sequence("handlers", handlers)
            .with_sequence("orelse", orelse)
            .with_sequence("finalbody", finalbody)
    }

    fn except_handler(&self, node: Node<'_>) -> SyntaxNode {
        let mut header = Vec::new();
        let mut body = Vec::new();
        for child in named_children(node) {
            if child.kind() == "block" {
                body = self.block(child);
            } else {
                header.push(child);
            }
        }

        let (exc_type, name) = match header.as_slice() {
            [pattern] if pattern.kind() == "as_pattern" => {
                let alias = pattern
                    .child_by_field_name("alias")
                    .map(|alias| Scalar::identifier(self.text(alias)));
                (first_named_child(*pattern).map(|exc| self.node(exc)), alias)
            }
            [exc_type, name, ..] => (
                Some(self.node(*exc_type)),
                Some(Scalar::identifier(self.text(*name))),
            ),
            [exc_type] => (Some(self.node(*exc_type)), None),
            [] => (None, None),
        };

        SyntaxNode::new(NodeKind::ExceptHandler, position_of(node))
            .with_child("type", exc_type)
            .with_scalar("name", name)
            .with_sequence("body", body)
    }

    fn with_statement(&self, node: Node<'_>) -> SyntaxNode {
        let kind = if has_token(node, "async") {
            NodeKind::AsyncWith
        } else {
            NodeKind::With
        };
        let items = children_of_kind(node, "with_clause")
            .into_iter()
            .flat_map(|clause| children_of_kind(clause, "with_item"))
            .map(|item| self.with_item(item))
            .collect();
        SyntaxNode::new(kind, position_of(node))
            .with_sequence("items", items)
            .with_sequence("body", self.block_field(node, "body"))
    }

    fn with_item(&self, node: Node<'_>) -> SyntaxNode {
        let item = SyntaxNode::new(NodeKind::WithItem, position_of(node));
        match node.child_by_field_name("value") {
            Some(pattern) if pattern.kind() == "as_pattern" => item
                .with_child("context_expr", first_named_child(pattern).map(|expr| self.node(expr)))
                .with_child("optional_vars", self.field(pattern, "alias")),
            value => item.with_child("context_expr", value.map(|expr| self.node(expr))),
        }
    }

    fn function_definition(&self, node: Node<'_>) -> SyntaxNode {
        let kind = if has_token(node, "async") {
            NodeKind::AsyncFunctionDef
        } else {
            NodeKind::FunctionDef
        };
        let position = position_of(node);
        SyntaxNode::new(kind, position)
            .with_scalar("name", self.identifier_field(node, "name"))
            .with_child(
                "args",
                Some(self.parameters(node.child_by_field_name("parameters"), position)),
            )
            .with_sequence("body", self.block_field(node, "body"))
            .with_child("returns", self.field(node, "return_type"))
    }

    fn class_definition(&self, node: Node<'_>) -> SyntaxNode {
        let mut bases = Vec::new();
        let mut keywords = Vec::new();
        if let Some(arguments) = node.child_by_field_name("superclasses") {
            self.arguments(arguments, &mut bases, &mut keywords);
        }
        SyntaxNode::new(NodeKind::ClassDef, position_of(node))
            .with_scalar("name", self.identifier_field(node, "name"))
            .with_sequence("bases", bases)
            .with_keywords("keywords", keywords)
            .with_sequence("body", self.block_field(node, "body"))
    }

    fn decorated_definition(&self, node: Node<'_>) -> SyntaxNode {
        let decorators: Vec<SyntaxNode> = children_of_kind(node, "decorator")
            .into_iter()
            .filter_map(first_named_child)
            .map(|decorator| self.node(decorator))
            .collect();
        match node.child_by_field_name("definition") {
            Some(definition) => self.node(definition).with_sequence("decorator_list", decorators),
            None => self.other(node),
        }
    }

    /// Splits a call-style argument list into positional and keyword
    /// arguments.
    pub(super) fn arguments(
        &self,
        node: Node<'_>,
        positional: &mut Vec<SyntaxNode>,
        keywords: &mut Vec<Keyword>,
    ) {
        for argument in named_children(node) {
            match argument.kind() {
                "keyword_argument" => {
                    let key = argument
                        .child_by_field_name("name")
                        .map(|name| self.text(name).to_owned());
                    if let Some(value) = self.field(argument, "value") {
                        keywords.push(Keyword::new(key, value));
                    }
                }
                "dictionary_splat" => {
                    if let Some(value) = first_named_child(argument) {
                        keywords.push(Keyword::new(None, self.node(value)));
                    }
                }
                _ => positional.push(self.node(argument)),
            }
        }
    }
}
