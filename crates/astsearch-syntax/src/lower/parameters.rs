//! Parameter list lowering for `def` and `lambda`.

use tree_sitter::Node;

use super::{Lowerer, first_named_child, named_children};
use crate::position::{Position, position_of};
use crate::tree::{NodeKind, Scalar, SyntaxNode};

/// Parameter groups collected while walking a parameter list.
#[derive(Default)]
struct Groups {
    args: Vec<SyntaxNode>,
    vararg: Option<SyntaxNode>,
    kwonlyargs: Vec<SyntaxNode>,
    kwarg: Option<SyntaxNode>,
    keyword_only: bool,
}

impl Groups {
    fn push_plain(&mut self, arg: SyntaxNode) {
        if self.keyword_only {
            self.kwonlyargs.push(arg);
        } else {
            self.args.push(arg);
        }
    }
}

impl Lowerer<'_> {
    /// Lowers a parameter list into an `Arguments` node.
    ///
    /// Positional-only parameters are folded into `args`. A missing list
    /// (`lambda: x`) yields an `Arguments` node with every group empty, so
    /// functions and lambdas always carry one.
    pub(super) fn parameters(&self, node: Option<Node<'_>>, position: Position) -> SyntaxNode {
        let mut groups = Groups::default();
        for parameter in node.map(named_children).unwrap_or_default() {
            match parameter.kind() {
                "keyword_separator" => groups.keyword_only = true,
                "positional_separator" => {}
                "list_splat_pattern" => {
                    groups.vararg = Some(self.splat_arg(parameter, None));
                    groups.keyword_only = true;
                }
                "dictionary_splat_pattern" => groups.kwarg = Some(self.splat_arg(parameter, None)),
                "typed_parameter" => self.typed_parameter(parameter, &mut groups),
                "default_parameter" | "typed_default_parameter" => {
                    let with_default = arg(parameter, self.identifier_field(parameter, "name"))
                        .with_child("annotation", self.field(parameter, "type"))
                        .with_child("default", self.field(parameter, "value"));
                    groups.push_plain(with_default);
                }
                _ => {
                    let name = Scalar::identifier(self.text(parameter));
                    groups.push_plain(arg(parameter, Some(name)));
                }
            }
        }

        SyntaxNode::new(NodeKind::Arguments, node.map_or(position, position_of))
            .with_sequence("args", groups.args)
            .with_child("vararg", groups.vararg)
            .with_sequence("kwonlyargs", groups.kwonlyargs)
            .with_child("kwarg", groups.kwarg)
    }

    /// `name: annotation`, where the name may itself be `*args` or
    /// `**kwargs`.
    fn typed_parameter(&self, parameter: Node<'_>, groups: &mut Groups) {
        let annotation = self.field(parameter, "type");
        match first_named_child(parameter) {
            Some(splat) if splat.kind() == "list_splat_pattern" => {
                groups.vararg = Some(self.splat_arg(splat, annotation));
                groups.keyword_only = true;
            }
            Some(splat) if splat.kind() == "dictionary_splat_pattern" => {
                groups.kwarg = Some(self.splat_arg(splat, annotation));
            }
            plain => {
                let name = plain.map(|ident| Scalar::identifier(self.text(ident)));
                groups.push_plain(arg(parameter, name).with_child("annotation", annotation));
            }
        }
    }

    fn splat_arg(&self, splat: Node<'_>, annotation: Option<SyntaxNode>) -> SyntaxNode {
        let name = first_named_child(splat).map(|ident| Scalar::identifier(self.text(ident)));
        arg(splat, name).with_child("annotation", annotation)
    }
}

fn arg(node: Node<'_>, name: Option<Scalar>) -> SyntaxNode {
    SyntaxNode::new(NodeKind::Arg, position_of(node)).with_scalar("arg", name)
}
