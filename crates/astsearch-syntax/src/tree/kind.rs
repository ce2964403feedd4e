//! Node kinds and their static field tables.
//!
//! Every [`NodeKind`] owns a fixed, ordered list of named fields. The table is
//! the single source of truth for which fields a node carries and what shape
//! each field's value has, so the compiler and matcher never inspect nodes for
//! fields at runtime.

use std::fmt;

/// The shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldShape {
    /// A scalar (identifier, literal value or operator tag), possibly absent.
    Scalar,
    /// An optional child node.
    Child,
    /// An ordered sequence of child nodes.
    Sequence,
    /// An ordered sequence of statements.
    ///
    /// `required` blocks are never empty in valid source (function bodies,
    /// loop bodies); optional blocks (`else`, `finally`) often are.
    Block {
        /// Whether valid source always populates this block.
        required: bool,
    },
    /// An ordered sequence of key/value pairs (call keyword arguments).
    Keywords,
}

/// A named field in a node kind's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Field name, following Python's `ast` module where one exists.
    pub name: &'static str,
    /// Shape of the field's value.
    pub shape: FieldShape,
}

const fn scalar(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        shape: FieldShape::Scalar,
    }
}

const fn child(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        shape: FieldShape::Child,
    }
}

const fn sequence(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        shape: FieldShape::Sequence,
    }
}

const fn body(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        shape: FieldShape::Block { required: true },
    }
}

const fn optional_block(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        shape: FieldShape::Block { required: false },
    }
}

const fn keywords(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        shape: FieldShape::Keywords,
    }
}

const MODULE: &[FieldSpec] = &[optional_block("body")];
const FUNCTION_DEF: &[FieldSpec] = &[
    scalar("name"),
    child("args"),
    body("body"),
    sequence("decorator_list"),
    child("returns"),
];
const CLASS_DEF: &[FieldSpec] = &[
    scalar("name"),
    sequence("bases"),
    keywords("keywords"),
    body("body"),
    sequence("decorator_list"),
];
const VALUE: &[FieldSpec] = &[child("value")];
const TARGETS: &[FieldSpec] = &[sequence("targets")];
const ASSIGN: &[FieldSpec] = &[sequence("targets"), child("value")];
const AUG_ASSIGN: &[FieldSpec] = &[child("target"), scalar("op"), child("value")];
const ANN_ASSIGN: &[FieldSpec] = &[child("target"), child("annotation"), child("value")];
const FOR: &[FieldSpec] = &[
    child("target"),
    child("iter"),
    body("body"),
    optional_block("orelse"),
];
const CONDITIONAL_BLOCK: &[FieldSpec] = &[child("test"), body("body"), optional_block("orelse")];
const WITH: &[FieldSpec] = &[sequence("items"), body("body")];
const WITH_ITEM: &[FieldSpec] = &[child("context_expr"), child("optional_vars")];
const RAISE: &[FieldSpec] = &[child("exc"), child("cause")];
const TRY: &[FieldSpec] = &[
    body("body"),
    sequence("handlers"),
    optional_block("orelse"),
    optional_block("finalbody"),
];
const EXCEPT_HANDLER: &[FieldSpec] = &[child("type"), scalar("name"), body("body")];
const ASSERT: &[FieldSpec] = &[child("test"), child("msg")];
const IMPORT: &[FieldSpec] = &[sequence("names")];
const IMPORT_FROM: &[FieldSpec] = &[scalar("module"), sequence("names"), scalar("level")];
const ALIAS: &[FieldSpec] = &[scalar("name"), scalar("asname")];
const NAMES: &[FieldSpec] = &[sequence("names")];
const NONE: &[FieldSpec] = &[];
const BOOL_OP: &[FieldSpec] = &[scalar("op"), sequence("values")];
const NAMED_EXPR: &[FieldSpec] = &[child("target"), child("value")];
const BIN_OP: &[FieldSpec] = &[child("left"), scalar("op"), child("right")];
const UNARY_OP: &[FieldSpec] = &[scalar("op"), child("operand")];
const LAMBDA: &[FieldSpec] = &[child("args"), child("body")];
const IF_EXP: &[FieldSpec] = &[child("test"), child("body"), child("orelse")];
const DICT: &[FieldSpec] = &[sequence("items")];
const DICT_ITEM: &[FieldSpec] = &[child("key"), child("value")];
const ELTS: &[FieldSpec] = &[sequence("elts")];
const COMPREHENSION_EXPR: &[FieldSpec] = &[child("elt"), sequence("generators")];
const DICT_COMP: &[FieldSpec] = &[child("key"), child("value"), sequence("generators")];
const COMPREHENSION: &[FieldSpec] = &[
    child("target"),
    child("iter"),
    sequence("ifs"),
    scalar("is_async"),
];
const COMPARE: &[FieldSpec] = &[child("left"), scalar("ops"), sequence("comparators")];
const CALL: &[FieldSpec] = &[child("func"), sequence("args"), keywords("keywords")];
const LITERAL: &[FieldSpec] = &[scalar("value")];
const ATTRIBUTE: &[FieldSpec] = &[child("value"), scalar("attr")];
const SUBSCRIPT: &[FieldSpec] = &[child("value"), child("slice")];
const NAME: &[FieldSpec] = &[scalar("id")];
const SLICE: &[FieldSpec] = &[child("lower"), child("upper"), child("step")];
const ARGUMENTS: &[FieldSpec] = &[
    sequence("args"),
    child("vararg"),
    sequence("kwonlyargs"),
    child("kwarg"),
];
const ARG: &[FieldSpec] = &[scalar("arg"), child("annotation"), child("default")];
const OTHER: &[FieldSpec] = &[scalar("syntax"), sequence("children")];

macro_rules! node_kinds {
    ($($(#[$doc:meta])* $kind:ident => $table:ident,)+) => {
        /// The closed set of syntax node kinds.
        ///
        /// Kinds follow Python's `ast` module closely; [`NodeKind::Other`]
        /// holds any construct the lowering does not model explicitly.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $($(#[$doc])* $kind,)+
        }

        impl NodeKind {
            /// Returns the ordered field table for this kind.
            #[must_use]
            pub const fn fields(self) -> &'static [FieldSpec] {
                match self {
                    $(Self::$kind => $table,)+
                }
            }

            /// Returns the kind's name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$kind => stringify!($kind),)+
                }
            }
        }
    };
}

node_kinds! {
    /// A whole source file.
    Module => MODULE,
    /// `def` statement.
    FunctionDef => FUNCTION_DEF,
    /// `async def` statement.
    AsyncFunctionDef => FUNCTION_DEF,
    /// `class` statement.
    ClassDef => CLASS_DEF,
    /// `return` statement.
    Return => VALUE,
    /// `del` statement.
    Delete => TARGETS,
    /// Plain (possibly chained) assignment.
    Assign => ASSIGN,
    /// Augmented assignment such as `x += 1`.
    AugAssign => AUG_ASSIGN,
    /// Annotated assignment such as `x: int = 1`.
    AnnAssign => ANN_ASSIGN,
    /// `for` loop.
    For => FOR,
    /// `async for` loop.
    AsyncFor => FOR,
    /// `while` loop.
    While => CONDITIONAL_BLOCK,
    /// `if` statement; `elif` chains nest in `orelse`.
    If => CONDITIONAL_BLOCK,
    /// `with` statement.
    With => WITH,
    /// `async with` statement.
    AsyncWith => WITH,
    /// One context manager of a `with` statement.
    WithItem => WITH_ITEM,
    /// `raise` statement.
    Raise => RAISE,
    /// `try` statement.
    Try => TRY,
    /// `except` clause of a `try` statement.
    ExceptHandler => EXCEPT_HANDLER,
    /// `assert` statement.
    Assert => ASSERT,
    /// `import` statement.
    Import => IMPORT,
    /// `from ... import` statement.
    ImportFrom => IMPORT_FROM,
    /// One imported name, optionally renamed.
    Alias => ALIAS,
    /// `global` statement.
    Global => NAMES,
    /// `nonlocal` statement.
    Nonlocal => NAMES,
    /// Expression used as a statement.
    Expr => VALUE,
    /// `pass` statement.
    Pass => NONE,
    /// `break` statement.
    Break => NONE,
    /// `continue` statement.
    Continue => NONE,
    /// Chain of `and` or `or` operands.
    BoolOp => BOOL_OP,
    /// Assignment expression (`:=`).
    NamedExpr => NAMED_EXPR,
    /// Binary arithmetic or bitwise operation.
    BinOp => BIN_OP,
    /// Unary operation, including `not`.
    UnaryOp => UNARY_OP,
    /// `lambda` expression.
    Lambda => LAMBDA,
    /// Conditional expression `a if b else c`.
    IfExp => IF_EXP,
    /// Dictionary display.
    Dict => DICT,
    /// One `key: value` entry of a dictionary display.
    DictItem => DICT_ITEM,
    /// Set display.
    Set => ELTS,
    /// List comprehension.
    ListComp => COMPREHENSION_EXPR,
    /// Set comprehension.
    SetComp => COMPREHENSION_EXPR,
    /// Dictionary comprehension.
    DictComp => DICT_COMP,
    /// Generator expression.
    GeneratorExp => COMPREHENSION_EXPR,
    /// One `for ... in ... if ...` clause of a comprehension.
    Comprehension => COMPREHENSION,
    /// `await` expression.
    Await => VALUE,
    /// `yield` expression.
    Yield => VALUE,
    /// `yield from` expression.
    YieldFrom => VALUE,
    /// Comparison chain.
    Compare => COMPARE,
    /// Function call.
    Call => CALL,
    /// Formatted string literal, kept as raw text.
    JoinedStr => LITERAL,
    /// Literal constant.
    Constant => LITERAL,
    /// Attribute access `value.attr`.
    Attribute => ATTRIBUTE,
    /// Subscript `value[slice]`.
    Subscript => SUBSCRIPT,
    /// Starred expression `*value`.
    Starred => VALUE,
    /// Double-starred expression `**value` inside a dictionary display.
    DoubleStarred => VALUE,
    /// Identifier reference.
    Name => NAME,
    /// List display.
    List => ELTS,
    /// Tuple display.
    Tuple => ELTS,
    /// Slice `lower:upper:step`.
    Slice => SLICE,
    /// Parameter list of a function or lambda.
    Arguments => ARGUMENTS,
    /// One parameter, with its annotation and default.
    Arg => ARG,
    /// Any construct without a dedicated kind.
    Other => OTHER,
}

impl NodeKind {
    /// Returns the index of the named field in this kind's table.
    #[must_use]
    pub fn field_index(self, name: &str) -> Option<usize> {
        self.fields().iter().position(|spec| spec.name == name)
    }

    /// Returns the spec of the named field.
    #[must_use]
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.name == name)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
