//! Scalar field values: identifiers, literal values and operator tags.

use std::fmt;

use super::write_list;

/// Operators carried by `BinOp`, `AugAssign`, `BoolOp`, `UnaryOp` and
/// `Compare` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mult,
    /// `@`
    MatMult,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `<<`
    LShift,
    /// `>>`
    RShift,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `//`
    FloorDiv,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// Unary `~`
    Invert,
    /// Unary `+`
    UAdd,
    /// Unary `-`
    USub,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtE,
    /// `>`
    Gt,
    /// `>=`
    GtE,
    /// `is`
    Is,
    /// `is not`
    IsNot,
    /// `in`
    In,
    /// `not in`
    NotIn,
}

impl Operator {
    /// Maps a binary or augmented-assignment operator token to its tag.
    ///
    /// Augmented tokens such as `+=` map to the same tag as `+`.
    #[must_use]
    pub fn binary(token: &str) -> Option<Self> {
        let op = match token.strip_suffix('=').unwrap_or(token) {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mult,
            "@" => Self::MatMult,
            "/" => Self::Div,
            "%" => Self::Mod,
            "**" => Self::Pow,
            "<<" => Self::LShift,
            ">>" => Self::RShift,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "&" => Self::BitAnd,
            "//" => Self::FloorDiv,
            _ => return None,
        };
        Some(op)
    }

    /// Maps a unary operator token to its tag.
    #[must_use]
    pub fn unary(token: &str) -> Option<Self> {
        match token {
            "not" => Some(Self::Not),
            "~" => Some(Self::Invert),
            "+" => Some(Self::UAdd),
            "-" => Some(Self::USub),
            _ => None,
        }
    }

    /// Maps a boolean operator token to its tag.
    #[must_use]
    pub fn boolean(token: &str) -> Option<Self> {
        match token {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }

    /// Maps a comparison operator to its tag.
    ///
    /// Two-word operators may arrive with arbitrary interior whitespace.
    #[must_use]
    pub fn comparison(token: &str) -> Option<Self> {
        let words: Vec<&str> = token.split_whitespace().collect();
        let op = match words.as_slice() {
            ["=="] => Self::Eq,
            ["!="] | ["<>"] => Self::NotEq,
            ["<"] => Self::Lt,
            ["<="] => Self::LtE,
            [">"] => Self::Gt,
            [">="] => Self::GtE,
            ["is"] => Self::Is,
            ["is", "not"] => Self::IsNot,
            ["in"] => Self::In,
            ["not", "in"] => Self::NotIn,
            _ => return None,
        };
        Some(op)
    }

    /// Returns the operator's tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mult => "Mult",
            Self::MatMult => "MatMult",
            Self::Div => "Div",
            Self::Mod => "Mod",
            Self::Pow => "Pow",
            Self::LShift => "LShift",
            Self::RShift => "RShift",
            Self::BitOr => "BitOr",
            Self::BitXor => "BitXor",
            Self::BitAnd => "BitAnd",
            Self::FloorDiv => "FloorDiv",
            Self::And => "And",
            Self::Or => "Or",
            Self::Not => "Not",
            Self::Invert => "Invert",
            Self::UAdd => "UAdd",
            Self::USub => "USub",
            Self::Eq => "Eq",
            Self::NotEq => "NotEq",
            Self::Lt => "Lt",
            Self::LtE => "LtE",
            Self::Gt => "Gt",
            Self::GtE => "GtE",
            Self::Is => "Is",
            Self::IsNot => "IsNot",
            Self::In => "In",
            Self::NotIn => "NotIn",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar field value.
///
/// Numeric literals are stored in a canonical spelling so that `0x10`, `16`
/// and `1_6` compare equal, as do `1.0` and `1.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// An identifier: a name, attribute, parameter or module path.
    Identifier(String),
    /// An integer literal in canonical decimal form.
    Int(String),
    /// A float literal in canonical form.
    Float(String),
    /// An imaginary literal; the canonical float form of its magnitude.
    Imaginary(String),
    /// A string literal's decoded value.
    Str(String),
    /// A bytes literal's decoded value.
    Bytes(Vec<u8>),
    /// `True` or `False`.
    Bool(bool),
    /// `None`.
    None,
    /// `...`
    Ellipsis,
    /// A single operator tag.
    Operator(Operator),
    /// The operator tags of a comparison chain, in order.
    Operators(Vec<Operator>),
    /// The number of leading dots of a relative import.
    Level(usize),
    /// Raw source text or a grammar kind name, for constructs kept verbatim.
    Syntax(String),
}

impl Scalar {
    /// Returns the identifier text when this scalar is an identifier.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Creates an identifier scalar.
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(text) | Self::Str(text) | Self::Syntax(text) => write!(f, "{text:?}"),
            Self::Int(text) | Self::Float(text) => f.write_str(text),
            Self::Imaginary(text) => write!(f, "{text}j"),
            Self::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::None => f.write_str("None"),
            Self::Ellipsis => f.write_str("Ellipsis"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Operators(ops) => write_list(f, ops.iter()),
            Self::Level(level) => write!(f, "{level}"),
        }
    }
}
