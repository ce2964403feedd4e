//! Error types for parsing, pattern compilation and scanning.
//!
//! Pattern errors are fatal to the compile call. Unit errors describe a single
//! source unit that could not be parsed; scanners report them and move on.

use thiserror::Error;

use crate::parser::SyntaxErrorInfo;

/// Errors from syntactic analysis operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser with the Python grammar.
    #[error("failed to initialise Python parser: {message}")]
    ParserInit {
        /// Description of the failure.
        message: String,
    },

    /// Tree-sitter did not produce a syntax tree at all.
    #[error("failed to parse Python source: {message}")]
    Parse {
        /// Description of the failure.
        message: String,
    },

    /// The pattern text does not parse, or places a wildcard where the
    /// compiler cannot honour it.
    #[error("invalid pattern at {line}:{column}: {message}")]
    PatternSyntax {
        /// One-based line of the offending construct.
        line: u32,
        /// One-based column of the offending construct.
        column: u32,
        /// Description of the problem.
        message: String,
    },

    /// A candidate source unit contains syntax errors.
    #[error("syntax error at {line}:{column}: {message} (near {context:?})")]
    UnitSyntax {
        /// One-based line of the first error.
        line: u32,
        /// One-based column of the first error.
        column: u32,
        /// Description reported by the parser.
        message: String,
        /// Source snippet around the first error.
        context: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInit {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates a pattern syntax error located at `line`:`column`.
    #[must_use]
    pub fn pattern_syntax(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self::PatternSyntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates a pattern syntax error from the first parser error.
    #[must_use]
    pub fn pattern_from_info(info: &SyntaxErrorInfo) -> Self {
        Self::pattern_syntax(
            info.line,
            info.column,
            format!("{} near {:?}", info.message, info.context),
        )
    }

    /// Creates a unit syntax error from the first parser error.
    #[must_use]
    pub fn unit_from_info(info: &SyntaxErrorInfo) -> Self {
        Self::UnitSyntax {
            line: info.line,
            column: info.column,
            message: info.message.clone(),
            context: info.context.clone(),
        }
    }

    /// Returns whether the error concerns the pattern rather than a source
    /// unit or the parser itself.
    #[must_use]
    pub const fn is_pattern_error(&self) -> bool {
        matches!(self, Self::PatternSyntax { .. })
    }
}
