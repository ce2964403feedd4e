//! Python parser facade over Tree-sitter.
//!
//! Tree-sitter recovers from syntax errors, so a [`ParseResult`] can hold a
//! usable CST and ERROR or MISSING nodes at once. The grammar also accepts
//! a few constructs Python rejects (see [`checks`]); those are reported
//! alongside. Lowering treats any reported error as fatal for the unit.

mod checks;

use crate::error::SyntaxError;
use crate::position::point_to_one_based;

/// Longest error context kept verbatim, in characters.
const CONTEXT_LIMIT: usize = 50;

/// A parsed Python CST together with the text it was parsed from.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
}

impl ParseResult {
    /// Returns the source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the root of the CST.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns whether the source has any syntax error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        let root = self.root_node();
        root.has_error() || !checks::violations(root).is_empty()
    }

    /// Returns every syntax error, in source order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let root = self.root_node();
        let mut errors: Vec<SyntaxErrorInfo> = ErrorNodes::new(root)
            .map(|node| SyntaxErrorInfo::from_node(node, &self.source))
            .chain(
                checks::violations(root)
                    .into_iter()
                    .map(|(node, message)| SyntaxErrorInfo::located(node, &self.source, message)),
            )
            .collect();
        errors.sort_by_key(|info| (info.line, info.column));
        errors
    }

    /// Returns the syntax error that starts earliest, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<SyntaxErrorInfo> {
        self.errors().into_iter().next()
    }
}

/// A syntax error located in parsed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// One-based line of the offending node.
    pub line: u32,
    /// One-based column of the offending node.
    pub column: u32,
    /// Source text covered by the node, shortened when long.
    pub context: String,
    /// What went wrong.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "invalid syntax".to_owned()
        };
        Self::located(node, source, message)
    }

    fn located(node: tree_sitter::Node<'_>, source: &str, message: impl Into<String>) -> Self {
        let (line, column) = point_to_one_based(node.start_position());
        Self {
            line,
            column,
            context: source.get(node.byte_range()).map(snippet).unwrap_or_default(),
            message: message.into(),
        }
    }
}

fn snippet(text: &str) -> String {
    if text.chars().count() <= CONTEXT_LIMIT {
        return text.to_owned();
    }
    let kept: String = text.chars().take(CONTEXT_LIMIT.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Pre-order walk over the ERROR and MISSING nodes of a CST.
///
/// Subtrees that Tree-sitter reports as error-free are not entered.
struct ErrorNodes<'t> {
    cursor: tree_sitter::TreeCursor<'t>,
    done: bool,
}

impl<'t> ErrorNodes<'t> {
    fn new(root: tree_sitter::Node<'t>) -> Self {
        Self {
            cursor: root.walk(),
            done: !root.has_error(),
        }
    }

    /// Moves to the next node in pre-order, skipping error-free subtrees.
    fn advance(&mut self) {
        let node = self.cursor.node();
        if node.has_error() && !node.is_missing() && self.cursor.goto_first_child() {
            return;
        }
        loop {
            if self.cursor.goto_next_sibling() {
                if self.cursor.node().has_error() {
                    return;
                }
                continue;
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return;
            }
        }
    }
}

impl<'t> Iterator for ErrorNodes<'t> {
    type Item = tree_sitter::Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let node = self.cursor.node();
            self.advance();
            if node.is_error() || node.is_missing() {
                return Some(node);
            }
        }
        None
    }
}

/// Tree-sitter parser loaded with the Python grammar.
///
/// A parser is reusable; [`crate::scan_many`] keeps one for a whole corpus.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl Parser {
    /// Creates a Python parser.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInit`] if the grammar is incompatible
    /// with the linked Tree-sitter runtime.
    pub fn new() -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|error| SyntaxError::parser_init(error.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses `source`. Syntax errors do not fail the parse; check
    /// [`ParseResult::has_errors`].
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Parse`] if Tree-sitter produces no tree.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse("Tree-sitter returned no tree"))?;
        Ok(ParseResult {
            tree,
            source: source.to_owned(),
        })
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}
