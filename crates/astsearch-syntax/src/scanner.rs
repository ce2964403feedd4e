//! Searching trees and corpora for pattern matches.
//!
//! [`Pattern::scan`] walks one tree. [`scan_many`] parses and walks a
//! sequence of source units, reporting units that fail to parse as
//! [`ScanEvent::Skipped`] and carrying on with the rest.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, warn};

use crate::error::SyntaxError;
use crate::parser::Parser;
use crate::pattern::Pattern;
use crate::tree::{Descendants, SyntaxNode, SyntaxTree};

/// Lazy iterator over the nodes of one tree that match a pattern, in
/// pre-order.
#[derive(Debug, Clone)]
pub struct Matches<'p, 't> {
    pattern: &'p Pattern,
    nodes: Descendants<'t>,
}

impl<'t> Iterator for Matches<'_, 't> {
    type Item = &'t SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let pattern = self.pattern;
        self.nodes
            .find(|node| pattern.accepts_kind(node.kind()) && pattern.matches(node))
    }
}

impl Pattern {
    /// Returns every node of `tree` that matches this pattern, in pre-order.
    ///
    /// A match nested inside another match is reported as well.
    #[must_use]
    pub fn scan<'t>(&self, tree: &'t SyntaxTree) -> Matches<'_, 't> {
        Matches {
            pattern: self,
            nodes: tree.descendants(),
        }
    }
}

/// One source unit to scan: an identifier chosen by the caller plus the
/// unit's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit<I> {
    /// Caller-chosen identifier, echoed back in every event for this unit.
    pub id: I,
    /// Python source text.
    pub text: String,
}

impl<I> SourceUnit<I> {
    /// Creates a source unit.
    #[must_use]
    pub fn new(id: I, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// One outcome of [`scan_many`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent<I> {
    /// A node of `unit` matched.
    Match {
        /// The unit the node belongs to.
        unit: I,
        /// The matching node.
        node: SyntaxNode,
    },
    /// `unit` could not be parsed and was not scanned.
    Skipped {
        /// The skipped unit.
        unit: I,
        /// Why the unit was skipped.
        error: SyntaxError,
    },
}

impl<I> ScanEvent<I> {
    /// Returns the identifier of the unit this event belongs to.
    #[must_use]
    pub const fn unit(&self) -> &I {
        match self {
            Self::Match { unit, .. } | Self::Skipped { unit, .. } => unit,
        }
    }
}

/// Lazy iterator returned by [`scan_many`].
///
/// Each unit is parsed only once the events of the previous unit have been
/// consumed.
pub struct ScanMany<'p, I, U> {
    pattern: &'p Pattern,
    units: U,
    parser: Parser,
    pending: VecDeque<ScanEvent<I>>,
}

/// Scans each source unit in turn, in the order given.
///
/// Matches within a unit are yielded in pre-order. A unit with syntax
/// errors yields a single [`ScanEvent::Skipped`] and does not stop the scan.
///
/// # Errors
///
/// Returns an error if the Python grammar cannot be loaded.
pub fn scan_many<I, U>(
    pattern: &Pattern,
    units: U,
) -> Result<ScanMany<'_, I, U::IntoIter>, SyntaxError>
where
    I: Clone + fmt::Debug,
    U: IntoIterator<Item = SourceUnit<I>>,
{
    Ok(ScanMany {
        pattern,
        units: units.into_iter(),
        parser: Parser::new()?,
        pending: VecDeque::new(),
    })
}

/// Parses and lowers one unit of Python source.
///
/// # Errors
///
/// Returns [`SyntaxError::UnitSyntax`] if the source has syntax errors.
pub fn parse_unit(text: &str) -> Result<SyntaxTree, SyntaxError> {
    let mut parser = Parser::new()?;
    parse_with(&mut parser, text)
}

fn parse_with(parser: &mut Parser, text: &str) -> Result<SyntaxTree, SyntaxError> {
    let parsed = parser.parse(text)?;
    SyntaxTree::from_parse_result(&parsed)
}

impl<I, U> ScanMany<'_, I, U>
where
    I: Clone + fmt::Debug,
    U: Iterator<Item = SourceUnit<I>>,
{
    fn scan_unit(&mut self, unit: SourceUnit<I>) {
        let SourceUnit { id, text } = unit;
        match parse_with(&mut self.parser, &text) {
            Ok(tree) => {
                let before = self.pending.len();
                self.pending
                    .extend(self.pattern.scan(&tree).map(|node| ScanEvent::Match {
                        unit: id.clone(),
                        node: node.clone(),
                    }));
                debug!(
                    unit = ?id,
                    matches = self.pending.len() - before,
                    "scanned source unit"
                );
            }
            Err(error) => {
                warn!(unit = ?id, %error, "skipping source unit");
                self.pending.push_back(ScanEvent::Skipped { unit: id, error });
            }
        }
    }
}

impl<I, U> Iterator for ScanMany<'_, I, U>
where
    I: Clone + fmt::Debug,
    U: Iterator<Item = SourceUnit<I>>,
{
    type Item = ScanEvent<I>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            let unit = self.units.next()?;
            self.scan_unit(unit);
        }
    }
}

impl<I, U> fmt::Debug for ScanMany<'_, I, U>
where
    I: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanMany")
            .field("pattern", &self.pattern.source())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn pattern(text: &str) -> Pattern {
        Pattern::compile(text).expect("pattern")
    }

    fn lines(events: &[ScanEvent<&'static str>]) -> Vec<(&'static str, Option<u32>)> {
        events
            .iter()
            .map(|event| match event {
                ScanEvent::Match { unit, node } => (*unit, Some(node.line())),
                ScanEvent::Skipped { unit, .. } => (*unit, None),
            })
            .collect()
    }

    #[test]
    fn scan_yields_matches_in_pre_order() {
        let tree = parse_unit("def f():\n    return g(h(1))\nh(2)\n").expect("parse");
        let found: Vec<_> = pattern("?(?)")
            .scan(&tree)
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            found,
            [
                r#"Call(func=Name(id="g"), args=[Call(func=Name(id="h"), args=[Constant(value=1)])])"#,
                r#"Call(func=Name(id="h"), args=[Constant(value=1)])"#,
                r#"Call(func=Name(id="h"), args=[Constant(value=2)])"#,
            ]
        );
    }

    #[test]
    fn scan_on_tree_without_matches_is_empty() {
        let tree = parse_unit("x = 1\n").expect("parse");
        assert_eq!(pattern("f(?)").scan(&tree).count(), 0);
    }

    #[test]
    fn scan_many_skips_broken_units_and_continues() {
        let units = [
            SourceUnit::new("a.py", "f(1)\n"),
            SourceUnit::new("broken.py", "def (:\n"),
            SourceUnit::new("b.py", "x = 1\nf(2)\nf(3)\n"),
        ];
        let events: Vec<_> = scan_many(&pattern("f(?)"), units)
            .expect("scanner")
            .collect();
        assert_eq!(
            lines(&events),
            [
                ("a.py", Some(1)),
                ("broken.py", None),
                ("b.py", Some(2)),
                ("b.py", Some(3)),
            ]
        );
        let Some(ScanEvent::Skipped { error, .. }) = events.get(1) else {
            panic!("expected a skipped unit, got {events:?}");
        };
        assert!(matches!(error, SyntaxError::UnitSyntax { line: 1, .. }), "{error:?}");
    }

    #[rstest]
    #[case::no_units(Vec::new())]
    #[case::only_broken(vec![SourceUnit::new("bad.py", "if:\n")])]
    fn scan_many_without_matches_yields_no_match_events(
        #[case] units: Vec<SourceUnit<&'static str>>,
    ) {
        let compiled = pattern("f(?)");
        let mut scanner = scan_many(&compiled, units).expect("scanner");
        assert!(scanner.all(|event| matches!(event, ScanEvent::Skipped { .. })));
    }

    #[rstest]
    #[case::empty_if("if x:\n")]
    #[case::empty_class("class C:\n")]
    #[case::unindented_body("while x:\ny = 1\n")]
    #[case::positional_after_keyword("f(a=1, 2)\n")]
    #[case::required_after_default("def f(a=1, b): pass\n")]
    fn units_python_rejects_are_skipped(#[case] source: &str) {
        let error = parse_unit(source).expect_err("invalid Python");
        assert!(matches!(error, SyntaxError::UnitSyntax { .. }), "{error:?}");

        let units = [SourceUnit::new("bad.py", source), SourceUnit::new("ok.py", "f(1)\n")];
        let events: Vec<_> = scan_many(&pattern("f(?)"), units)
            .expect("scanner")
            .collect();
        assert_eq!(lines(&events), [("bad.py", None), ("ok.py", Some(1))]);
    }

    #[test]
    fn scanning_twice_gives_identical_events() {
        let units = || {
            vec![
                SourceUnit::new(1_u32, "f(1)\nf(2, 3)\n"),
                SourceUnit::new(2_u32, "g(f(4))\n"),
            ]
        };
        let compiled = pattern("f(?)");
        let first: Vec<_> = scan_many(&compiled, units()).expect("scanner").collect();
        let second: Vec<_> = scan_many(&compiled, units()).expect("scanner").collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn parse_unit_reports_first_syntax_error() {
        let error = parse_unit("x = 1\ny = (\n").expect_err("broken source");
        assert!(matches!(error, SyntaxError::UnitSyntax { .. }), "{error:?}");
    }
}
