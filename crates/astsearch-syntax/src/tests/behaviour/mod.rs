//! Behaviour-driven development (BDD) step definitions for astsearch-syntax scenarios.

mod scenarios;

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, then, when};

use crate::{Pattern, ScanEvent, SourceUnit, SyntaxError, scan_many};

// =============================================================================
// Test World
// =============================================================================

/// State shared across BDD steps.
#[derive(Default)]
struct TestWorld {
    /// Source units to scan, in order.
    units: Vec<SourceUnit<String>>,
    /// Result of compiling the scenario's pattern.
    pattern: Option<Result<Pattern, SyntaxError>>,
    /// Events produced by the scan.
    events: Vec<ScanEvent<String>>,
}

impl TestWorld {
    fn matched_lines(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ScanEvent::Match { node, .. } => Some(node.line()),
                ScanEvent::Skipped { .. } => None,
            })
            .collect()
    }
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

// =============================================================================
// Given Steps
// =============================================================================

/// Strips surrounding double quotes from a string if present.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

/// Unquotes step text and expands `\n` escapes into newlines.
fn source_text(s: &str) -> String {
    strip_quotes(s).replace("\\n", "\n")
}

#[given("a pattern {pattern}")]
fn given_pattern(world: &RefCell<TestWorld>, pattern: String) {
    let mut w = world.borrow_mut();
    w.pattern = Some(Pattern::compile(&source_text(&pattern)));
}

#[given("Python source {code}")]
fn given_python_source(world: &RefCell<TestWorld>, code: String) {
    let mut w = world.borrow_mut();
    w.units.push(SourceUnit::new("source".to_owned(), source_text(&code)));
}

#[given("a unit {name} containing {code}")]
fn given_unit(world: &RefCell<TestWorld>, name: String, code: String) {
    let mut w = world.borrow_mut();
    w.units
        .push(SourceUnit::new(strip_quotes(&name).to_owned(), source_text(&code)));
}

// =============================================================================
// When Steps
// =============================================================================

#[when("the units are scanned")]
fn when_scanned(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let units = std::mem::take(&mut w.units);
    let events: Vec<_> = {
        let pattern = w
            .pattern
            .as_ref()
            .expect("pattern should be set before scanning")
            .as_ref()
            .expect("pattern should compile");
        scan_many(pattern, units).expect("scanner").collect()
    };
    w.events = events;
}

// =============================================================================
// Then Steps
// =============================================================================

#[then("the match count is {count}")]
fn then_match_count(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    let lines = w.matched_lines();
    assert_eq!(lines.len(), count, "matched lines: {lines:?}");
}

#[then("a match is reported on line {line}")]
fn then_match_on_line(world: &RefCell<TestWorld>, line: u32) {
    let w = world.borrow();
    let lines = w.matched_lines();
    assert!(lines.contains(&line), "Expected a match on line {line}, got {lines:?}");
}

#[then("the unit {name} is skipped")]
fn then_unit_skipped(world: &RefCell<TestWorld>, name: String) {
    let w = world.borrow();
    let expected = strip_quotes(&name);
    let skipped = w.events.iter().any(|event| {
        matches!(event, ScanEvent::Skipped { unit, .. } if unit == expected)
    });
    assert!(skipped, "Expected {expected} to be skipped, events: {:?}", w.events);
}

#[then("pattern compilation fails at line {line} column {column}")]
fn then_compilation_fails(world: &RefCell<TestWorld>, line: u32, column: u32) {
    let w = world.borrow();
    let result = w.pattern.as_ref().expect("pattern should be set");
    let Err(error) = result else {
        panic!("Expected compilation to fail, got {result:?}");
    };
    assert!(
        matches!(
            error,
            SyntaxError::PatternSyntax { line: l, column: c, .. } if *l == line && *c == column
        ),
        "Unexpected error: {error:?}"
    );
}
