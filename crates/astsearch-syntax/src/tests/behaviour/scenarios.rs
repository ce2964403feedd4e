//! Scenario bindings for the `astsearch-syntax` BDD feature file.
//!
//! These functions bind Gherkin scenario names to the step definitions in the
//! parent module.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::TestWorld;

/// Fixture providing the shared BDD world.
#[fixture]
fn world() -> RefCell<TestWorld> {
    super::world()
}

#[scenario(
    path = "tests/features/astsearch_syntax.feature",
    name = "Literal pattern matches identical code"
)]
fn literal_pattern(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/astsearch_syntax.feature",
    name = "Single wildcards match any operand"
)]
fn single_wildcards(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/astsearch_syntax.feature",
    name = "Names match attribute accesses with the same name"
)]
fn names_match_attributes(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/astsearch_syntax.feature",
    name = "Trailing multi wildcard accepts extra arguments"
)]
fn trailing_multi_wildcard(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/astsearch_syntax.feature",
    name = "Keyword wildcard accepts extra keywords"
)]
fn keyword_wildcard(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/astsearch_syntax.feature",
    name = "Two multi wildcards in one list are rejected"
)]
fn two_multi_wildcards_rejected(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/astsearch_syntax.feature",
    name = "Broken units are skipped and scanning continues"
)]
fn broken_units_skipped(world: RefCell<TestWorld>) {
    drop(world);
}
