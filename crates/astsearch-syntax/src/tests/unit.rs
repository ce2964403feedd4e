//! Unit tests for astsearch-syntax.

use rstest::rstest;

use crate::{NodeKind, Parser, Pattern, SyntaxError, SyntaxTree, parse_unit};

// =============================================================================
// Parser Tests
// =============================================================================

#[rstest]
#[case("def hello():\n    pass", false)]
#[case("def broken(", true)]
#[case("x = [1, 2", true)]
#[case("print('ok')\n", false)]
fn parser_detects_errors(#[case] source: &str, #[case] has_errors: bool) {
    let mut parser = Parser::new().expect("parser init");
    let result = parser.parse(source).expect("parse");
    assert_eq!(result.has_errors(), has_errors);
}

#[test]
fn syntax_tree_rejects_broken_source() {
    let error = SyntaxTree::parse("def broken(:\n    pass\n").expect_err("syntax error");
    assert!(!error.is_pattern_error());
    assert!(matches!(error, SyntaxError::UnitSyntax { line: 1, .. }), "{error:?}");
}

#[test]
fn unknown_constructs_keep_nested_code_reachable() {
    let tree = parse_unit("match command:\n    case 'go':\n        run(1)\n").expect("parse");
    let pattern = Pattern::compile("run(?)").expect("pattern");
    let lines: Vec<_> = pattern.scan(&tree).map(|node| node.line()).collect();
    assert_eq!(lines, [3]);
}

// =============================================================================
// Pattern Tests
// =============================================================================

#[rstest]
#[case("f(?)", &[NodeKind::Call])]
#[case("foo", &[NodeKind::Name, NodeKind::Attribute])]
#[case("def ?(??): ??", &[NodeKind::FunctionDef])]
#[case("x += 1", &[NodeKind::AugAssign])]
fn pattern_reports_root_kinds(#[case] text: &str, #[case] kinds: &[NodeKind]) {
    let pattern = Pattern::compile(text).expect("compile");
    assert_eq!(pattern.root_kinds(), kinds);
    assert_eq!(pattern.source(), text);
}

#[rstest]
#[case("f(")]
#[case("def")]
#[case("")]
#[case("x = 1\ny = 2")]
fn invalid_patterns_are_pattern_errors(#[case] text: &str) {
    let error = Pattern::compile(text).expect_err("invalid pattern");
    assert!(error.is_pattern_error(), "{error:?}");
}

#[test]
fn pattern_error_positions_refer_to_written_text() {
    let error = Pattern::compile("f(??, ??)").expect_err("two markers");
    assert!(
        matches!(error, SyntaxError::PatternSyntax { line: 1, column: 7, .. }),
        "{error:?}"
    );
}

// =============================================================================
// Property Tests
// =============================================================================

#[rstest]
#[case("x = 1\nf(a, b=2)\nclass C(Base): pass\n", "f(a, b=2)", "f(?, b=?)")]
#[case("for i in range(3):\n    print(i)\n", "range(3)", "range(?)")]
#[case("y = obj.attr + 2\n", "obj.attr + 2", "?.attr + ?")]
fn wildcards_never_match_fewer_nodes_than_literals(
    #[case] source: &str,
    #[case] literal: &str,
    #[case] generalised: &str,
) {
    let tree = parse_unit(source).expect("parse");
    let literal = Pattern::compile(literal).expect("literal");
    let generalised = Pattern::compile(generalised).expect("generalised");
    assert!(generalised.scan(&tree).count() >= literal.scan(&tree).count());
    assert!(literal.scan(&tree).count() >= 1);
}

#[test]
fn names_and_attribute_paths_are_interchangeable() {
    let tree = parse_unit("join(a)\nos.path.join(a)\n").expect("parse");
    let pattern = Pattern::compile("join(a)").expect("pattern");
    assert_eq!(pattern.scan(&tree).count(), 2);
}

#[test]
fn block_of_only_multi_wildcard_requires_non_empty_body() {
    let tree = parse_unit("try:\n    x()\nexcept E:\n    pass\nfinally:\n    y()\n").expect("parse");
    let with_finally =
        Pattern::compile("try:\n    ??\nexcept ?:\n    ??\nfinally:\n    ??").expect("pattern");
    let without = Pattern::compile("try:\n    ??\nexcept ?:\n    ??").expect("pattern");
    assert_eq!(with_finally.scan(&tree).count(), 1);
    assert_eq!(without.scan(&tree).count(), 1);
}
