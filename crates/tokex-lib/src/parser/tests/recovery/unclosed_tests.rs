use crate::grammar::AnalyzedGrammar;
use indoc::indoc;

#[test]
fn missing_paren() {
    let input = indoc! {"
    ('a'
    "};

    let res = AnalyzedGrammar::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: missing closing `)`
      |
    1 | ('a'
      | -^^^
      | |
      | group started here
    ");
}

#[test]
fn missing_angle() {
    let input = indoc! {"
    <n: %
    "};

    let res = AnalyzedGrammar::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: missing closing `>`
      |
    1 | <n: %
      | -^^^^
      | |
      | capture started here
    ");
}

#[test]
fn missing_definition_end() {
    let input = indoc! {"
    @d: 'x'
    "};

    let res = AnalyzedGrammar::expect_errors(input);

    insta::assert_snapshot!(res, @"error at 0..8: missing closing `@@` (related: definition started here at 0..1)");
}

#[test]
fn missing_brace() {
    let res = AnalyzedGrammar::expect_errors("'a'{2");

    insta::assert_snapshot!(res, @"error at 3..5: missing closing `}` (related: bounds started here at 3..4)");
}

#[test]
fn nested_unclosed_reports_innermost() {
    let res = AnalyzedGrammar::expect_errors("((a");

    insta::assert_snapshot!(res, @"error at 1..3: missing closing `)` (related: group started here at 1..2)");
}

#[test]
fn outer_closer_ends_inner_construct() {
    let res = AnalyzedGrammar::expect_errors("(<n: 'a')");

    insta::assert_snapshot!(res, @"error at 1..9: missing closing `>` (related: capture started here at 1..2)");
}

#[test]
fn unclosed_still_produces_tree() {
    let grammar = AnalyzedGrammar::expect("<n: 'a' 'b'");
    assert!(!grammar.is_valid());

    insta::assert_snapshot!(grammar.dump_ast(), @r#"
    Root
      Seq
        Capture n
          Seq
            Str "a"
            Str "b"
    "#);
}
