use crate::grammar::AnalyzedGrammar;

#[test]
fn unmatched_closer() {
    let res = AnalyzedGrammar::expect_invalid("'a' )");

    insta::assert_snapshot!(res, @r"
    error: unexpected token: unmatched `)`
      |
    1 | 'a' )
      |     ^
    ");
}

#[test]
fn closer_of_other_construct() {
    let res = AnalyzedGrammar::expect_errors("('a' >)");

    insta::assert_snapshot!(res, @"error at 5..6: unexpected token: unmatched `>`");
}

#[test]
fn quantifier_without_operand() {
    let res = AnalyzedGrammar::expect_errors("* 'a'");

    insta::assert_snapshot!(res, @"error at 0..1: expected an expression: quantifier has nothing to repeat");
}

#[test]
fn unrecognized_characters() {
    let res = AnalyzedGrammar::expect_errors("'a' ^ 'b'");

    insta::assert_snapshot!(res, @"error at 4..5: unexpected token: unrecognized characters");
}

#[test]
fn unterminated_string() {
    let res = AnalyzedGrammar::expect_errors("'a' 'bc");
    assert!(res.starts_with("error at 4.."), "{res}");
    assert!(res.contains("unterminated string literal"), "{res}");
}

#[test]
fn unterminated_regex() {
    let res = AnalyzedGrammar::expect_errors("~[0-9]+");
    assert!(res.contains("unterminated regex"), "{res}");
}

#[test]
fn missing_capture_name() {
    let res = AnalyzedGrammar::expect_errors("<: %>");

    insta::assert_snapshot!(res, @"error at 1..2: expected a name (hint: names start with a letter or `_`, e.g. `digits` or `_item2`)");
}

#[test]
fn missing_capture_colon() {
    let res = AnalyzedGrammar::expect_errors("<n %>");

    insta::assert_snapshot!(res, @"error at 3..4: unexpected token: expected `:` after capture name");
}

#[test]
fn reference_glued_to_definition_end() {
    let res = AnalyzedGrammar::expect_errors("@x@@");

    insta::assert_snapshot!(res, @r"
    error at 2..4: unexpected token: `@@` directly after a reference name; separate the closing `@` with a space
    error at 1..2: `x` is not defined
    ");
}

#[test]
fn unclosed_reference() {
    let res = AnalyzedGrammar::expect_errors("@d: 'x' @@ @d 'y'");

    insta::assert_snapshot!(res, @"error at 14..15: unexpected token: expected `@` to close the reference");
}
