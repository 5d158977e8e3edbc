use crate::grammar::AnalyzedGrammar;

#[test]
fn name_starting_with_digit() {
    let res = AnalyzedGrammar::expect_errors("<1x: %>");

    insta::assert_snapshot!(res, @"error at 1..3: `1x` is not a valid name (hint: names start with a letter or `_`, e.g. `digits` or `_item2`)");
}

#[test]
fn definition_name_starting_with_digit() {
    let res = AnalyzedGrammar::expect_errors("@9: 'x' @@ @9@");

    insta::assert_snapshot!(res, @r"
    error at 1..2: `9` is not a valid name (hint: names start with a letter or `_`, e.g. `digits` or `_item2`)
    error at 12..13: `9` is not a valid name (hint: names start with a letter or `_`, e.g. `digits` or `_item2`)
    ");
}

#[test]
fn duplicate_definition() {
    let res = AnalyzedGrammar::expect_invalid("@d: 'a' @@ @d: 'b' @@ @d@");

    insta::assert_snapshot!(res, @r"
    error: `d` is already defined
      |
    1 | @d: 'a' @@ @d: 'b' @@ @d@
      |  -          ^
      |  |
      |  first defined here
    ");
}

#[test]
fn undefined_reference() {
    let res = AnalyzedGrammar::expect_invalid("'a' @missing@");

    insta::assert_snapshot!(res, @r"
    error: `missing` is not defined
      |
    1 | 'a' @missing@
      |      ^^^^^^^
    ");
}

#[test]
fn every_error_is_reported() {
    let res = AnalyzedGrammar::expect_errors("@a@ '' 'x'{3,1} ~(~");
    let lines: Vec<_> = res.lines().collect();
    assert_eq!(lines.len(), 4, "{res}");
    assert!(lines[0].contains("`a` is not defined"));
    assert!(lines[1].contains("empty literal"));
    assert!(lines[2].contains("minimum 3 exceeds maximum 1"));
    assert!(lines[3].contains("invalid regex"));
}
