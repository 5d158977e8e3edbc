use crate::grammar::AnalyzedGrammar;

#[test]
fn single_quoted_literal() {
    let res = AnalyzedGrammar::expect_valid_cst("'move'");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Str
          SingleQuote "'"
          StrVal "move"
          SingleQuote "'"
    "#);
}

#[test]
fn double_quoted_literal() {
    let res = AnalyzedGrammar::expect_valid_cst(r#""it's""#);

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Str
          DoubleQuote "\""
          StrVal "it's"
          DoubleQuote "\""
    "#);
}

#[test]
fn bare_word() {
    let res = AnalyzedGrammar::expect_valid_cst("north");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Bare
          Id "north"
    "#);
}

#[test]
fn token_classes() {
    let res = AnalyzedGrammar::expect_valid_cst("$ % .");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        AnyToken
          Dollar "$"
        WordClass
          Percent "%"
        SingleChar
          Dot "."
    "#);
}

#[test]
fn regex() {
    let res = AnalyzedGrammar::expect_valid_cst("~[0-9]+~");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Pattern
          RegexLiteral "~[0-9]+~"
    "#);
}

#[test]
fn terminals_ast() {
    let res = AnalyzedGrammar::expect_valid_ast(r"'a\'b' word ~\d+~ $ % .");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Str "a\\'b"
        Bare word
        Pattern ~\d+~
        AnyToken
        WordClass
        SingleChar
    "#);
}

#[test]
fn empty_grammar() {
    let res = AnalyzedGrammar::expect_valid_cst("");

    insta::assert_snapshot!(res, @r"
    Root
      Seq
    ");
}
