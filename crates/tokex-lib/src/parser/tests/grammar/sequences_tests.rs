use crate::grammar::AnalyzedGrammar;
use indoc::indoc;

#[test]
fn flat_sequence() {
    let res = AnalyzedGrammar::expect_valid_cst("'go' north");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Str
          SingleQuote "'"
          StrVal "go"
          SingleQuote "'"
        Bare
          Id "north"
    "#);
}

#[test]
fn group() {
    let res = AnalyzedGrammar::expect_valid_cst("(a b) c");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Group
          ParenOpen "("
          Seq
            Bare
              Id "a"
            Bare
              Id "b"
          ParenClose ")"
        Bare
          Id "c"
    "#);
}

#[test]
fn empty_group() {
    let res = AnalyzedGrammar::expect_valid_cst("()");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Group
          ParenOpen "("
          Seq
          ParenClose ")"
    "#);
}

#[test]
fn nested_groups_ast() {
    let res = AnalyzedGrammar::expect_valid_ast("((a) (b c))");

    insta::assert_snapshot!(res, @r"
    Root
      Seq
        Group
          Seq
            Group
              Seq
                Bare a
            Group
              Seq
                Bare b
                Bare c
    ");
}

#[test]
fn multiline_sequence() {
    let input = indoc! {"
        'set'
        %
        '='
        $
    "};

    let res = AnalyzedGrammar::expect_valid_ast(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Str "set"
        WordClass
        Str "="
        AnyToken
    "#);
}
