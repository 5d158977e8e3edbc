use crate::grammar::AnalyzedGrammar;
use indoc::indoc;

#[test]
fn definition_and_reference() {
    let res = AnalyzedGrammar::expect_valid_cst("@d: 'x' @@ @d@");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Def
          At "@"
          Id "d"
          Colon ":"
          Seq
            Str
              SingleQuote "'"
              StrVal "x"
              SingleQuote "'"
          DoubleAt "@@"
        Ref
          At "@"
          Id "d"
          At "@"
    "#);
}

#[test]
fn definition_with_alternation() {
    let input = indoc! {"
        @value: % | ~[0-9]+~ @@
        <v: @value@>
    "};

    let res = AnalyzedGrammar::expect_valid_ast(input);

    insta::assert_snapshot!(res, @r"
    Root
      Seq
        Def value
          Alt
            Seq
              WordClass
            Seq
              Pattern ~[0-9]+~
        Capture v
          Seq
            Ref value
    ");
}

#[test]
fn nested_definition() {
    let input = indoc! {"
        @outer:
          @inner: 'x' @@
          @inner@ 'y'
        @@
        @outer@
    "};

    let res = AnalyzedGrammar::expect_valid_ast(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Def outer
          Seq
            Def inner
              Seq
                Str "x"
            Ref inner
            Str "y"
        Ref outer
    "#);
}

#[test]
fn forward_reference() {
    let res = AnalyzedGrammar::expect_valid_ast("@later@ @later: % @@");

    insta::assert_snapshot!(res, @r"
    Root
      Seq
        Ref later
        Def later
          Seq
            WordClass
    ");
}

#[test]
fn reference_inside_definition_of_itself() {
    let res = AnalyzedGrammar::expect_valid_ast("@list: % ',' @list@ | % @@ @list@");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Def list
          Alt
            Seq
              WordClass
              Str ","
              Ref list
            Seq
              WordClass
        Ref list
    "#);
}
