use crate::grammar::AnalyzedGrammar;

#[test]
fn capture() {
    let res = AnalyzedGrammar::expect_valid_cst("<dir: %>");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Capture
          AngleOpen "<"
          Id "dir"
          Colon ":"
          Seq
            WordClass
              Percent "%"
          AngleClose ">"
    "#);
}

#[test]
fn capture_with_alternation() {
    let res = AnalyzedGrammar::expect_valid_ast("<dir: north | south>");

    insta::assert_snapshot!(res, @r"
    Root
      Seq
        Capture dir
          Alt
            Seq
              Bare north
            Seq
              Bare south
    ");
}

#[test]
fn nested_captures() {
    let res = AnalyzedGrammar::expect_valid_ast("<pair: <key: %> '=' <value: $>>");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Capture pair
          Seq
            Capture key
              Seq
                WordClass
            Str "="
            Capture value
              Seq
                AnyToken
    "#);
}

#[test]
fn quantified_capture() {
    let res = AnalyzedGrammar::expect_valid_ast("<n: %>+");

    insta::assert_snapshot!(res, @r"
    Root
      Seq
        Quantifier +
          Capture n
            Seq
              WordClass
    ");
}

#[test]
fn underscore_names() {
    let res = AnalyzedGrammar::expect_valid_ast("<_item2: $>");

    insta::assert_snapshot!(res, @r"
    Root
      Seq
        Capture _item2
          Seq
            AnyToken
    ");
}
