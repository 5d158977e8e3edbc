use crate::grammar::AnalyzedGrammar;

#[test]
fn quantifier_star() {
    let res = AnalyzedGrammar::expect_valid_cst("'a'*");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Quantifier
          Str
            SingleQuote "'"
            StrVal "a"
            SingleQuote "'"
          Star "*"
    "#);
}

#[test]
fn quantifier_plus_and_optional() {
    let res = AnalyzedGrammar::expect_valid_cst("%+ $?");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Quantifier
          WordClass
            Percent "%"
          Plus "+"
        Quantifier
          AnyToken
            Dollar "$"
          Question "?"
    "#);
}

#[test]
fn quantifier_bounds() {
    let res = AnalyzedGrammar::expect_valid_cst("%{2,3}");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Quantifier
          WordClass
            Percent "%"
          Bounds
            BraceOpen "{"
            Id "2"
            Comma ","
            Id "3"
            BraceClose "}"
    "#);
}

#[test]
fn open_ended_bounds() {
    let res = AnalyzedGrammar::expect_valid_cst("%{,3}");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Quantifier
          WordClass
            Percent "%"
          Bounds
            BraceOpen "{"
            Comma ","
            Id "3"
            BraceClose "}"
    "#);
}

#[test]
fn stacked_quantifiers_nest() {
    let res = AnalyzedGrammar::expect_valid_ast("'a'+? (b c){2}");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Quantifier ?
          Quantifier +
            Str "a"
        Quantifier {2}
          Group
            Seq
              Bare b
              Bare c
    "#);
}

#[test]
fn quantified_reference() {
    let res = AnalyzedGrammar::expect_valid_ast("@item: % @@ @item@*");

    insta::assert_snapshot!(res, @r"
    Root
      Seq
        Def item
          Seq
            WordClass
        Quantifier *
          Ref item
    ");
}
