use crate::grammar::AnalyzedGrammar;

#[test]
fn top_level_alternation() {
    let res = AnalyzedGrammar::expect_valid_cst("a | b");

    insta::assert_snapshot!(res, @r#"
    Root
      Alt
        Seq
          Bare
            Id "a"
        Pipe "|"
        Seq
          Bare
            Id "b"
    "#);
}

#[test]
fn branches_are_sequences() {
    let res = AnalyzedGrammar::expect_valid_ast("'go' north | 'stop'");

    insta::assert_snapshot!(res, @r#"
    Root
      Alt
        Seq
          Str "go"
          Bare north
        Seq
          Str "stop"
    "#);
}

#[test]
fn alternation_inside_group() {
    let res = AnalyzedGrammar::expect_valid_ast("'go' (north | south)");

    insta::assert_snapshot!(res, @r#"
    Root
      Seq
        Str "go"
        Group
          Alt
            Seq
              Bare north
            Seq
              Bare south
    "#);
}

#[test]
fn empty_branch_is_allowed() {
    let res = AnalyzedGrammar::expect_valid_pattern("a |");

    insta::assert_snapshot!(res, @r#"
    Root
      Alternation
        Literal "a"
        Sequence
    "#);
}
