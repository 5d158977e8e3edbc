use crate::grammar::AnalyzedGrammar;
use indoc::indoc;

#[test]
fn whitespace_and_comments_preserved() {
    let input = indoc! {"
        'a'  # first
        'b'
    "};

    let res = AnalyzedGrammar::expect_valid_cst_full(input);

    insta::assert_snapshot!(res, @r##"
    Root
      Seq
        Str
          SingleQuote "'"
          StrVal "a"
          SingleQuote "'"
        Whitespace "  "
        LineComment "# first"
        Newline "\n"
        Str
          SingleQuote "'"
          StrVal "b"
          SingleQuote "'"
      Newline "\n"
    "##);
}

#[test]
fn comment_only_grammar() {
    let res = AnalyzedGrammar::expect_valid_cst_full("# nothing here");

    insta::assert_snapshot!(res, @r##"
    Root
      Seq
      LineComment "# nothing here"
    "##);
}

#[test]
fn cst_is_lossless() {
    let input = indoc! {"
        # commands
        'move' <dir: north | south>   # where
          <steps: %>?
    "};

    let grammar = AnalyzedGrammar::expect_valid(input);
    assert_eq!(grammar.syntax().text().to_string(), input);
}
