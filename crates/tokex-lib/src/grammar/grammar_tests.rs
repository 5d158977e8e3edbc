use indoc::indoc;

use crate::CompileOptions;
use crate::diagnostics::DiagnosticKind;
use crate::grammar::{AnalyzedGrammar, GrammarBuilder, GrammarNode, analyze};

impl<'src> AnalyzedGrammar<'src> {
    #[track_caller]
    pub fn expect(src: &'src str) -> Self {
        GrammarBuilder::new(src).parse().unwrap().analyze()
    }

    #[track_caller]
    pub fn expect_with(src: &'src str, options: &CompileOptions) -> Self {
        GrammarBuilder::new(src)
            .with_options(options)
            .parse()
            .unwrap()
            .analyze()
    }

    #[track_caller]
    pub fn expect_valid(src: &'src str) -> Self {
        let grammar = Self::expect(src);
        if !grammar.is_valid() {
            panic!(
                "Expected valid grammar, got error:\n{}",
                grammar.dump_diagnostics()
            );
        }
        grammar
    }

    #[track_caller]
    pub fn expect_valid_cst(src: &'src str) -> String {
        Self::expect_valid(src).dump_cst()
    }

    #[track_caller]
    pub fn expect_valid_cst_full(src: &'src str) -> String {
        Self::expect_valid(src).dump_cst_full()
    }

    #[track_caller]
    pub fn expect_valid_ast(src: &'src str) -> String {
        Self::expect_valid(src).dump_ast()
    }

    #[track_caller]
    pub fn expect_valid_pattern(src: &'src str) -> String {
        Self::expect_valid(src).dump_pattern()
    }

    #[track_caller]
    pub fn expect_valid_symbols(src: &'src str) -> String {
        Self::expect_valid(src).dump_symbols()
    }

    #[track_caller]
    pub fn expect_invalid(src: &'src str) -> String {
        let grammar = Self::expect(src);
        if grammar.is_valid() {
            panic!("Expected invalid grammar, got valid:\n{}", grammar.dump_cst());
        }
        grammar.dump_diagnostics()
    }

    /// Filtered diagnostics of an invalid grammar, one line each.
    #[track_caller]
    pub fn expect_errors(src: &'src str) -> String {
        let grammar = Self::expect(src);
        if grammar.is_valid() {
            panic!("Expected invalid grammar, got valid:\n{}", grammar.dump_cst());
        }
        grammar.dump_diagnostic_lines()
    }
}

type Grammar<'src> = AnalyzedGrammar<'src>;

#[test]
fn pipeline_lowers_every_node_kind() {
    let input = indoc! {r#"
        'say' "hi" word $ % . ~[0-9]+~ (a | b) <x: %> @item@* 'q'{2,3}
        @item: %+ @@
    "#};

    let res = Grammar::expect_valid_pattern(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Sequence
        Literal "say"
        Literal "hi"
        Literal "word"
        AnyToken
        Word
        AnySingleChar
        Regex ~[0-9]+~
        Alternation
          Literal "a"
          Literal "b"
        Capture x
          Word
        Repetition *
          Ref item
        Repetition {2,3}
          Literal "q"
    Def item
      Repetition +
        Word
    "#);
}

#[test]
fn single_item_sequences_flatten() {
    let res = Grammar::expect_valid_pattern("((('a')))");

    insta::assert_snapshot!(res, @r#"
    Root
      Literal "a"
    "#);
}

#[test]
fn definitions_contribute_nothing_to_sequence() {
    let grammar = Grammar::expect_valid("'a' @d: 'x' @@ 'b' @d@");
    let GrammarNode::Sequence(children) = grammar.compiled().root() else {
        panic!("expected a sequence");
    };
    assert_eq!(children.len(), 3);
    assert_eq!(grammar.compiled().table().len(), 1);
}

#[test]
fn nested_definitions_share_one_table() {
    let input = indoc! {"
        @outer: @inner: 'x' @@ @inner@ 'y' @@
        @outer@ @inner@
    "};

    let res = Grammar::expect_valid_pattern(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Sequence
        Ref outer
        Ref inner
    Def outer
      Sequence
        Ref inner
        Literal "y"
    Def inner
      Literal "x"
    "#);
}

#[test]
fn string_escapes_are_resolved() {
    let grammar = Grammar::expect_valid(r#"'it\'s' "a\"b" 'tab\there' 'back\\slash' 'keep\q'"#);
    let GrammarNode::Sequence(children) = grammar.compiled().root() else {
        panic!("expected a sequence");
    };
    let literals: Vec<_> = children
        .iter()
        .map(|c| match c {
            GrammarNode::Literal(text) => text.as_str(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        literals,
        ["it's", "a\"b", "tab\there", "back\\slash", "keep\\q"]
    );
}

#[test]
fn regex_tilde_escape() {
    let res = Grammar::expect_valid_pattern(r"~a\~b~");

    insta::assert_snapshot!(res, @r"
    Root
      Regex ~a~b~
    ");
}

#[test]
fn quantifier_bounds_forms() {
    let res = Grammar::expect_valid_pattern("'a'{2} 'b'{1,} 'c'{,3} 'd'{0,1} 'e'*?");

    insta::assert_snapshot!(res, @r#"
    Root
      Sequence
        Repetition {2}
          Literal "a"
        Repetition +
          Literal "b"
        Repetition {0,3}
          Literal "c"
        Repetition ?
          Literal "d"
        Repetition ?
          Repetition *
            Literal "e"
    "#);
}

#[test]
fn empty_literal_is_error() {
    let res = Grammar::expect_errors("'a' ''");

    insta::assert_snapshot!(res, @"error at 4..6: empty literal never matches (hint: use `$` to match any token)");
}

#[test]
fn invalid_regex_is_error() {
    let grammar = Grammar::expect("~[a-~");
    assert!(!grammar.is_valid());
    let kinds: Vec<_> = grammar.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::InvalidRegex]);
}

#[test]
fn unbalanced_regex_cannot_escape_anchors() {
    let grammar = Grammar::expect("~a)|(?:b~");
    assert!(!grammar.is_valid());
    let kinds: Vec<_> = grammar.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::InvalidRegex]);

    assert!(crate::compile("~a)|(?:b~").is_err());
}

#[test]
fn regex_alternation_matches_whole_token() {
    let grammar = crate::compile("~a|b~").unwrap();
    assert!(grammar.match_input("a").unwrap().is_some());
    assert!(grammar.match_input("b").unwrap().is_some());
    assert!(grammar.match_input("ab").unwrap().is_none());
    assert!(grammar.match_input("xb").unwrap().is_none());
}

#[test]
fn empty_regex_is_error() {
    let res = Grammar::expect_errors("~~");

    insta::assert_snapshot!(res, @"error at 0..2: invalid regex: empty pattern");
}

#[test]
fn invalid_bounds() {
    let res = Grammar::expect_errors("'a'{} 'b'{,} 'c'{0} 'd'{3,1} 'e'{x}");

    insta::assert_snapshot!(res, @r"
    error at 3..5: invalid repetition bounds: at least one bound is required (hint: e.g., `{2}`, `{1,}`, `{,3}` or `{1,3}`)
    error at 9..12: invalid repetition bounds: at least one bound is required (hint: e.g., `{2}`, `{1,}`, `{,3}` or `{1,3}`)
    error at 16..19: invalid repetition bounds: maximum must be at least 1 (hint: e.g., `{2}`, `{1,}`, `{,3}` or `{1,3}`)
    error at 23..28: invalid repetition bounds: minimum 3 exceeds maximum 1 (hint: e.g., `{2}`, `{1,}`, `{,3}` or `{1,3}`)
    error at 33..34: invalid repetition bounds: `x` is not a number (hint: e.g., `{2}`, `{1,}`, `{,3}` or `{1,3}`)
    ");
}

#[test]
fn definitions_disallowed() {
    let options = CompileOptions::default().allow_sub_grammar_definitions(false);
    let grammar = Grammar::expect_with("@d: 'x' @@ @d@", &options);

    insta::assert_snapshot!(grammar.dump_diagnostics(), @r"
    error: sub-grammar definitions are not allowed
      |
    1 | @d: 'x' @@ @d@
      |  ^
    ");
}

#[test]
fn undefined_reference_without_definitions() {
    let options = CompileOptions::default().allow_sub_grammar_definitions(false);
    let grammar = Grammar::expect_with("@d@", &options);
    let kinds: Vec<_> = grammar.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::UndefinedReference]);
}

#[test]
fn warnings_do_not_fail_compilation() {
    let grammar = Grammar::expect("@unused: 'x' @@ 'a'");
    assert!(grammar.is_valid());
    assert_eq!(grammar.diagnostics().warning_count(), 1);
    assert!(grammar.clone().into_compiled().is_ok());
}

#[test]
fn analyze_reports_parser_fuel() {
    let options = CompileOptions::default().with_exec_fuel(Some(3));
    assert!(matches!(
        analyze("'a' 'b' 'c' 'd'", &options),
        Err(crate::Error::ExecFuelExhausted)
    ));
}
