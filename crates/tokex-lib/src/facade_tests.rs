use indoc::indoc;

use crate::engine::{PrintTracer, Verbosity};
use crate::{
    Captures, Colors, CompileOptions, DiagnosticKind, Error, Grammar, MatchOptions,
    MatchSafetyError, Value, compile, compile_with, match_input,
};

fn partial() -> MatchOptions {
    MatchOptions::default().match_entirety(false)
}

fn json(captures: &Option<Captures>) -> String {
    match captures {
        Some(captures) => serde_json::to_string(captures).expect("json serialization failed"),
        None => "no match".to_string(),
    }
}

#[test]
fn compile_and_match() {
    let grammar = compile("'move' <dir: north | south | east | west> <steps: %>?").unwrap();
    let captures = grammar.match_input("move north 3").unwrap();
    insta::assert_snapshot!(json(&captures), @r#"{"dir":"north","steps":"3"}"#);
}

#[test]
fn no_match_is_none() {
    let grammar = compile("'move' <dir: north | south>").unwrap();
    assert_eq!(grammar.match_input("move up").unwrap(), None);
}

#[test]
fn first_match_wins_with_partial_matching() {
    let grammar = compile("<x: 'a'> | <y: 'a' 'b'>").unwrap();
    insta::assert_snapshot!(json(&grammar.match_with("a b", &partial()).unwrap()), @r#"{"x":"a"}"#);
    assert_eq!(grammar.match_input("a b").unwrap(), None);
}

#[test]
fn entirety_narrows_partial() {
    let grammar = compile("% %?").unwrap();
    for input in ["", "a", "a b", "a b c"] {
        let full = grammar.match_input(input).unwrap();
        let part = grammar.match_with(input, &partial()).unwrap();
        if full.is_some() {
            assert_eq!(full, part, "{input}");
        }
    }
    assert!(grammar.match_input("a b c").unwrap().is_none());
    assert!(grammar.match_with("a b c", &partial()).unwrap().is_some());
}

#[test]
fn two_token_capture_is_structured() {
    let grammar = compile("<name: % %>").unwrap();
    let captures = grammar.match_input("John Smith").unwrap().unwrap();
    assert_eq!(captures["name"].texts(), ["John", "Smith"]);
    assert!(matches!(captures["name"], Value::List(_)));
}

#[test]
fn captured_spans_round_trip() {
    let grammar = compile("(<word: %> | <quoted: $>)+").unwrap();
    let input = r#"say "hello there" to 'the world' now"#;
    let captures = grammar.match_input(input).unwrap().unwrap();
    let mut texts: Vec<&str> = Vec::new();
    for value in captures.values() {
        texts.extend(value.texts());
    }
    texts.sort_unstable();
    let mut tokens: Vec<&str> = crate::tokenize(input).iter().map(|t| t.text).collect();
    tokens.sort_unstable();
    assert_eq!(texts, tokens);
}

#[test]
fn compiling_twice_behaves_the_same() {
    let src = "(<k: %> '=' <v: $> ','?)*";
    let first = compile(src).unwrap();
    let second = compile(src).unwrap();
    for input in ["a = 1, b = 2", "a =", "", "x = 'y z'"] {
        assert_eq!(first.match_input(input), second.match_input(input), "{input}");
    }
}

#[test]
fn definitions_rejected_when_disallowed() {
    let src = indoc! {"
        @laugh: 'ha' @laugh@? @@
        @lol: @laugh@ @laugh@ @@
        @lol@
    "};
    let options = CompileOptions::default().allow_sub_grammar_definitions(false);
    for _ in 0..3 {
        let Err(Error::GrammarCompile(diagnostics)) = compile_with(src, &options) else {
            panic!("expected a compile error");
        };
        assert_eq!(diagnostics.error_count(), 2);
        assert!(
            diagnostics
                .iter()
                .all(|d| d.kind() == DiagnosticKind::DefinitionNotAllowed)
        );
    }
    assert!(compile(src).is_ok());
}

#[test]
fn compile_error_message() {
    let err = compile("'a' @missing@").unwrap_err();
    insta::assert_snapshot!(err, @"grammar compilation failed with 1 errors");
    let Error::GrammarCompile(diagnostics) = err else {
        panic!("expected a compile error");
    };
    insta::assert_snapshot!(diagnostics.render("'a' @missing@"), @r"
    error: `missing` is not defined
      |
    1 | 'a' @missing@
      |      ^^^^^^^
    ");
}

#[test]
fn zero_progress_recursion_is_an_error() {
    let grammar = compile("@a: @a@ | 'x' @@ @a@").unwrap();
    assert_eq!(
        grammar.match_input("x"),
        Err(MatchSafetyError::ZeroProgressRecursion {
            name: "a".to_string(),
            position: 0,
        })
    );
}

#[test]
fn one_shot_helper() {
    let captures = match_input(
        "<greeting: hello | hi> <name: %>",
        "hi there",
        &MatchOptions::default(),
        &CompileOptions::default(),
    )
    .unwrap();
    insta::assert_snapshot!(json(&captures), @r#"{"greeting":"hi","name":"there"}"#);

    let err = match_input("@a@", "x", &MatchOptions::default(), &CompileOptions::default());
    assert!(matches!(err, Err(Error::GrammarCompile(_))));

    let err = match_input(
        "@a: @a@ | 'x' @@ @a@",
        "x",
        &MatchOptions::default(),
        &CompileOptions::default(),
    );
    assert!(matches!(err, Err(Error::MatchSafety(_))));
}

#[test]
fn match_fuel_option() {
    let grammar = compile("%*").unwrap();
    let options = MatchOptions::default().with_exec_fuel(3);
    assert_eq!(
        grammar.match_with("a b c d", &options),
        Err(MatchSafetyError::ExecFuelExhausted(3))
    );
}

#[test]
fn parser_fuel_is_fatal() {
    let deep = format!("{}'a'{}", "(".repeat(300), ")".repeat(300));
    assert!(matches!(compile(&deep), Err(Error::RecursionLimitExceeded)));

    let options = CompileOptions::default().with_recursion_fuel(None);
    assert!(compile_with(&deep, &options).is_ok());
}

#[test]
fn traced_match_agrees_with_plain() {
    let grammar = compile("<a: %> (',' <a: %>)*").unwrap();
    let mut tracer = PrintTracer::new(Verbosity::Verbose, Colors::OFF);
    let traced = grammar
        .match_traced("x, y", &MatchOptions::default(), &mut tracer)
        .unwrap();
    assert_eq!(traced, grammar.match_input("x, y").unwrap());
    assert!(!tracer.lines().is_empty());
}

#[test]
fn grammar_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Grammar>();
}
