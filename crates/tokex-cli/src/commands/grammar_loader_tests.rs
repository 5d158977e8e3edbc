use std::io::Write;
use std::path::Path;

use super::grammar_loader::{GrammarSource, LoadError, load_grammar};
use super::run_common::{compile_options, load_input, match_options};

#[test]
fn inline_grammar_wins_over_path() {
    let source = load_grammar(Some(Path::new("missing.tokex")), Some("'go' %")).unwrap();
    assert_eq!(source, GrammarSource::inline("'go' %"));
    assert_eq!(source.path, None);
}

#[test]
fn grammar_is_required() {
    let err = load_grammar(None, None).unwrap_err();
    assert!(matches!(err, LoadError::MissingGrammar));
    assert_eq!(
        err.to_string(),
        "grammar is required: use positional argument or -g/--grammar"
    );
}

#[test]
fn grammar_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "'go' <d: north | south>").unwrap();

    let source = load_grammar(Some(file.path()), None).unwrap();
    assert_eq!(source.text, "'go' <d: north | south>");
    assert_eq!(
        source.path,
        Some(file.path().to_string_lossy().into_owned())
    );
}

#[test]
fn missing_grammar_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.tokex");

    let err = load_grammar(Some(path.as_path()), None).unwrap_err();
    let msg = err.to_string();
    assert!(matches!(err, LoadError::File { .. }));
    assert!(
        msg.starts_with(&format!("failed to read '{}': ", path.display())),
        "{msg}"
    );
}

#[test]
fn render_points_at_path() {
    let source = GrammarSource {
        text: "'a' @missing@".to_owned(),
        path: Some("cmd.tokex".to_owned()),
    };
    let grammar = source.analyze(&compile_options(true)).unwrap();

    insta::assert_snapshot!(source.render(grammar.diagnostics(), false), @r"
    error: `missing` is not defined
     --> cmd.tokex:1:6
      |
    1 | 'a' @missing@
      |      ^^^^^^^
    ");
}

#[test]
fn render_inline_has_no_path() {
    let source = GrammarSource::inline("'a' @missing@");
    let grammar = source.analyze(&compile_options(true)).unwrap();

    insta::assert_snapshot!(source.render(grammar.diagnostics(), false), @r"
    error: `missing` is not defined
      |
    1 | 'a' @missing@
      |      ^^^^^^^
    ");
}

#[test]
fn definitions_follow_option() {
    let source = GrammarSource::inline("@a: x @@ @a@");

    let allowed = source.analyze(&compile_options(true)).unwrap();
    assert!(allowed.is_valid());

    let rejected = source.analyze(&compile_options(false)).unwrap();
    assert!(!rejected.is_valid());
}

#[test]
fn inline_input() {
    let input = load_input(Some("go north"), Some(Path::new("ignored.txt")), None).unwrap();
    assert_eq!(input, "go north");
}

#[test]
fn input_is_required() {
    let err = load_input(None, None, None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "input is required: use positional argument or -i/--input"
    );
}

#[test]
fn input_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "go north").unwrap();

    let input = load_input(None, Some(file.path()), Some(Path::new("cmd.tokex"))).unwrap();
    assert_eq!(input, "go north\n");
}

#[test]
fn grammar_and_input_cannot_share_stdin() {
    let err = load_input(None, Some(Path::new("-")), Some(Path::new("-"))).unwrap_err();
    assert!(matches!(err, LoadError::StdinTwice));
}

#[test]
fn match_options_from_flags() {
    let options = match_options(true, 7);
    assert!(!options.match_entirety);
    assert_eq!(options.exec_fuel, 7);

    assert!(match_options(false, 1).match_entirety);
}

#[test]
fn loaded_grammar_matches_input() {
    let source = GrammarSource::inline("'go' <d: north | south>");
    let compiled = source
        .analyze(&compile_options(true))
        .unwrap()
        .into_compiled()
        .unwrap();
    let grammar = tokex_lib::Grammar::from_compiled(compiled);

    let captures = grammar
        .match_with("go south", &match_options(false, 1_000))
        .unwrap()
        .unwrap();
    insta::assert_snapshot!(serde_json::to_string(&captures).unwrap(), @r#"{"d":"south"}"#);
}

#[test]
fn blank_grammar_matches_blank_input() {
    let source = load_grammar(None, Some("  # nothing\n")).unwrap();
    let analyzed = source.analyze(&compile_options(true)).unwrap();
    assert!(analyzed.is_valid());
    let grammar = tokex_lib::Grammar::from_compiled(analyzed.into_compiled().unwrap());

    let options = match_options(false, 1_000);
    let captures = grammar.match_with("", &options).unwrap().unwrap();
    insta::assert_snapshot!(serde_json::to_string(&captures).unwrap(), @"{}");
    assert_eq!(grammar.match_with("go", &options), Ok(None));
}
