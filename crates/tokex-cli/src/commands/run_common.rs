//! Shared logic for the commands that compile a grammar.

use std::path::Path;

use tokex_lib::grammar::AnalyzedGrammar;
use tokex_lib::{CompileOptions, Grammar, MatchOptions};

use super::grammar_loader::{self, GrammarSource, LoadError};

pub fn compile_options(allow_definitions: bool) -> CompileOptions {
    CompileOptions::new().allow_sub_grammar_definitions(allow_definitions)
}

pub fn match_options(partial: bool, fuel: u32) -> MatchOptions {
    MatchOptions::new()
        .match_entirety(!partial)
        .with_exec_fuel(fuel)
}

/// Load the grammar or exit with status 1.
pub fn load_grammar(grammar_path: Option<&Path>, grammar_text: Option<&str>) -> GrammarSource {
    grammar_loader::load_grammar(grammar_path, grammar_text).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}

/// Run every compile stage, exiting with status 1 when the parser runs out of fuel.
pub fn analyze<'s>(source: &'s GrammarSource, options: &CompileOptions) -> AnalyzedGrammar<'s> {
    source.analyze(options).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}

/// Compile a grammar for matching. Errors exit with status 1; warnings go to stderr.
pub fn compile(source: &GrammarSource, options: &CompileOptions, color: bool) -> Grammar {
    let analyzed = analyze(source, options);
    let diagnostics = analyzed.diagnostics();

    if !analyzed.is_valid() {
        eprint!("{}", source.render(diagnostics, color));
        std::process::exit(1);
    }
    if diagnostics.has_warnings() {
        eprint!("{}", source.render(diagnostics, color));
    }

    match analyzed.into_compiled() {
        Ok(compiled) => Grammar::from_compiled(compiled),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Load the input text from a file, stdin or inline text.
pub fn load_input(
    input_text: Option<&str>,
    input_path: Option<&Path>,
    grammar_path: Option<&Path>,
) -> Result<String, LoadError> {
    if let Some(text) = input_text {
        return Ok(text.to_owned());
    }

    let Some(path) = input_path else {
        return Err(LoadError::MissingInput);
    };

    if path.as_os_str() == "-" {
        if grammar_path.is_some_and(|p| p.as_os_str() == "-") {
            return Err(LoadError::StdinTwice);
        }
        return grammar_loader::read_stdin();
    }
    grammar_loader::read_file(path)
}

/// Load the input or exit with status 1.
pub fn load_input_or_exit(
    input_text: Option<&str>,
    input_path: Option<&Path>,
    grammar_path: Option<&Path>,
) -> String {
    load_input(input_text, input_path, grammar_path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}
