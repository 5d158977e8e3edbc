use std::path::PathBuf;

use super::run_common;

pub struct CheckArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub strict: bool,
    pub allow_definitions: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = run_common::load_grammar(args.grammar_path.as_deref(), args.grammar_text.as_deref());
    let options = run_common::compile_options(args.allow_definitions);
    let grammar = run_common::analyze(&source, &options);

    let diagnostics = grammar.diagnostics();
    let is_valid = if args.strict {
        !diagnostics.has_errors() && !diagnostics.has_warnings()
    } else {
        grammar.is_valid()
    };

    if !is_valid {
        eprint!("{}", source.render(diagnostics, args.color));
        std::process::exit(1);
    }

    // Warnings are shown but do not fail without --strict
    if diagnostics.has_warnings() {
        eprint!("{}", source.render(diagnostics, args.color));
    }
}
