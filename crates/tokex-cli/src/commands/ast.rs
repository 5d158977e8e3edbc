//! Show the syntax tree of a grammar.

use std::path::PathBuf;

use super::run_common;

pub struct AstArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub allow_definitions: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let source = run_common::load_grammar(args.grammar_path.as_deref(), args.grammar_text.as_deref());
    let options = run_common::compile_options(args.allow_definitions);
    let grammar = run_common::analyze(&source, &options);

    // Printed even when invalid
    print!(
        "{}",
        grammar
            .printer()
            .raw(args.raw)
            .with_spans(args.spans)
            .dump()
    );

    if !grammar.diagnostics().is_empty() {
        eprint!("{}", source.render(grammar.diagnostics(), args.color));
    }
    if !grammar.is_valid() {
        std::process::exit(1);
    }
}
