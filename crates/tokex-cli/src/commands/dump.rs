use std::path::PathBuf;

use super::run_common;

pub struct DumpArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub allow_definitions: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let source = run_common::load_grammar(args.grammar_path.as_deref(), args.grammar_text.as_deref());
    let options = run_common::compile_options(args.allow_definitions);
    let grammar = run_common::compile(&source, &options, args.color);

    print!("{}", grammar.compiled().printer().colored(args.color).dump());
}
