use std::path::PathBuf;

use super::run_common;

pub struct ExecArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub allow_definitions: bool,
    pub partial: bool,
    pub fuel: u32,
    pub pretty: bool,
    pub color: bool,
}

pub fn run(args: ExecArgs) {
    let source = run_common::load_grammar(args.grammar_path.as_deref(), args.grammar_text.as_deref());
    let input = run_common::load_input_or_exit(
        args.input_text.as_deref(),
        args.input_path.as_deref(),
        args.grammar_path.as_deref(),
    );

    let grammar = run_common::compile(
        &source,
        &run_common::compile_options(args.allow_definitions),
        args.color,
    );
    let options = run_common::match_options(args.partial, args.fuel);

    let captures = match grammar.match_with(&input, &options) {
        Ok(Some(captures)) => captures,
        Ok(None) => {
            eprintln!("no match");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&captures)
    } else {
        serde_json::to_string(&captures)
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: JSON serialization failed: {}", e);
            std::process::exit(1);
        }
    }
}
