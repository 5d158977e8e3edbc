//! Trace matching for debugging.

use std::path::PathBuf;

use tokex_lib::Colors;
use tokex_lib::engine::{PrintTracer, Verbosity};

use super::run_common;

pub struct TraceArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub allow_definitions: bool,
    pub partial: bool,
    pub fuel: u32,
    pub verbosity: Verbosity,
    pub no_result: bool,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
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

    let colors = Colors::new(args.color);
    let mut tracer = PrintTracer::new(args.verbosity, colors);

    let captures = match grammar.match_traced(&input, &options, &mut tracer) {
        Ok(Some(captures)) => {
            tracer.print();
            captures
        }
        Ok(None) => {
            tracer.print();
            std::process::exit(1);
        }
        Err(e) => {
            tracer.print();
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    if args.no_result {
        return;
    }

    println!("{}---{}", colors.dim, colors.reset);
    match serde_json::to_string_pretty(&captures) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: JSON serialization failed: {}", e);
            std::process::exit(1);
        }
    }
}
