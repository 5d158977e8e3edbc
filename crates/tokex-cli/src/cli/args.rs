//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that commands compose, visible or
//! hidden via `.hide(true)`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Grammar file (positional).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("GRAMMAR")
        .value_parser(value_parser!(PathBuf))
        .help("Grammar file, or - for stdin")
}

/// Inline grammar text (-g/--grammar).
pub fn grammar_text_arg() -> Arg {
    Arg::new("grammar_text")
        .short('g')
        .long("grammar")
        .value_name("TEXT")
        .help("Inline grammar text")
}

/// Input file to match (positional).
pub fn input_path_arg() -> Arg {
    Arg::new("input_path")
        .value_name("INPUT")
        .value_parser(value_parser!(PathBuf))
        .help("Input file, or - for stdin")
}

/// Inline input text (-i/--input).
pub fn input_text_arg() -> Arg {
    Arg::new("input_text")
        .short('i')
        .long("input")
        .value_name("TEXT")
        .help("Inline input text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Show the concrete syntax tree (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Show the concrete syntax tree, punctuation included")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Reject `@name: ... @@` definitions (--no-definitions).
pub fn no_definitions_arg() -> Arg {
    Arg::new("no_definitions")
        .long("no-definitions")
        .action(ArgAction::SetTrue)
        .help("Reject sub-grammar definitions (for untrusted grammars)")
}

/// Accept matches that leave tokens over (--partial).
pub fn partial_arg() -> Arg {
    Arg::new("partial")
        .long("partial")
        .action(ArgAction::SetTrue)
        .help("Accept a match that does not consume the whole input")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for verbose, -vv for very verbose)")
}

/// Skip printing captures (--no-result).
pub fn no_result_arg() -> Arg {
    Arg::new("no_result")
        .long("no-result")
        .action(ArgAction::SetTrue)
        .help("Show the trace only, without captures")
}

/// Matcher step limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Matcher step limit")
}
