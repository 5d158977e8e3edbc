//! Command builders for the CLI.
//!
//! Every command accepts the full flag set so that switching between
//! `ast`, `dump`, `exec` and `trace` never requires editing the rest of the
//! command line. Flags a command ignores are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden input args (for commands that never read input).
fn with_hidden_input_args(cmd: Command) -> Command {
    cmd.arg(input_path_arg().hide(true))
        .arg(input_text_arg().hide(true))
}

/// Add hidden matching args (for commands that never match).
fn with_hidden_match_args(cmd: Command) -> Command {
    cmd.arg(partial_arg().hide(true))
        .arg(fuel_arg().hide(true))
        .arg(compact_arg().hide(true))
}

/// Add hidden trace args (for commands that don't trace).
fn with_hidden_trace_args(cmd: Command) -> Command {
    cmd.arg(verbose_arg().hide(true))
        .arg(no_result_arg().hide(true))
}

/// Add hidden syntax tree args (for commands that don't print the tree).
fn with_hidden_ast_args(cmd: Command) -> Command {
    cmd.arg(raw_arg().hide(true)).arg(spans_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("tokex")
        .about("Declarative token grammars for structured lines")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(ast_command())
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(tokens_command())
        .subcommand(exec_command())
        .subcommand(trace_command())
}

/// Show the syntax tree of a grammar.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Show the syntax tree of a grammar")
        .override_usage(
            "\
  tokex ast <GRAMMAR>
  tokex ast -g <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  tokex ast cmd.tokex                 # typed tree
  tokex ast cmd.tokex --raw           # concrete tree, punctuation included
  tokex ast -g "'go' <d: %>" --spans  # inline grammar with positions"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(no_definitions_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_trace_args(with_hidden_match_args(with_hidden_input_args(cmd)))
}

/// Validate a grammar.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a grammar")
        .override_usage(
            "\
  tokex check <GRAMMAR>
  tokex check -g <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  tokex check cmd.tokex                   # silent when valid
  tokex check cmd.tokex --strict          # warnings fail too
  tokex check -g '@a: x @@ @a@' --no-definitions"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(strict_arg())
        .arg(no_definitions_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_ast_args(with_hidden_trace_args(with_hidden_match_args(
        with_hidden_input_args(cmd),
    )))
}

/// Show the compiled pattern tree.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the compiled pattern tree and sub-grammar table")
        .override_usage(
            "\
  tokex dump <GRAMMAR>
  tokex dump -g <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  tokex dump cmd.tokex
  tokex dump -g "'go' <d: north | south>""#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(no_definitions_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_ast_args(with_hidden_trace_args(with_hidden_match_args(
        with_hidden_input_args(cmd),
    )))
}

/// Show how an input splits into tokens.
pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("Show how an input splits into tokens")
        .override_usage(
            "\
  tokex tokens <INPUT>
  tokex tokens -i <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  tokex tokens line.txt
  tokex tokens -i 'say "hello there" twice'"#,
        )
        .arg(input_path_arg())
        .arg(input_text_arg())
        .arg(spans_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_trace_args(with_hidden_match_args(
        cmd.arg(raw_arg().hide(true))
            .arg(grammar_text_arg().hide(true))
            .arg(no_definitions_arg().hide(true)),
    ))
}

/// Match input against a grammar and output the captures as JSON.
pub fn exec_command() -> Command {
    let cmd = Command::new("exec")
        .about("Match input against a grammar and output the captures as JSON")
        .override_usage(
            "\
  tokex exec <GRAMMAR> <INPUT>
  tokex exec -g <TEXT> <INPUT>
  tokex exec -g <TEXT> -i <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  tokex exec cmd.tokex line.txt               # two positional files
  tokex exec -g "'go' <d: %>" -i 'go north'   # all inline
  tokex exec cmd.tokex -i 'go north now' --partial

EXIT STATUS:
  0 match, 1 no match or invalid grammar, 2 matcher safety error"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(grammar_text_arg())
        .arg(input_text_arg())
        .arg(no_definitions_arg())
        .arg(partial_arg())
        .arg(fuel_arg())
        .arg(compact_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_ast_args(with_hidden_trace_args(cmd))
}

/// Trace matching step by step.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace matching for debugging")
        .override_usage(
            "\
  tokex trace <GRAMMAR> <INPUT>
  tokex trace -g <TEXT> <INPUT>
  tokex trace -g <TEXT> -i <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  tokex trace cmd.tokex line.txt
  tokex trace -g "'go' <d: %>" -i 'go north' -vv
  tokex trace cmd.tokex -i 'go north' --no-result"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(grammar_text_arg())
        .arg(input_text_arg())
        .arg(no_definitions_arg())
        .arg(partial_arg())
        .arg(fuel_arg())
        .arg(verbose_arg())
        .arg(no_result_arg())
        .arg(color_arg());

    // Hidden unified flags (exec output only)
    with_hidden_ast_args(cmd.arg(compact_arg().hide(true)))
}
