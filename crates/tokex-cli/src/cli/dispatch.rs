//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` pulls the fields a command uses and ignores hidden ones
//! - `From<*Params>` impls bridge dispatch to the command handlers
//! - exec/trace shift a lone positional to the input when `-g` is given

use std::path::PathBuf;

use clap::ArgMatches;
use tokex_lib::engine::Verbosity;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::exec::ExecArgs;
use crate::commands::tokens::TokensArgs;
use crate::commands::trace::TraceArgs;

pub struct AstParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub no_definitions: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
            no_definitions: m.get_flag("no_definitions"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            raw: p.raw,
            spans: p.spans,
            allow_definitions: !p.no_definitions,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub strict: bool,
    pub no_definitions: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            strict: m.get_flag("strict"),
            no_definitions: m.get_flag("no_definitions"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            strict: p.strict,
            allow_definitions: !p.no_definitions,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub no_definitions: bool,
    pub color: ColorChoice,
    // input, matching, trace and tree flags are parsed but not extracted
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            no_definitions: m.get_flag("no_definitions"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            allow_definitions: !p.no_definitions,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TokensParams {
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub spans: bool,
    pub color: ColorChoice,
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input_path: m.get_one::<PathBuf>("input_path").cloned(),
            input_text: m.get_one::<String>("input_text").cloned(),
            spans: m.get_flag("spans"),
            color: parse_color(m),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            input_path: p.input_path,
            input_text: p.input_text,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ExecParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub no_definitions: bool,
    pub partial: bool,
    pub fuel: u32,
    pub compact: bool,
    pub color: ColorChoice,
    // verbose and no_result are parsed but not extracted
}

impl ExecParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let grammar_path = m.get_one::<PathBuf>("grammar_path").cloned();
        let grammar_text = m.get_one::<String>("grammar_text").cloned();
        let input_path = m.get_one::<PathBuf>("input_path").cloned();

        let (grammar_path, input_path) =
            shift_positional_to_input(grammar_text.is_some(), grammar_path, input_path);

        Self {
            grammar_path,
            grammar_text,
            input_path,
            input_text: m.get_one::<String>("input_text").cloned(),

            // Matching options
            no_definitions: m.get_flag("no_definitions"),
            partial: m.get_flag("partial"),
            fuel: parse_fuel(m),

            // Output options
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<ExecParams> for ExecArgs {
    fn from(p: ExecParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            input_path: p.input_path,
            input_text: p.input_text,
            allow_definitions: !p.no_definitions,
            partial: p.partial,
            fuel: p.fuel,
            pretty,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub no_definitions: bool,
    pub partial: bool,
    pub fuel: u32,
    pub verbose: u8,
    pub no_result: bool,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let grammar_path = m.get_one::<PathBuf>("grammar_path").cloned();
        let grammar_text = m.get_one::<String>("grammar_text").cloned();
        let input_path = m.get_one::<PathBuf>("input_path").cloned();

        let (grammar_path, input_path) =
            shift_positional_to_input(grammar_text.is_some(), grammar_path, input_path);

        Self {
            grammar_path,
            grammar_text,
            input_path,
            input_text: m.get_one::<String>("input_text").cloned(),

            // Matching options
            no_definitions: m.get_flag("no_definitions"),
            partial: m.get_flag("partial"),
            fuel: parse_fuel(m),

            // Trace options
            verbose: m.get_count("verbose"),
            no_result: m.get_flag("no_result"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            input_path: p.input_path,
            input_text: p.input_text,
            allow_definitions: !p.no_definitions,
            partial: p.partial,
            fuel: p.fuel,
            verbosity,
            no_result: p.no_result,
            color: p.color.should_colorize(),
        }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_fuel(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("fuel")
        .copied()
        .unwrap_or(tokex_lib::engine::DEFAULT_EXEC_FUEL)
}

/// When -g is used with a single positional arg, shift it from grammar to input.
/// This enables: `tokex exec -g 'grammar' line.txt`
fn shift_positional_to_input(
    has_grammar_text: bool,
    grammar_path: Option<PathBuf>,
    input_path: Option<PathBuf>,
) -> (Option<PathBuf>, Option<PathBuf>) {
    if has_grammar_text && grammar_path.is_some() && input_path.is_none() {
        (None, grammar_path)
    } else {
        (grammar_path, input_path)
    }
}
