//! Tokex: declarative token-pattern grammars.
//!
//! A grammar is compiled once and then matched against any number of input
//! strings. A successful match yields the named captures.
//!
//! # Example
//!
//! ```
//! let grammar = tokex_lib::compile("'move' <dir: north | south> <steps: %>?").expect("valid grammar");
//!
//! let captures = grammar.match_input("move north 3").expect("no safety error");
//! let captures = captures.expect("input matches");
//! assert_eq!(captures["dir"].as_token(), Some("north"));
//! assert_eq!(captures["steps"].as_token(), Some("3"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod colors;
pub mod diagnostics;
pub mod engine;
pub mod grammar;
mod options;
pub mod parser;
pub mod tokenizer;

#[cfg(test)]
mod facade_tests;

pub use colors::Colors;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use engine::{Captures, MatchResult, MatchSafetyError, Value, WHOLE_MATCH};
pub use grammar::{AnalyzedGrammar, CompiledGrammar, GrammarNode};
pub use options::{CompileOptions, MatchOptions};
pub use tokenizer::{Token, tokenize};

use engine::{Matcher, NoopTracer, Tracer};

/// Errors that can occur while compiling a grammar.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The grammar text has errors; the diagnostics describe each one.
    #[error("grammar compilation failed with {} errors", .0.error_count())]
    GrammarCompile(Diagnostics),

    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (grammar nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error(transparent)]
    MatchSafety(#[from] MatchSafetyError),
}

/// Result type for grammar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A compiled grammar, reusable across any number of matches.
#[derive(Debug, Clone)]
pub struct Grammar {
    compiled: CompiledGrammar,
}

impl Grammar {
    pub fn compile(text: &str) -> Result<Self> {
        Self::compile_with(text, &CompileOptions::default())
    }

    pub fn compile_with(text: &str, options: &CompileOptions) -> Result<Self> {
        let compiled = grammar::analyze(text, options)?.into_compiled()?;
        Ok(Self { compiled })
    }

    /// Wraps a tree produced by [`grammar::analyze`] that is already known to be valid.
    pub fn from_compiled(compiled: CompiledGrammar) -> Self {
        Self { compiled }
    }

    pub fn compiled(&self) -> &CompiledGrammar {
        &self.compiled
    }

    /// Matches the whole input. `Ok(None)` means no match.
    pub fn match_input(&self, input: &str) -> std::result::Result<Option<Captures>, MatchSafetyError> {
        self.match_with(input, &MatchOptions::default())
    }

    pub fn match_with(
        &self,
        input: &str,
        options: &MatchOptions,
    ) -> std::result::Result<Option<Captures>, MatchSafetyError> {
        self.match_traced(input, options, &mut NoopTracer)
    }

    pub fn match_traced<T: Tracer>(
        &self,
        input: &str,
        options: &MatchOptions,
        tracer: &mut T,
    ) -> std::result::Result<Option<Captures>, MatchSafetyError> {
        let tokens = tokenize(input);
        let result = self.run(&tokens, options, tracer)?;
        let accepted = !options.match_entirety || result.end == tokens.len();
        if !accepted {
            return Ok(None);
        }
        Ok(result.into_whole_match())
    }

    /// Runs the matcher over already tokenized input, starting at the first token.
    pub fn run<T: Tracer>(
        &self,
        tokens: &[Token<'_>],
        options: &MatchOptions,
        tracer: &mut T,
    ) -> std::result::Result<MatchResult, MatchSafetyError> {
        Matcher::new(&self.compiled, tokens)
            .with_exec_fuel(options.exec_fuel)
            .with_recursion_fuel(options.recursion_fuel)
            .run_with(0, tracer)
    }
}

/// Compiles a grammar with default options.
pub fn compile(text: &str) -> Result<Grammar> {
    Grammar::compile(text)
}

pub fn compile_with(text: &str, options: &CompileOptions) -> Result<Grammar> {
    Grammar::compile_with(text, options)
}

/// Compiles `grammar` and matches `input` in one go.
pub fn match_input(
    grammar: &str,
    input: &str,
    match_options: &MatchOptions,
    compile_options: &CompileOptions,
) -> Result<Option<Captures>> {
    let grammar = Grammar::compile_with(grammar, compile_options)?;
    Ok(grammar.match_with(input, match_options)?)
}
