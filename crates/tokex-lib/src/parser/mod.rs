//! Parser infrastructure for the grammar language.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Checkpoint-based wrapping: alternations and quantifiers wrap what was already parsed
//!
//! # Recovery Strategy
//!
//! The parser is resilient and always produces a tree:
//!
//! 1. Unknown or misplaced tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume
//! 3. A closing token ends every sequence nested inside the construct it closes
//!
//! Fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod core_tests;
#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{
    Alt, AnyToken, Bare, Bounds, Capture, Def, Expr, Group, Pattern, Quantifier, Ref, Root, Seq,
    SingleChar, Str, WordClass,
};

pub use core::{ParseResult, Parser};

use crate::Error;

/// Parses grammar text with the given fuel limits.
pub fn parse(
    source: &str,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
) -> Result<ParseResult, Error> {
    Parser::new(source, lexer::lex(source))
        .with_exec_fuel(exec_fuel)
        .with_recursion_fuel(recursion_fuel)
        .parse()
}
