//! Input tokenizer.
//!
//! A single leftmost-first alternation: double-quoted span, single-quoted span,
//! run of word characters, then any other non-whitespace character. Whitespace
//! between matches is skipped. Quoted spans keep their quotes.

use std::ops::Range;
use std::sync::LazyLock;

use regex_automata::meta::Regex;
use serde::Serialize;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""[^"]*"|'[^']*'|\w+|\S"#).expect("tokenizer regex is valid")
});

/// A slice of the input plus its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub text: &'a str,
    pub span: (usize, usize),
}

impl<'a> Token<'a> {
    pub fn range(&self) -> Range<usize> {
        self.span.0..self.span.1
    }
}

/// Splits `input` into tokens. Total: every input produces a (possibly empty) list.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    TOKEN
        .find_iter(input)
        .map(|m| Token {
            text: &input[m.range()],
            span: (m.start(), m.end()),
        })
        .collect()
}

#[cfg(test)]
#[path = "tokenizer_tests.rs"]
mod tests;
