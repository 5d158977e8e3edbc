//! Lexer for the grammar language.
//!
//! Tokens carry only a kind and a span; text is sliced from the source on demand.
//! Runs of unrecognized characters become a single `Garbage` token, so an
//! unterminated string or regex surfaces as one error instead of many.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::cst::SyntaxKind;

/// Span token: kind + range, text retrieved via [`token_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes grammar source.
///
/// Beyond what logos produces, this:
/// - merges consecutive lexer errors into `Garbage`
/// - splits each `StringLiteral` into quote, `StrVal`, quote
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut garbage_start: Option<usize> = None;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let Ok(kind) = result else {
            garbage_start.get_or_insert(span.start);
            continue;
        };

        if let Some(start) = garbage_start.take() {
            tokens.push(Token::new(SyntaxKind::Garbage, text_range(start..span.start)));
        }

        if kind == SyntaxKind::StringLiteral {
            split_string_literal(source, span, &mut tokens);
        } else {
            tokens.push(Token::new(kind, text_range(span)));
        }
    }

    if let Some(start) = garbage_start {
        tokens.push(Token::new(SyntaxKind::Garbage, text_range(start..source.len())));
    }

    tokens
}

fn split_string_literal(source: &str, span: Range<usize>, tokens: &mut Vec<Token>) {
    let quote_kind = if source.as_bytes()[span.start] == b'"' {
        SyntaxKind::DoubleQuote
    } else {
        SyntaxKind::SingleQuote
    };

    let Range { start, end } = span;
    tokens.push(Token::new(quote_kind, text_range(start..start + 1)));
    if end - start > 2 {
        tokens.push(Token::new(SyntaxKind::StrVal, text_range(start + 1..end - 1)));
    }
    tokens.push(Token::new(quote_kind, text_range(end - 1..end)));
}

/// Slices the text of `token` out of `source`.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[Range::<usize>::from(token.span)]
}
