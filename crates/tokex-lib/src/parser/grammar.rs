//! Grammar productions.
//!
//! All `parse_*` methods extend `Parser`. Every production that can nest goes
//! through `parse_body`, which charges recursion fuel.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{CLOSERS, PRIMARY_FIRST, QUANTIFIERS};

impl Parser<'_> {
    pub(crate) fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);
        self.parse_alternation();
        self.eat_trivia();
        self.finish_node();
        self.assert_delimiters_closed();
    }

    /// `sequence ('|' sequence)*`. Wraps in `Alt` only when a `|` is present.
    fn parse_alternation(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_sequence();
        if !self.currently_is(SyntaxKind::Pipe) {
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::Alt);
        while self.eat_token(SyntaxKind::Pipe) {
            self.parse_sequence();
        }
        self.finish_node();
    }

    /// Items up to `|`, EOF, or a token that closes an open construct.
    fn parse_sequence(&mut self) {
        self.start_node(SyntaxKind::Seq);
        while !self.should_stop() {
            let kind = self.current();
            if kind == SyntaxKind::Pipe {
                break;
            }
            if CLOSERS.contains(kind) {
                if self.closes_open_delimiter(kind) {
                    break;
                }
                let text = self.current_text();
                let detail = format!("unmatched `{text}`");
                self.error_and_skip(DiagnosticKind::UnexpectedToken, Some(&detail));
                continue;
            }
            if PRIMARY_FIRST.contains(kind) {
                self.parse_item();
                continue;
            }
            if QUANTIFIERS.contains(kind) {
                self.error_and_skip(
                    DiagnosticKind::ExpectedExpression,
                    Some("quantifier has nothing to repeat"),
                );
                continue;
            }
            if kind == SyntaxKind::Garbage {
                self.error_garbage();
                continue;
            }
            self.error_and_skip(DiagnosticKind::UnexpectedToken, None);
        }
        self.finish_node();
    }

    fn parse_item(&mut self) {
        let is_definition = self.currently_is(SyntaxKind::At)
            && (self.peek_nth(1) == SyntaxKind::Colon || self.peek_nth(2) == SyntaxKind::Colon);
        if is_definition {
            self.parse_definition();
        } else {
            self.parse_postfix();
        }
    }

    /// Nested alternation, charged against recursion fuel.
    fn parse_body(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        self.parse_alternation();
        self.exit_recursion();
    }

    /// `@name: alternation @@`
    fn parse_definition(&mut self) {
        self.assert_current(SyntaxKind::At);
        self.start_node(SyntaxKind::Def);
        let open = self.current_span();
        self.push_delimiter(SyntaxKind::DoubleAt);
        self.bump();

        self.parse_name();
        self.expect(SyntaxKind::Colon, "`:` after definition name");
        self.parse_body();

        self.pop_delimiter();
        if !self.eat_token(SyntaxKind::DoubleAt) {
            self.error_unclosed(
                DiagnosticKind::UnclosedDefinition,
                "definition started here",
                open,
            );
        }
        self.finish_node();
    }

    /// Primary followed by any number of quantifiers; each wraps what came before.
    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary();
        while !self.has_fatal_error() && self.currently_is_one_of(QUANTIFIERS) {
            self.start_node_at(checkpoint, SyntaxKind::Quantifier);
            if self.currently_is(SyntaxKind::BraceOpen) {
                self.parse_bounds();
            } else {
                self.bump();
            }
            self.finish_node();
        }
    }

    /// `{n}` | `{n,}` | `{,m}` | `{n,m}`. Numbers are validated during lowering.
    fn parse_bounds(&mut self) {
        self.start_node(SyntaxKind::Bounds);
        let open = self.current_span();
        self.bump();
        self.eat_token(SyntaxKind::Id);
        if self.eat_token(SyntaxKind::Comma) {
            self.eat_token(SyntaxKind::Id);
        }
        if !self.eat_token(SyntaxKind::BraceClose) {
            self.error_unclosed(
                DiagnosticKind::UnclosedRepeatBounds,
                "bounds started here",
                open,
            );
        }
        self.finish_node();
    }

    fn parse_primary(&mut self) {
        match self.current() {
            SyntaxKind::ParenOpen => self.parse_group(),
            SyntaxKind::AngleOpen => self.parse_capture(),
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote => self.parse_str(),
            SyntaxKind::RegexLiteral => self.parse_leaf(SyntaxKind::Pattern),
            SyntaxKind::Id => self.parse_leaf(SyntaxKind::Bare),
            SyntaxKind::Dollar => self.parse_leaf(SyntaxKind::AnyToken),
            SyntaxKind::Percent => self.parse_leaf(SyntaxKind::WordClass),
            SyntaxKind::Dot => self.parse_leaf(SyntaxKind::SingleChar),
            SyntaxKind::At => self.parse_ref(),
            _ => self.error(DiagnosticKind::ExpectedExpression, None),
        }
    }

    fn parse_leaf(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    fn parse_str(&mut self) {
        let quote = self.current();
        self.start_node(SyntaxKind::Str);
        self.bump();
        self.eat_token(SyntaxKind::StrVal);
        self.expect(quote, "closing quote");
        self.finish_node();
    }

    /// `( alternation )`
    fn parse_group(&mut self) {
        self.assert_current(SyntaxKind::ParenOpen);
        self.start_node(SyntaxKind::Group);
        let open = self.current_span();
        self.push_delimiter(SyntaxKind::ParenClose);
        self.bump();

        self.parse_body();

        self.pop_delimiter();
        if !self.eat_token(SyntaxKind::ParenClose) {
            self.error_unclosed(DiagnosticKind::UnclosedGroup, "group started here", open);
        }
        self.finish_node();
    }

    /// `< name : alternation >`
    fn parse_capture(&mut self) {
        self.assert_current(SyntaxKind::AngleOpen);
        self.start_node(SyntaxKind::Capture);
        let open = self.current_span();
        self.push_delimiter(SyntaxKind::AngleClose);
        self.bump();

        self.parse_name();
        self.expect(SyntaxKind::Colon, "`:` after capture name");
        self.parse_body();

        self.pop_delimiter();
        if !self.eat_token(SyntaxKind::AngleClose) {
            self.error_unclosed(
                DiagnosticKind::UnclosedCapture,
                "capture started here",
                open,
            );
        }
        self.finish_node();
    }

    /// `@ name @`
    fn parse_ref(&mut self) {
        self.assert_current(SyntaxKind::At);
        self.start_node(SyntaxKind::Ref);
        self.bump();
        self.parse_name();
        if !self.eat_token(SyntaxKind::At) {
            if self.currently_is(SyntaxKind::DoubleAt) {
                self.error(
                    DiagnosticKind::UnexpectedToken,
                    Some("`@@` directly after a reference name; separate the closing `@` with a space"),
                );
            } else {
                self.error(
                    DiagnosticKind::UnexpectedToken,
                    Some("expected `@` to close the reference"),
                );
            }
        }
        self.finish_node();
    }

    /// Names share the `Id` token with bare words but may not start with a digit.
    fn parse_name(&mut self) {
        if !self.currently_is(SyntaxKind::Id) {
            self.error(DiagnosticKind::ExpectedName, None);
            return;
        }
        let text = self.current_text();
        if text.starts_with(|c: char| c.is_ascii_digit()) {
            let range = self.current_span();
            self.error_at(DiagnosticKind::InvalidName, range, text);
        }
        self.bump();
    }

    fn error_garbage(&mut self) {
        let detail = match self.current_text().chars().next() {
            Some('"' | '\'') => "unterminated string literal",
            Some('~') => "unterminated regex",
            _ => "unrecognized characters",
        };
        self.error_and_skip(DiagnosticKind::UnexpectedToken, Some(detail));
    }
}
