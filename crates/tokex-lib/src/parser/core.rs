//! Parser state: token cursor, tree builder, fuel and error reporting.

use rowan::{Checkpoint, GreenNodeBuilder, TextRange, TextSize};

use super::ast::Root;
use super::cst::{SyntaxKind, SyntaxNode, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
}

/// An opened `(`, `<`, `{` or definition, with the token that closes it.
#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub closer: SyntaxKind,
    pub span: TextRange,
}

/// Step and nesting limits. `None` means unbounded.
#[derive(Debug, Default)]
struct Fuel {
    steps_left: Option<u32>,
    depth: u32,
    max_depth: Option<u32>,
}

impl Fuel {
    fn burn_step(&mut self) -> Result<(), Error> {
        match &mut self.steps_left {
            Some(0) => Err(Error::ExecFuelExhausted),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn descend(&mut self) -> Result<(), Error> {
        if self.max_depth.is_some_and(|max| self.depth >= max) {
            return Err(Error::RecursionLimitExceeded);
        }
        self.depth += 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Trivia between tokens is held back until the next node or token is
/// emitted, so it attaches to the outer node rather than a fresh child.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    pending_trivia: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    fuel: Fuel,
    /// First fuel failure; parsing winds down once set.
    halted: Option<Error>,
    last_error_at: Option<TextSize>,
    pub(super) open: Vec<OpenDelimiter>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            pending_trivia: Vec::new(),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            fuel: Fuel::default(),
            halted: None,
            last_error_at: None,
            open: Vec::new(),
        }
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.fuel.steps_left = limit;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.fuel.max_depth = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_root();
        self.flush_trivia();
        if let Some(err) = self.halted {
            return Err(err);
        }
        let cst = SyntaxNode::new_root(self.builder.finish());
        let root = Root::cast(cst).expect("parser always produces Root");
        Ok(ParseResult {
            root,
            diagnostics: self.diagnostics,
        })
    }

    fn halt(&mut self, err: Error) {
        if self.halted.is_none() {
            self.halted = Some(err);
        }
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.halted.is_some()
    }

    // === Cursor ===

    fn skip_trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.pos)
            && token.kind.is_trivia()
        {
            self.pending_trivia.push(token);
            self.pos += 1;
        }
    }

    fn at_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        self.tokens.get(self.pos).copied()
    }

    pub(super) fn current(&mut self) -> SyntaxKind {
        self.at_token().map_or(SyntaxKind::Error, |t| t.kind)
    }

    /// Empty at end of input.
    pub(super) fn current_span(&mut self) -> TextRange {
        let end = TextSize::of(self.source);
        self.at_token().map_or(TextRange::empty(end), |t| t.span)
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        let source = self.source;
        self.at_token().map_or("", |t| token_text(source, &t))
    }

    pub(super) fn currently_is(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Kind of the `n`th significant token from the cursor.
    pub(super) fn peek_nth(&mut self, n: usize) -> SyntaxKind {
        self.skip_trivia();
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn should_stop(&mut self) -> bool {
        self.at_token().is_none() || self.has_fatal_error()
    }

    // === Tree building ===

    fn flush_trivia(&mut self) {
        for token in self.pending_trivia.drain(..) {
            self.builder
                .token(token.kind.into(), token_text(self.source, &token));
        }
    }

    pub(super) fn eat_trivia(&mut self) {
        self.skip_trivia();
        self.flush_trivia();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Moves the current token into the tree, charging one step of fuel.
    pub(super) fn bump(&mut self) {
        let token = self.at_token().expect("bump called at end of input");
        if let Err(err) = self.fuel.burn_step() {
            self.halt(err);
        }
        self.flush_trivia();
        self.builder
            .token(token.kind.into(), token_text(self.source, &token));
        self.pos += 1;
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        let matched = self.currently_is(kind);
        if matched {
            self.bump();
        }
        matched
    }

    /// Reports `expected {what}` on mismatch and leaves the token in place.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat_token(kind) {
            return true;
        }
        self.error(DiagnosticKind::UnexpectedToken, Some(&format!("expected {what}")));
        false
    }

    // === Nesting ===

    pub(super) fn enter_recursion(&mut self) -> bool {
        match self.fuel.descend() {
            Ok(()) => true,
            Err(err) => {
                self.halt(err);
                false
            }
        }
    }

    pub(super) fn exit_recursion(&mut self) {
        self.fuel.ascend();
    }

    pub(super) fn push_delimiter(&mut self, closer: SyntaxKind) {
        let span = self.current_span();
        self.open.push(OpenDelimiter { closer, span });
    }

    pub(super) fn pop_delimiter(&mut self) {
        self.open.pop();
    }

    /// Whether `kind` closes any construct that is still open.
    pub(super) fn closes_open_delimiter(&self, kind: SyntaxKind) -> bool {
        self.open.iter().any(|d| d.closer == kind)
    }

    // === Errors ===

    /// One diagnostic per source position; later ones at the same spot are cascades.
    fn claim_position(&mut self, pos: TextSize) -> bool {
        if self.last_error_at == Some(pos) {
            return false;
        }
        self.last_error_at = Some(pos);
        true
    }

    /// Reports at the current token. Inside an open construct the suppression
    /// range covers the rest of it.
    pub(super) fn error(&mut self, kind: DiagnosticKind, detail: Option<&str>) {
        let range = self.current_span();
        if !self.claim_position(range.start()) {
            return;
        }
        let suppression = match self.open.last() {
            Some(open) => TextRange::new(open.span.start(), TextSize::of(self.source)),
            None => range,
        };
        let report = self
            .diagnostics
            .report(kind, range)
            .suppression_range(suppression);
        match detail {
            Some(detail) => report.message(detail).emit(),
            None => report.emit(),
        }
    }

    /// Reports and wraps the offending token in an `Error` node.
    pub(super) fn error_and_skip(&mut self, kind: DiagnosticKind, detail: Option<&str>) {
        self.error(kind, detail);
        if self.at_token().is_some() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Reports at an explicit range instead of the current token.
    pub(super) fn error_at(&mut self, kind: DiagnosticKind, range: TextRange, detail: &str) {
        if self.claim_position(range.start()) {
            self.diagnostics.report(kind, range).message(detail).emit();
        }
    }

    /// Spans from the opener to the current token so errors inside get suppressed.
    pub(super) fn error_unclosed(
        &mut self,
        kind: DiagnosticKind,
        started_here: &str,
        open_range: TextRange,
    ) {
        let current = self.current_span();
        if !self.claim_position(current.start()) {
            return;
        }
        self.diagnostics
            .report(kind, TextRange::new(open_range.start(), current.end()))
            .related_to(started_here, open_range)
            .emit();
    }
}
