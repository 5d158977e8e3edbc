//! Tracing infrastructure for debugging matcher execution.
//!
//! # Design: Zero-Cost Abstraction
//!
//! When `NoopTracer` is used every trait method is an `#[inline(always)]`
//! empty function, so the compiler removes the calls and their arguments.
//! The matcher keeps no tracing state of its own.
//!
//! # Design: Tracer-Owned State
//!
//! Display-only state (the stack of active sub-grammars, restored on
//! backtrack) lives in the tracer:
//! - `trace_checkpoint_created` - tracer snapshots its own stack
//! - `trace_backtrack` - tracer restores the snapshot

use crate::Colors;
use crate::grammar::GrammarNode;
use crate::tokenizer::Token;

use super::effect::Effect;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: token matches, sub-grammar enter/exit, backtracks.
    #[default]
    Default,
    /// Verbose (-v): adds token text, capture effects and checkpoints.
    Verbose,
    /// Very verbose (-vv): adds every pattern node visited.
    VeryVerbose,
}

/// Tracer trait for matcher instrumentation.
///
/// Each method is called at a specific point during execution:
/// - `trace_eval` - before a pattern node is evaluated
/// - `trace_match_success/failure` - after a terminal is tested against a token
/// - `trace_effect` - after a capture effect is recorded
/// - `trace_enter` / `trace_exit` - around a sub-grammar body
/// - `trace_checkpoint_created` - when a checkpoint is pushed
/// - `trace_backtrack` - when a checkpoint is restored
/// - `trace_accept` - when the pattern is fully matched
pub trait Tracer {
    fn trace_eval(&mut self, node: &GrammarNode, pos: usize);

    fn trace_match_success(&mut self, node: &GrammarNode, pos: usize, token: &Token<'_>);

    /// `token` is `None` past the end of input.
    fn trace_match_failure(&mut self, node: &GrammarNode, pos: usize, token: Option<&Token<'_>>);

    fn trace_effect(&mut self, effect: &Effect<'_>);

    fn trace_enter(&mut self, name: &str, pos: usize);

    fn trace_exit(&mut self, name: &str, pos: usize);

    fn trace_checkpoint_created(&mut self, pos: usize);

    fn trace_backtrack(&mut self, pos: usize);

    fn trace_accept(&mut self, end: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_eval(&mut self, _node: &GrammarNode, _pos: usize) {}

    #[inline(always)]
    fn trace_match_success(&mut self, _node: &GrammarNode, _pos: usize, _token: &Token<'_>) {}

    #[inline(always)]
    fn trace_match_failure(
        &mut self,
        _node: &GrammarNode,
        _pos: usize,
        _token: Option<&Token<'_>>,
    ) {
    }

    #[inline(always)]
    fn trace_effect(&mut self, _effect: &Effect<'_>) {}

    #[inline(always)]
    fn trace_enter(&mut self, _name: &str, _pos: usize) {}

    #[inline(always)]
    fn trace_exit(&mut self, _name: &str, _pos: usize) {}

    #[inline(always)]
    fn trace_checkpoint_created(&mut self, _pos: usize) {}

    #[inline(always)]
    fn trace_backtrack(&mut self, _pos: usize) {}

    #[inline(always)]
    fn trace_accept(&mut self, _end: usize) {}
}

mod symbol {
    pub const EVAL: &str = " ";
    pub const MATCH_SUCCESS: &str = "●";
    pub const MATCH_FAILURE: &str = "○";
    pub const EFFECT: &str = "⬥";
    pub const ENTER: &str = "▶";
    pub const EXIT: &str = "◀";
    pub const CHECKPOINT: &str = "◇";
    pub const BACKTRACK: &str = "❮❮❮";
    pub const ACCEPT: &str = "◼";
}

/// Tracer that collects human-readable lines.
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    /// Active sub-grammars, innermost last.
    definition_stack: Vec<String>,
    /// Parallel to the matcher's checkpoint stack.
    checkpoint_stacks: Vec<Vec<String>>,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
            definition_stack: Vec::new(),
            checkpoint_stacks: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn dump(&self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn add_line(&mut self, pos: usize, symbol: &str, content: &str) {
        let indent = "  ".repeat(self.definition_stack.len());
        let c = self.colors;
        let line = format!("{indent}{}{pos:02}{} {symbol} {content}", c.dim, c.reset);
        self.lines.push(line.trim_end().to_string());
    }

    fn format_def_name(&self, name: &str) -> String {
        let c = self.colors;
        format!("({}{}{})", c.blue, name, c.reset)
    }

    fn format_token(&self, text: &str) -> String {
        let c = self.colors;
        format!("{}`{}`{}", c.green, text, c.reset)
    }

    fn shows_text(&self) -> bool {
        self.verbosity != Verbosity::Default
    }
}

impl Tracer for PrintTracer {
    fn trace_eval(&mut self, node: &GrammarNode, pos: usize) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        let content = format!("{}{}{}", c.dim, node.label(), c.reset);
        self.add_line(pos, symbol::EVAL, &content);
    }

    fn trace_match_success(&mut self, node: &GrammarNode, pos: usize, token: &Token<'_>) {
        let content = if self.shows_text() {
            format!("{} {}", node.label(), self.format_token(token.text))
        } else {
            node.label()
        };
        self.add_line(pos, symbol::MATCH_SUCCESS, &content);
    }

    fn trace_match_failure(&mut self, node: &GrammarNode, pos: usize, token: Option<&Token<'_>>) {
        let content = match (self.shows_text(), token) {
            (true, Some(token)) => format!("{} {}", node.label(), self.format_token(token.text)),
            (true, None) => format!("{} <end of input>", node.label()),
            (false, _) => node.label(),
        };
        self.add_line(pos, symbol::MATCH_FAILURE, &content);
    }

    fn trace_effect(&mut self, effect: &Effect<'_>) {
        // Effect lines hidden in default verbosity
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = self.colors;
        let (pos, effect_str) = match *effect {
            Effect::Open { name, start, .. } => (start, format!("Open {}{}{}", c.blue, name, c.reset)),
            Effect::Close { end } => (end, "Close".to_string()),
            Effect::RepeatOpen | Effect::RepeatClose => return,
        };
        self.add_line(pos, symbol::EFFECT, &effect_str);
    }

    fn trace_enter(&mut self, name: &str, pos: usize) {
        let content = self.format_def_name(name);
        self.add_line(pos, symbol::ENTER, &content);
        self.definition_stack.push(name.to_string());
    }

    fn trace_exit(&mut self, name: &str, pos: usize) {
        self.definition_stack.pop();
        let content = self.format_def_name(name);
        self.add_line(pos, symbol::EXIT, &content);
    }

    fn trace_checkpoint_created(&mut self, pos: usize) {
        self.checkpoint_stacks.push(self.definition_stack.clone());
        if self.verbosity != Verbosity::Default {
            self.add_line(pos, symbol::CHECKPOINT, "");
        }
    }

    fn trace_backtrack(&mut self, pos: usize) {
        let stack = self
            .checkpoint_stacks
            .pop()
            .expect("backtrack without checkpoint");
        self.definition_stack = stack;
        self.add_line(pos, symbol::BACKTRACK, "");
    }

    fn trace_accept(&mut self, end: usize) {
        self.add_line(end, symbol::ACCEPT, "");
    }
}
