//! Backtracking matcher for compiled grammars.
//!
//! The matcher is iterative: the continuation is a chain of frames in a
//! [`FrameArena`] and every untried option is a [`Checkpoint`]. The Rust call
//! stack stays flat no matter how deep the grammar or how long the input.

use crate::grammar::{CompiledGrammar, GrammarNode};
use crate::tokenizer::Token;

use super::checkpoint::{Checkpoint, CheckpointStack, Resume};
use super::effect::{Effect, EffectLog};
use super::error::MatchSafetyError;
use super::frame::{Frame, FrameArena};
use super::materializer::{Materializer, ValueMaterializer};
use super::trace::{NoopTracer, Tracer};
use super::value::{Captures, MatchResult, WHOLE_MATCH};

/// Default execution fuel (matcher steps).
pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
/// Default recursion fuel (nested constructs active at once).
pub const DEFAULT_RECURSION_FUEL: u32 = 1024;

/// Next thing the main loop does.
#[derive(Clone, Copy)]
enum Step<'g> {
    Eval(&'g GrammarNode),
    /// The current construct succeeded; continue with the current frame.
    Return,
    Fail,
}

/// Matches a compiled grammar against a token sequence.
pub struct Matcher<'g, 't> {
    grammar: &'g CompiledGrammar,
    tokens: &'t [Token<'t>],
    /// Current token index.
    pos: usize,
    /// Head of the current continuation.
    frame: Option<u32>,
    frames: FrameArena<'g>,
    checkpoints: CheckpointStack<'g>,
    effects: EffectLog<'g>,
    exec_fuel: u32,
    exec_limit: u32,
    recursion_limit: u32,
}

impl<'g, 't> Matcher<'g, 't> {
    pub fn new(grammar: &'g CompiledGrammar, tokens: &'t [Token<'t>]) -> Self {
        Self {
            grammar,
            tokens,
            pos: 0,
            frame: None,
            frames: FrameArena::new(),
            checkpoints: CheckpointStack::new(),
            effects: EffectLog::new(),
            exec_fuel: DEFAULT_EXEC_FUEL,
            exec_limit: DEFAULT_EXEC_FUEL,
            recursion_limit: DEFAULT_RECURSION_FUEL,
        }
    }

    /// Set execution fuel limit.
    pub fn with_exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self.exec_limit = fuel;
        self
    }

    /// Set recursion fuel limit.
    pub fn with_recursion_fuel(mut self, fuel: u32) -> Self {
        self.recursion_limit = fuel;
        self
    }

    /// Match the grammar root starting at token `start`.
    ///
    /// Uses `NoopTracer`, which is optimized away completely.
    pub fn run(self, start: usize) -> Result<MatchResult, MatchSafetyError> {
        self.run_with(start, &mut NoopTracer)
    }

    /// Match with a tracer for debugging.
    pub fn run_with<T: Tracer>(
        mut self,
        start: usize,
        tracer: &mut T,
    ) -> Result<MatchResult, MatchSafetyError> {
        let grammar = self.grammar;
        self.pos = start;
        let mut step = Step::Eval(grammar.root());

        loop {
            if self.exec_fuel == 0 {
                return Err(MatchSafetyError::ExecFuelExhausted(self.exec_limit));
            }
            self.exec_fuel -= 1;

            step = match step {
                Step::Eval(node) => self.eval(node, tracer)?,
                Step::Return => match self.frame {
                    Some(idx) => self.resume(idx, tracer)?,
                    None => break,
                },
                Step::Fail => match self.backtrack(tracer) {
                    Some(next) => next,
                    None => return Ok(MatchResult::no_match()),
                },
            };
        }

        tracer.trace_accept(self.pos);
        let value = ValueMaterializer::new(self.tokens).materialize(self.effects.as_slice());
        let mut captures = Captures::new();
        captures.insert(WHOLE_MATCH.to_string(), value);
        Ok(MatchResult {
            matched: true,
            end: self.pos,
            captures,
        })
    }

    fn eval<T: Tracer>(
        &mut self,
        node: &'g GrammarNode,
        tracer: &mut T,
    ) -> Result<Step<'g>, MatchSafetyError> {
        tracer.trace_eval(node, self.pos);

        let grammar = self.grammar;
        let step = match node {
            GrammarNode::Literal(_)
            | GrammarNode::Word
            | GrammarNode::AnySingleChar
            | GrammarNode::AnyToken
            | GrammarNode::Regex(_) => self.match_token(node, tracer),

            GrammarNode::Sequence(children) => match children.split_first() {
                None => Step::Return,
                Some((first, rest)) => {
                    if !rest.is_empty() {
                        self.push_frame(Frame::Seq(rest))?;
                    }
                    Step::Eval(first)
                }
            },

            GrammarNode::Alternation(children) => match children.split_first() {
                None => Step::Fail,
                Some((first, rest)) => {
                    if !rest.is_empty() {
                        self.save_checkpoint(Resume::Alternatives(rest), tracer);
                    }
                    Step::Eval(first)
                }
            },

            GrammarNode::Repetition { body, min, max } => {
                if max.is_none_or(|max| max > 1) {
                    self.emit(Effect::RepeatOpen, tracer);
                    self.push_frame(Frame::RepeatClose)?;
                }
                self.iterate(body, *min, *max, 0, tracer)?
            }

            GrammarNode::NamedCapture { name, body } => {
                let effect = Effect::Open {
                    name: name.as_str(),
                    start: self.pos,
                    scalar: body.is_single_token(),
                };
                self.emit(effect, tracer);
                self.push_frame(Frame::Close)?;
                Step::Eval(body)
            }

            GrammarNode::SubGrammarRef(name) => {
                let body = grammar
                    .table()
                    .get(name)
                    .ok_or_else(|| MatchSafetyError::UnknownSubGrammar(name.clone()))?;
                if self.frames.is_active_at(self.frame, name, self.pos) {
                    return Err(MatchSafetyError::ZeroProgressRecursion {
                        name: name.clone(),
                        position: self.pos,
                    });
                }
                tracer.trace_enter(name, self.pos);
                self.push_frame(Frame::Exit {
                    name: name.as_str(),
                    entered_at: self.pos,
                })?;
                Step::Eval(body)
            }
        };
        Ok(step)
    }

    fn match_token<T: Tracer>(&mut self, node: &GrammarNode, tracer: &mut T) -> Step<'g> {
        match self.tokens.get(self.pos) {
            Some(token) if node.accepts(token.text) => {
                tracer.trace_match_success(node, self.pos, token);
                self.pos += 1;
                Step::Return
            }
            token => {
                tracer.trace_match_failure(node, self.pos, token);
                Step::Fail
            }
        }
    }

    /// Start iteration `count + 1` of a repetition, offering to stop first
    /// when `min` is already met.
    fn iterate<T: Tracer>(
        &mut self,
        body: &'g GrammarNode,
        min: u32,
        max: Option<u32>,
        count: u32,
        tracer: &mut T,
    ) -> Result<Step<'g>, MatchSafetyError> {
        if max.is_some_and(|max| count >= max) {
            return Ok(Step::Return);
        }
        if count >= min {
            self.save_checkpoint(Resume::StopRepeat, tracer);
        }
        self.push_frame(Frame::Iterate {
            body,
            min,
            max,
            count,
            start: self.pos,
        })?;
        Ok(Step::Eval(body))
    }

    /// Pop frame `idx` off the continuation and act on it.
    fn resume<T: Tracer>(
        &mut self,
        idx: u32,
        tracer: &mut T,
    ) -> Result<Step<'g>, MatchSafetyError> {
        let (frame, parent) = self.frames.get(idx);
        self.frame = parent;
        self.frames.prune(self.frame, self.checkpoints.max_frame_ref());

        let step = match frame {
            Frame::Seq(children) => match children.split_first() {
                Some((first, rest)) => {
                    if !rest.is_empty() {
                        self.push_frame(Frame::Seq(rest))?;
                    }
                    Step::Eval(first)
                }
                None => Step::Return,
            },
            Frame::Close => {
                self.emit(Effect::Close { end: self.pos }, tracer);
                Step::Return
            }
            Frame::RepeatClose => {
                self.emit(Effect::RepeatClose, tracer);
                Step::Return
            }
            Frame::Iterate {
                body,
                min,
                max,
                count,
                start,
            } => {
                let count = count + 1;
                // An iteration that consumed nothing would repeat forever
                if self.pos == start && count >= min {
                    Step::Return
                } else {
                    self.iterate(body, min, max, count, tracer)?
                }
            }
            Frame::Exit { name, .. } => {
                tracer.trace_exit(name, self.pos);
                Step::Return
            }
        };
        Ok(step)
    }

    fn push_frame(&mut self, frame: Frame<'g>) -> Result<(), MatchSafetyError> {
        if self.frames.depth(self.frame) >= self.recursion_limit {
            return Err(MatchSafetyError::RecursionLimitExceeded(self.recursion_limit));
        }
        let (idx, _) = self.frames.push(self.frame, frame);
        self.frame = Some(idx);
        Ok(())
    }

    fn emit<T: Tracer>(&mut self, effect: Effect<'g>, tracer: &mut T) {
        tracer.trace_effect(&effect);
        self.effects.push(effect);
    }

    fn save_checkpoint<T: Tracer>(&mut self, resume: Resume<'g>, tracer: &mut T) {
        self.checkpoints.push(Checkpoint {
            resume,
            pos: self.pos,
            frame: self.frame,
            effect_watermark: self.effects.watermark(),
        });
        tracer.trace_checkpoint_created(self.pos);
    }

    /// Restore the most recent checkpoint. Returns `None` when no option is left.
    fn backtrack<T: Tracer>(&mut self, tracer: &mut T) -> Option<Step<'g>> {
        let checkpoint = self.checkpoints.pop()?;

        self.pos = checkpoint.pos;
        self.frame = checkpoint.frame;
        self.effects.truncate(checkpoint.effect_watermark);
        tracer.trace_backtrack(self.pos);

        let step = match checkpoint.resume {
            Resume::Alternatives(alternatives) => {
                let (first, rest) = alternatives
                    .split_first()
                    .expect("checkpoint alternatives are never empty");
                if !rest.is_empty() {
                    self.save_checkpoint(Resume::Alternatives(rest), tracer);
                }
                Step::Eval(first)
            }
            Resume::StopRepeat => Step::Return,
        };
        Some(step)
    }
}
