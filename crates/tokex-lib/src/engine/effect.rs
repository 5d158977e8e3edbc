//! Effect log recorded during matching.
//!
//! The VM appends effects as it goes and truncates the log to a checkpoint's
//! watermark when it backtracks, so after a successful run the log holds
//! exactly the effects of the winning path.

use std::fmt;

/// A capture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect<'g> {
    /// A named capture starts at token `start`.
    Open {
        name: &'g str,
        start: usize,
        /// Every match of the capture body is exactly one token.
        scalar: bool,
    },
    /// The innermost open capture ends before token `end`.
    Close { end: usize },
    /// A repetition with `max > 1` starts; captures inside it are lists.
    RepeatOpen,
    RepeatClose,
}

impl fmt::Display for Effect<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Open { name, start, .. } => write!(f, "Open {name} @{start}"),
            Effect::Close { end } => write!(f, "Close @{end}"),
            Effect::RepeatOpen => write!(f, "RepeatOpen"),
            Effect::RepeatClose => write!(f, "RepeatClose"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EffectLog<'g> {
    effects: Vec<Effect<'g>>,
}

impl<'g> EffectLog<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, effect: Effect<'g>) {
        self.effects.push(effect);
    }

    /// Current length, saved by checkpoints.
    #[inline]
    pub fn watermark(&self) -> usize {
        self.effects.len()
    }

    #[inline]
    pub fn truncate(&mut self, watermark: usize) {
        self.effects.truncate(watermark);
    }

    pub fn as_slice(&self) -> &[Effect<'g>] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
