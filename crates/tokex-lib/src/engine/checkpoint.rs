//! Checkpoints for backtracking.
//!
//! When the VM reaches a choice (an alternation, or a repetition that could
//! stop), it saves a checkpoint for the untried option. On failure, it
//! restores the most recent checkpoint and continues from there.

use crate::grammar::GrammarNode;

/// The untried option a checkpoint resumes with.
#[derive(Clone, Copy, Debug)]
pub enum Resume<'g> {
    /// Remaining alternatives of an alternation, never empty.
    Alternatives(&'g [GrammarNode]),
    /// Stop the repetition here and continue with what follows it.
    StopRepeat,
}

#[derive(Clone, Copy, Debug)]
pub struct Checkpoint<'g> {
    pub resume: Resume<'g>,
    /// Token index at checkpoint.
    pub pos: usize,
    /// Continuation at checkpoint.
    pub frame: Option<u32>,
    /// Effect log length at checkpoint.
    pub effect_watermark: usize,
}

/// Stack of checkpoints with O(1) max_frame_ref tracking.
///
/// The `max_frame_ref` is maintained for frame arena pruning: it is the
/// highest frame index referenced by any checkpoint.
#[derive(Debug, Default)]
pub struct CheckpointStack<'g> {
    stack: Vec<Checkpoint<'g>>,
    max_frame_ref: Option<u32>,
}

impl<'g> CheckpointStack<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, checkpoint: Checkpoint<'g>) {
        if let Some(frame_idx) = checkpoint.frame {
            self.max_frame_ref = Some(match self.max_frame_ref {
                Some(max) => max.max(frame_idx),
                None => frame_idx,
            });
        }
        self.stack.push(checkpoint);
    }

    pub fn pop(&mut self) -> Option<Checkpoint<'g>> {
        let cp = self.stack.pop()?;

        // Recompute only if we removed the max holder
        if self.stack.is_empty() {
            self.max_frame_ref = None;
        } else if cp.frame.is_some() && cp.frame == self.max_frame_ref {
            self.max_frame_ref = self.stack.iter().filter_map(|c| c.frame).max();
        }

        Some(cp)
    }

    #[inline]
    pub fn max_frame_ref(&self) -> Option<u32> {
        self.max_frame_ref
    }
}
