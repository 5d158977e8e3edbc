//! Continuation frames.
//!
//! The continuation of the matcher is a linked list of frames stored in an
//! append-only arena. Frames are never mutated once pushed, so a checkpoint
//! can share the continuation it was created with by remembering one index.

use crate::grammar::GrammarNode;

/// What to do once the construct that pushed the frame finishes.
#[derive(Debug, Clone, Copy)]
pub enum Frame<'g> {
    /// Match the remaining children of a sequence.
    Seq(&'g [GrammarNode]),
    /// Close the innermost named capture.
    Close,
    /// One iteration of a repetition finished.
    Iterate {
        body: &'g GrammarNode,
        min: u32,
        max: Option<u32>,
        /// Iterations completed before this one.
        count: u32,
        start: usize,
    },
    /// A list-collecting repetition finished.
    RepeatClose,
    /// Leave a sub-grammar entered at `entered_at`.
    Exit { name: &'g str, entered_at: usize },
}

#[derive(Debug, Clone, Copy)]
struct Link<'g> {
    frame: Frame<'g>,
    parent: Option<u32>,
    depth: u32,
}

#[derive(Debug, Default)]
pub struct FrameArena<'g> {
    links: Vec<Link<'g>>,
}

impl<'g> FrameArena<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a frame on top of `parent`, returns its index and depth.
    pub fn push(&mut self, parent: Option<u32>, frame: Frame<'g>) -> (u32, u32) {
        let depth = self.depth(parent) + 1;
        let idx = self.links.len() as u32;
        self.links.push(Link {
            frame,
            parent,
            depth,
        });
        (idx, depth)
    }

    /// Returns the frame at `idx` and its parent.
    pub fn get(&self, idx: u32) -> (Frame<'g>, Option<u32>) {
        let link = &self.links[idx as usize];
        (link.frame, link.parent)
    }

    /// Number of frames in the continuation starting at `idx`.
    pub fn depth(&self, idx: Option<u32>) -> u32 {
        idx.map_or(0, |idx| self.links[idx as usize].depth)
    }

    /// Whether sub-grammar `name` is active at token `pos` in the continuation at `idx`.
    pub fn is_active_at(&self, mut idx: Option<u32>, name: &str, pos: usize) -> bool {
        while let Some(i) = idx {
            let link = &self.links[i as usize];
            if let Frame::Exit { name: active, entered_at } = link.frame
                && active == name
                && entered_at == pos
            {
                return true;
            }
            idx = link.parent;
        }
        false
    }

    /// Drop frames no continuation can reach.
    ///
    /// Parents always sit below their children, so everything above the
    /// highest referenced index is garbage.
    pub fn prune(&mut self, current: Option<u32>, max_checkpoint_ref: Option<u32>) {
        let high_water = match (current, max_checkpoint_ref) {
            (None, None) => return,
            (Some(c), None) => c,
            (None, Some(m)) => m,
            (Some(c), Some(m)) => c.max(m),
        };
        self.links.truncate((high_water + 1) as usize);
    }
}
