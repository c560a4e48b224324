//! Construction animation: one frame per merge step plus a final frame.
//!
//! Frames are produced lazily by [`Frames`], an iterator over a borrowed
//! [`Tree`]. Each frame carries a fresh layout; nothing is shared between
//! frames, so a consumer may hand them to another thread or process once
//! produced.
//!
//! # Frame scope
//!
//! The frame for merge step `i` shows only the subtree rooted at the node
//! that step produced. Leaves still waiting to be merged are not part of
//! that frame. The final frame shows the whole tree.
//!
//! # Pacing
//!
//! The iterator never sleeps. The caller decides how long each frame stays
//! on screen, and cancels by dropping the iterator. Replaying means calling
//! [`iterate_frames`] again.

use crate::layout::{compute_layout, Layout, LayoutParams};
use crate::tree::{NodeId, Tree};
use serde::Serialize;
use std::iter::FusedIterator;
use tracing::debug;

/// One snapshot of the construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameState {
    /// Position in the sequence, starting at 0
    pub index: usize,

    /// Root of the subtree shown by this frame
    pub subtree_root: NodeId,

    /// Layout of the subtree at `subtree_root`
    pub layout: Layout,

    /// The two nodes consumed by this step; `None` on the final frame
    pub highlighted: Option<(NodeId, NodeId)>,
}

impl FrameState {
    pub fn is_final(&self) -> bool {
        self.highlighted.is_none()
    }
}

/// Lazy frame sequence returned by [`iterate_frames`].
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    tree: &'a Tree,
    params: LayoutParams,
    next: usize,
    total: usize,
}

/// Frames for the construction of `tree`: `steps().len() + 1` frames for a
/// tree with a root, none for an empty tree.
pub fn iterate_frames<'a>(tree: &'a Tree, params: &LayoutParams) -> Frames<'a> {
    let total = if tree.root().is_some() {
        tree.steps().len() + 1
    } else {
        0
    };
    debug!(total, "frame sequence created");

    Frames {
        tree,
        params: *params,
        next: 0,
        total,
    }
}

impl Iterator for Frames<'_> {
    type Item = FrameState;

    fn next(&mut self) -> Option<FrameState> {
        if self.next >= self.total {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let steps = self.tree.steps();
        let (subtree_root, highlighted) = match steps.get(index) {
            Some(step) => (step.merged, Some((step.left, step.right))),
            None => (self.tree.root()?, None),
        };

        debug!(index, subtree_root = %subtree_root, final_frame = highlighted.is_none(), "frame");

        Some(FrameState {
            index,
            subtree_root,
            layout: compute_layout(self.tree, Some(subtree_root), &self.params),
            highlighted,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl FusedIterator for Frames<'_> {}
