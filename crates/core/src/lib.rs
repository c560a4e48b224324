//! huffviz-core: deterministic Huffman coding with tree layout and
//! construction animation.
//!
//! This library provides the algorithmic and geometric core of a Huffman
//! tree visualizer:
//! - Counts symbol frequencies in first-occurrence order
//! - Builds the Huffman tree with a fully deterministic merge order
//! - Assigns prefix-free codes, encodes the input, reports compression
//! - Lays out any (sub)tree in 2-D without overlapping leaves
//! - Replays the construction as a lazy sequence of laid-out frames
//!
//! # Architecture
//!
//! - `frequency`: ordered symbol counts
//! - `tree`: arena tree, merge steps and the builder
//! - `codes`: code table generation and checks
//! - `encoder`: text -> bit string
//! - `metrics`: compression statistics
//! - `layout`: node coordinates for a tree and zoom
//! - `animation`: frame sequence over the merge steps
//! - `render`: styles, labels and edges for drawing layers
//! - `huffman`: the assembled model for one input
//!
//! # Design Principles
//!
//! - **Pure**: every operation is a function of its inputs; no shared state
//! - **Deterministic**: ties break on creation order, never on heap internals
//! - **Iterative**: tree walks use explicit stacks, so skewed trees are safe
//! - **Degenerate, not failing**: empty and single-symbol inputs are valid

pub mod animation;
pub mod codes;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod layout;
pub mod metrics;
pub mod render;
pub mod tree;

// Re-export commonly used types
pub use animation::{iterate_frames, FrameState, Frames};
pub use codes::CodeTable;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use huffman::HuffmanTree;
pub use layout::{compute_layout, Layout, LayoutParams, Point};
pub use metrics::CompressionStats;
pub use tree::{MergeStep, Node, NodeId, Tree};

/// Build the full model for `text`. Shorthand for [`HuffmanTree::build`].
pub fn build_tree(text: &str) -> Result<HuffmanTree> {
    HuffmanTree::build(text)
}

/// Compression statistics of a built model.
pub fn compression_stats(model: &HuffmanTree) -> CompressionStats {
    model.compression_stats()
}
