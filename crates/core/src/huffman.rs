//! The assembled Huffman model for one input text.
//!
//! [`HuffmanTree::build`] runs the whole pipeline once:
//!
//! ```text
//! text -> FrequencyTable -> Tree (+ merge steps) -> CodeTable -> encoded bits
//! ```
//!
//! The result is read-only. Layouts, frames and statistics are computed from
//! it on demand.
//!
//! # Example
//! ```
//! use huffviz_core::huffman::HuffmanTree;
//!
//! let model = HuffmanTree::build("aabb").unwrap();
//! assert_eq!(model.codes().get('a'), Some("0"));
//! assert_eq!(model.codes().get('b'), Some("1"));
//! assert_eq!(model.encoded(), "0011");
//! ```

use crate::animation::{iterate_frames, Frames};
use crate::codes::CodeTable;
use crate::encoder::encode;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::layout::{compute_layout, Layout, LayoutParams};
use crate::metrics::CompressionStats;
use crate::tree::{Node, NodeId, Tree};
use serde::Serialize;
use tracing::{info, instrument};

/// Frequencies, tree, merge history, codes and encoded text for one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuffmanTree {
    /// Input length in symbols (chars)
    input_len: u64,
    frequencies: FrequencyTable,
    tree: Tree,
    codes: CodeTable,
    encoded: String,
}

impl HuffmanTree {
    /// Build everything for `text`.
    ///
    /// Empty text is valid: no root, no codes, empty encoding.
    ///
    /// # Errors
    /// Only `EncodeError::MissingCode`, which would mean the code table does
    /// not cover the text it was built from.
    #[instrument(level = "debug", skip_all, fields(len = text.len()))]
    pub fn build(text: &str) -> Result<Self> {
        let frequencies = FrequencyTable::analyze(text);
        let tree = Tree::build(&frequencies);
        let codes = CodeTable::generate(&tree);
        let encoded = encode(text, &codes)?;

        info!(
            symbols = frequencies.len(),
            steps = tree.steps().len(),
            encoded_bits = encoded.len(),
            "huffman tree built"
        );

        Ok(Self {
            input_len: frequencies.total(),
            frequencies,
            tree,
            codes,
            encoded,
        })
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree.root()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Encoded bit string (`'0'` / `'1'` characters).
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Input length in symbols.
    pub fn input_len(&self) -> u64 {
        self.input_len
    }

    /// Original bits, compressed bits and percent saved.
    pub fn compression_stats(&self) -> CompressionStats {
        CompressionStats::new(self.input_len, self.encoded.len() as u64)
    }

    /// Layout of the full tree.
    pub fn layout(&self, params: &LayoutParams) -> Layout {
        compute_layout(&self.tree, self.tree.root(), params)
    }

    /// Construction frames; see [`crate::animation`].
    pub fn frames(&self, params: &LayoutParams) -> Frames<'_> {
        iterate_frames(&self.tree, params)
    }

    /// Tooltip text for a node: symbol and code for a leaf, frequency for an
    /// internal node. `None` for ids outside this tree.
    pub fn describe(&self, id: NodeId) -> Option<String> {
        let text = match *self.tree.get(id)? {
            Node::Leaf { symbol, .. } => format!(
                "Char: {symbol:?}\nCode: {}",
                self.codes.get(symbol).unwrap_or_default()
            ),
            Node::Internal { freq, .. } => format!("Freq: {freq}"),
        };
        Some(text)
    }
}
