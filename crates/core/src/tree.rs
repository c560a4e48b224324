//! Huffman tree construction.
//!
//! The tree lives in an arena: nodes are stored in a `Vec` and addressed by
//! [`NodeId`]. An internal node stores the ids of its two children, so every
//! child has exactly one owner and nodes are never shared or re-linked after
//! creation.
//!
//! # Construction
//!
//! One leaf is created per distinct symbol, in first-occurrence order. All
//! leaves go into a min-heap keyed by `(frequency, creation sequence)`. The
//! two smallest entries are removed (first = left, second = right), merged
//! into a new internal node with the next sequence number, and the merged
//! node is pushed back. This repeats until at most one entry remains.
//!
//! # Determinism
//!
//! The creation sequence number of a node is its arena index. Leaves get
//! `0..k` in first-occurrence order, internal nodes get `k..2k-1` in merge
//! order. Equal frequencies are therefore always resolved the same way: the
//! lower sequence number wins.

use crate::frequency::FrequencyTable;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use tracing::{debug, instrument};

/// Identity of a node within one [`Tree`].
///
/// Ids are arena indices and double as creation sequence numbers. They are
/// only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index (equal to the creation sequence number).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A node of the Huffman tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf { symbol: char, freq: u64 },
    Internal { freq: u64, left: NodeId, right: NodeId },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match *self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => freq,
        }
    }

    /// Symbol of a leaf; `None` for internal nodes.
    pub fn symbol(&self) -> Option<char> {
        match *self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    /// `(left, right)` of an internal node; `None` for leaves.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match *self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// One pop-pop-push of the construction: `left` and `right` were consumed
/// and `merged` was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeStep {
    pub left: NodeId,
    pub right: NodeId,
    pub merged: NodeId,
}

/// Heap entry ordered for a min-heap on `(freq, seq)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    freq: u64,
    seq: usize,
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: lowest frequency, then lowest sequence number, pops first
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Finished Huffman tree plus its construction history.
///
/// Immutable once built; every consumer works on `&Tree`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    steps: Vec<MergeStep>,
}

impl Tree {
    /// Build the tree for a frequency table.
    ///
    /// - no symbols: no root, no steps
    /// - one symbol: the root is that leaf, no steps
    /// - k symbols: k leaves, k-1 internal nodes, k-1 steps
    #[instrument(level = "debug", skip_all, fields(symbols = frequencies.len()))]
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let leaf_count = frequencies.len();
        let mut nodes = Vec::with_capacity((2 * leaf_count).saturating_sub(1));
        let mut heap = BinaryHeap::with_capacity(leaf_count);

        for (symbol, freq) in frequencies.iter() {
            heap.push(HeapEntry {
                freq,
                seq: nodes.len(),
            });
            nodes.push(Node::Leaf { symbol, freq });
        }

        let mut steps = Vec::with_capacity(leaf_count.saturating_sub(1));

        while heap.len() > 1 {
            let (Some(first), Some(second)) = (heap.pop(), heap.pop()) else {
                break;
            };

            let merged = NodeId(nodes.len());
            let freq = first.freq + second.freq;
            nodes.push(Node::Internal {
                freq,
                left: NodeId(first.seq),
                right: NodeId(second.seq),
            });
            heap.push(HeapEntry {
                freq,
                seq: merged.0,
            });

            let step = MergeStep {
                left: NodeId(first.seq),
                right: NodeId(second.seq),
                merged,
            };
            debug!(
                step = steps.len(),
                left = %step.left,
                right = %step.right,
                merged = %step.merged,
                freq,
                "merge"
            );
            steps.push(step);
        }

        let root = heap.pop().map(|entry| NodeId(entry.seq));
        debug!(nodes = nodes.len(), steps = steps.len(), ?root, "tree built");

        Self { nodes, root, steps }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Merge steps in construction order.
    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }

    /// Look up a node.
    ///
    /// # Panics
    /// If `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Look up a node, returning `None` for foreign ids.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Total number of nodes (leaves and internal).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their ids, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Children of `id`; `None` for a leaf or a foreign id.
    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        self.get(id)?.children()
    }

    /// Edge count from the root down to `id`; `None` if `id` is not in the
    /// rooted tree.
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        let root = self.root?;
        self.preorder(root)
            .find(|&(n, _)| n == id)
            .map(|(_, depth)| depth)
    }

    /// Leaf holding `symbol`, if any.
    pub fn leaf_of(&self, symbol: char) -> Option<NodeId> {
        self.nodes()
            .find(|(_, node)| node.symbol() == Some(symbol))
            .map(|(id, _)| id)
    }

    /// Depth-first pre-order walk of the subtree at `start` (left before right).
    ///
    /// Yields `(id, depth)` with `depth` relative to `start`. Uses an explicit
    /// stack, so arbitrarily skewed trees are safe.
    pub fn preorder(&self, start: NodeId) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![(start, 0)],
        }
    }

    /// Number of leaves in the subtree at `id`.
    pub fn leaf_count(&self, id: NodeId) -> usize {
        self.preorder(id)
            .filter(|&(n, _)| self.node(n).is_leaf())
            .count()
    }

    /// Longest root-to-leaf edge count; `None` without a root.
    pub fn height(&self) -> Option<usize> {
        let root = self.root?;
        self.preorder(root).map(|(_, depth)| depth).max()
    }
}

/// Iterator returned by [`Tree::preorder`].
pub struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for Preorder<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        if let Some((left, right)) = self.tree.node(id).children() {
            self.stack.push((right, depth + 1));
            self.stack.push((left, depth + 1));
        }
        Some((id, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &str) -> Tree {
        Tree::build(&FrequencyTable::analyze(text))
    }

    #[test]
    fn test_empty_tree() {
        let tree = build("");
        assert!(tree.root().is_none());
        assert!(tree.steps().is_empty());
        assert!(tree.is_empty());
        assert_eq!(tree.height(), None);
    }

    #[test]
    fn test_single_symbol() {
        let tree = build("zzzz");
        let root = tree.root().unwrap();
        assert_eq!(*tree.node(root), Node::Leaf { symbol: 'z', freq: 4 });
        assert!(tree.steps().is_empty());
        assert_eq!(tree.height(), Some(0));
    }

    #[test]
    fn test_node_counts() {
        let tree = build("abracadabra");
        let leaves = tree.nodes().filter(|(_, n)| n.is_leaf()).count();
        assert_eq!(leaves, 5);
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.steps().len(), 4);
        assert_eq!(tree.leaf_count(tree.root().unwrap()), 5);
    }

    #[test]
    fn test_equal_frequencies_first_seen_is_left() {
        let tree = build("aabb");
        let root = tree.root().unwrap();
        let (left, right) = tree.node(root).children().unwrap();
        assert_eq!(tree.node(left).symbol(), Some('a'));
        assert_eq!(tree.node(right).symbol(), Some('b'));
        assert_eq!(tree.steps().len(), 1);
        assert_eq!(tree.steps()[0].merged, root);
    }

    #[test]
    fn test_lowest_frequency_merged_first() {
        let tree = build("aaaabbbcc");
        let first = tree.steps()[0];
        assert_eq!(tree.node(first.left).symbol(), Some('c'));
        assert_eq!(tree.node(first.right).symbol(), Some('b'));
        assert_eq!(tree.node(first.merged).freq(), 5);
    }

    #[test]
    fn test_internal_tie_uses_creation_order() {
        // a:1 b:1 c:1 d:1 -> (a,b)=n4, (c,d)=n5, (n4,n5)=n6
        let tree = build("abcd");
        let steps = tree.steps();
        assert_eq!(steps[0].left, NodeId(0));
        assert_eq!(steps[0].right, NodeId(1));
        assert_eq!(steps[1].left, NodeId(2));
        assert_eq!(steps[1].right, NodeId(3));
        assert_eq!(steps[2].left, NodeId(4));
        assert_eq!(steps[2].right, NodeId(5));
    }

    #[test]
    fn test_leaf_beats_internal_on_tie() {
        // a:1 b:1 c:2 -> (a,b)=n3 freq 2; c (seq 2) is older than n3 so c is left
        let tree = build("abcc");
        let last = *tree.steps().last().unwrap();
        assert_eq!(tree.node(last.left).symbol(), Some('c'));
        assert_eq!(last.right, NodeId(3));
    }

    #[test]
    fn test_preorder_visits_left_first() {
        let tree = build("aabb");
        let order: Vec<_> = tree.preorder(tree.root().unwrap()).collect();
        assert_eq!(order, vec![(NodeId(2), 0), (NodeId(0), 1), (NodeId(1), 1)]);
    }

    #[test]
    fn test_skewed_tree_height() {
        // Doubling frequencies force a chain: every merge takes the accumulated node
        let text: String = (0..16u32)
            .map(|i| {
                let c = char::from_u32('a' as u32 + i).unwrap();
                std::iter::repeat(c).take(1 << i).collect::<String>()
            })
            .collect();
        let tree = build(&text);
        assert_eq!(tree.height(), Some(15));
    }

    #[test]
    fn test_depth_of_and_children() {
        // "aaaabbbcc": c,b merge into n3; a and n3 merge into the root n4
        let tree = build("aaaabbbcc");
        let root = tree.root().unwrap();
        assert_eq!(tree.children(root), Some((NodeId(0), NodeId(3))));
        assert_eq!(tree.children(NodeId(0)), None);
        assert_eq!(tree.depth_of(root), Some(0));
        assert_eq!(tree.depth_of(NodeId(0)), Some(1));
        assert_eq!(tree.depth_of(NodeId(2)), Some(2));
        assert_eq!(tree.depth_of(NodeId(99)), None);
    }

    #[test]
    fn test_leaf_of() {
        let tree = build("xyz");
        assert!(tree.leaf_of('y').is_some());
        assert!(tree.leaf_of('q').is_none());
    }
}
