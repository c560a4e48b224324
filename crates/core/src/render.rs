//! Render hints for drawing layers.
//!
//! Drawing surfaces live outside this crate. They need three things per
//! node beyond its position: a semantic style (mapped to a fill colour by
//! the renderer), a text label, and the edges to their children clipped to
//! the circle outlines. All of it is derived from a [`Tree`] and a [`Layout`]
//! and never feeds back into either.

use crate::layout::{Layout, Point};
use crate::tree::{Node, NodeId, Tree};
use serde::Serialize;

/// Semantic colour state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStyle {
    Leaf,
    Internal,
    /// One of the two nodes consumed by the current merge step
    Highlighted,
}

impl NodeStyle {
    /// Fill colour used by the reference drawing.
    pub fn default_fill(self) -> &'static str {
        match self {
            NodeStyle::Leaf => "lightblue",
            NodeStyle::Internal => "lightgray",
            NodeStyle::Highlighted => "lightgreen",
        }
    }
}

/// Style of `id`; highlighting wins over the leaf/internal distinction.
pub fn node_style(tree: &Tree, id: NodeId, highlighted: Option<(NodeId, NodeId)>) -> NodeStyle {
    if matches!(highlighted, Some((a, b)) if a == id || b == id) {
        return NodeStyle::Highlighted;
    }
    match tree.node(id) {
        Node::Leaf { .. } => NodeStyle::Leaf,
        Node::Internal { .. } => NodeStyle::Internal,
    }
}

/// Label lines: `'c'` and the frequency for a leaf, the frequency alone
/// for an internal node.
pub fn node_label(node: &Node) -> Vec<String> {
    match *node {
        Node::Leaf { symbol, freq } => vec![format!("{symbol:?}"), freq.to_string()],
        Node::Internal { freq, .. } => vec![freq.to_string()],
    }
}

/// A parent-child connector, trimmed so it starts and ends on the circles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
    pub start: Point,
    pub end: Point,
}

/// Every parent-child edge of the laid-out subtree, parents in id order,
/// left child before right.
pub fn edges(tree: &Tree, layout: &Layout) -> Vec<Edge> {
    let r = layout.node_radius;
    let mut out = Vec::new();

    for (&parent, &from) in &layout.positions {
        let Some((left, right)) = tree.node(parent).children() else {
            continue;
        };
        for child in [left, right] {
            let Some(to) = layout.position(child) else {
                continue;
            };
            let (dx, dy) = (to.x - from.x, to.y - from.y);
            let mut dist = dx.hypot(dy);
            if dist == 0.0 {
                dist = 1.0;
            }
            out.push(Edge {
                parent,
                child,
                start: Point {
                    x: from.x + r * dx / dist,
                    y: from.y + r * dy / dist,
                },
                end: Point {
                    x: to.x - r * dx / dist,
                    y: to.y - r * dy / dist,
                },
            });
        }
    }
    out
}

/// Everything a drawing layer needs for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawNode {
    pub id: NodeId,
    pub center: Point,
    pub style: NodeStyle,
    pub label: Vec<String>,
}

/// Draw list for a layout: one entry per positioned node, in id order.
pub fn draw_nodes(
    tree: &Tree,
    layout: &Layout,
    highlighted: Option<(NodeId, NodeId)>,
) -> Vec<DrawNode> {
    layout
        .positions
        .iter()
        .map(|(&id, &center)| DrawNode {
            id,
            center,
            style: node_style(tree, id, highlighted),
            label: node_label(tree.node(id)),
        })
        .collect()
}
