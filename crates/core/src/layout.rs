//! Tree layout: 2-D coordinates for every node of a (sub)tree.
//!
//! Layout is a pure function of the tree, the chosen root and the
//! [`LayoutParams`]. Nothing is cached between calls; zooming or resizing
//! means calling [`compute_layout`] again.
//!
//! # Algorithm
//!
//! 1. Walk the subtree in pre-order (left before right). Leaves are met
//!    left-to-right; each one takes the next horizontal slot, `x_spacing`
//!    apart. Every node sits at `top + depth * level_gap`.
//! 2. Walk the same order backwards so children come before parents, and put
//!    every internal node at the midpoint of its two children.
//! 3. Translate horizontally so the span `[min_x, max_x]` is centered in the
//!    canvas width.
//! 4. Multiply coordinates, node radius and margins by the zoom factor.
//!
//! ```text
//!            (c+d)                 level 0
//!           /     \
//!        (a+b)     c               level 1
//!        /   \
//!       a     b                    level 2
//!   |<--->|<--->|
//!   x_spacing per leaf
//! ```
//!
//! Leaves are always exactly `x_spacing` apart in left-to-right order, so no
//! two leaves overlap whatever the tree shape. Both walks use an explicit
//! stack, so deep chains do not recurse.

use crate::error::LayoutError;
use crate::tree::{NodeId, Tree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{instrument, trace};

/// Multiplicative zoom step for [`LayoutParams::zoom_in`] / [`LayoutParams::zoom_out`].
pub const ZOOM_STEP: f64 = 1.2;

/// Label font size at zoom 1.0
const BASE_FONT_SIZE: f64 = 12.0;
const MIN_FONT_SIZE: f64 = 8.0;

/// Edge stroke width at zoom 1.0
const BASE_LINE_WIDTH: f64 = 2.0;
const MIN_LINE_WIDTH: f64 = 1.0;

/// Parameters for a layout request.
///
/// All lengths are in unzoomed canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Vertical distance between tree levels
    pub level_gap: f64,

    /// Gap between the circles of neighbouring leaves
    pub horizontal_gap: f64,

    /// Circle radius of a node
    pub node_radius: f64,

    /// Uniform scale applied after layout
    pub zoom: f64,

    /// Canvas width to center in; computed from the leaf count when `None`
    pub canvas_width: Option<f64>,

    /// Lower bound for the per-leaf horizontal slot
    pub min_spacing: f64,

    /// Space above the root circle, also used as right/bottom margin
    pub top_margin: f64,

    /// Lower bound for the computed canvas width
    pub min_canvas_width: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            level_gap: 90.0,
            horizontal_gap: 30.0,
            node_radius: 25.0,
            zoom: 1.0,
            canvas_width: None,
            min_spacing: 60.0,
            top_margin: 40.0,
            min_canvas_width: 600.0,
        }
    }
}

impl LayoutParams {
    /// Check that every parameter yields finite coordinates.
    ///
    /// # Errors
    /// - `LayoutError::InvalidZoom` if zoom is not finite or not positive
    /// - `LayoutError::InvalidRadius` if the radius is negative or not finite
    /// - `LayoutError::InvalidSpacing` for negative or non-finite gaps and margins
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(LayoutError::InvalidZoom(self.zoom));
        }
        if !self.node_radius.is_finite() || self.node_radius < 0.0 {
            return Err(LayoutError::InvalidRadius(self.node_radius));
        }

        let lengths = [
            ("level_gap", self.level_gap),
            ("horizontal_gap", self.horizontal_gap),
            ("min_spacing", self.min_spacing),
            ("top_margin", self.top_margin),
            ("min_canvas_width", self.min_canvas_width),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidSpacing { name, value });
            }
        }
        if let Some(value) = self.canvas_width {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidSpacing {
                    name: "canvas_width",
                    value,
                });
            }
        }

        // Leaves must not collapse onto one point
        if self.x_spacing() <= 0.0 {
            return Err(LayoutError::InvalidSpacing {
                name: "min_spacing",
                value: self.min_spacing,
            });
        }

        Ok(())
    }

    /// Horizontal slot per leaf, before zoom.
    pub fn x_spacing(&self) -> f64 {
        (2.0 * self.node_radius + self.horizontal_gap).max(self.min_spacing)
    }

    /// Same parameters with a different zoom factor.
    pub fn with_zoom(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }

    pub fn zoom_in(self) -> Self {
        self.with_zoom(self.zoom * ZOOM_STEP)
    }

    pub fn zoom_out(self) -> Self {
        self.with_zoom(self.zoom / ZOOM_STEP)
    }
}

/// A 2-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Result of a layout request. All values are zoomed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Center of every node of the laid-out subtree
    pub positions: BTreeMap<NodeId, Point>,

    /// Bounding width: canvas width, grown if nodes reach past it
    pub width: f64,

    /// Bounding height: deepest node plus radius and margin
    pub height: f64,

    /// Circle radius to draw
    pub node_radius: f64,

    /// Label font size to draw
    pub font_size: f64,

    /// Edge stroke width to draw
    pub line_width: f64,

    /// Horizontal distance between neighbouring leaves
    pub x_spacing: f64,
}

impl Layout {
    /// Layout with no nodes and a zero-sized bounding box.
    fn empty(params: &LayoutParams) -> Self {
        let (node_radius, font_size, line_width) = zoomed_sizes(params);
        Self {
            positions: BTreeMap::new(),
            width: 0.0,
            height: 0.0,
            node_radius,
            font_size,
            line_width,
            x_spacing: params.x_spacing() * params.zoom,
        }
    }

    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `(min_x, max_x)` over all nodes; `None` when empty.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let mut xs = self.positions.values().map(|p| p.x);
        let first = xs.next()?;
        Some(xs.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x))))
    }

    /// Node whose circle's bounding box contains `(x, y)`.
    ///
    /// When boxes touch, the node with the lowest id wins.
    pub fn node_at(&self, x: f64, y: f64) -> Option<NodeId> {
        let r = self.node_radius;
        self.positions
            .iter()
            .find(|(_, p)| (p.x - r..=p.x + r).contains(&x) && (p.y - r..=p.y + r).contains(&y))
            .map(|(&id, _)| id)
    }
}

fn zoomed_sizes(params: &LayoutParams) -> (f64, f64, f64) {
    let zoom = params.zoom;
    (
        params.node_radius * zoom,
        (BASE_FONT_SIZE * zoom).floor().max(MIN_FONT_SIZE),
        (BASE_LINE_WIDTH * zoom).floor().max(MIN_LINE_WIDTH),
    )
}

/// Lay out the subtree rooted at `root`.
///
/// A `None` root gives an empty layout with a zero-sized bounding box.
/// `params` should have passed [`LayoutParams::validate`]; invalid values
/// produce non-finite coordinates rather than an error.
#[instrument(level = "debug", skip(tree, params), fields(zoom = params.zoom))]
pub fn compute_layout(tree: &Tree, root: Option<NodeId>, params: &LayoutParams) -> Layout {
    let Some(root) = root else {
        return Layout::empty(params);
    };

    let order: Vec<(NodeId, usize)> = tree.preorder(root).collect();
    let x_spacing = params.x_spacing();
    let top = params.node_radius + params.top_margin;

    // Step 1: leaves left-to-right, every node at its depth
    let mut raw: BTreeMap<NodeId, Point> = BTreeMap::new();
    let mut leaves = 0usize;
    for &(id, depth) in &order {
        let x = if tree.node(id).is_leaf() {
            let x = leaves as f64 * x_spacing;
            leaves += 1;
            x
        } else {
            0.0
        };
        raw.insert(
            id,
            Point {
                x,
                y: top + depth as f64 * params.level_gap,
            },
        );
    }

    // Step 2: parents over the midpoint of their children
    for &(id, _) in order.iter().rev() {
        if let Some((left, right)) = tree.node(id).children() {
            let (Some(l), Some(r)) = (raw.get(&left), raw.get(&right)) else {
                continue;
            };
            let mid = (l.x + r.x) / 2.0;
            if let Some(p) = raw.get_mut(&id) {
                p.x = mid;
            }
        }
    }

    // Step 3: center [min_x, max_x] in the canvas
    let canvas_width = params.canvas_width.unwrap_or_else(|| {
        (leaves as f64 * x_spacing + 2.0 * params.node_radius).max(params.min_canvas_width)
    });
    let (min_x, max_x) = raw
        .values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.x), hi.max(p.x))
        });
    let offset = (canvas_width - (max_x - min_x)) / 2.0 - min_x;

    // Step 4: zoom
    let zoom = params.zoom;
    let positions: BTreeMap<NodeId, Point> = raw
        .into_iter()
        .map(|(id, p)| {
            let placed = Point {
                x: (p.x + offset) * zoom,
                y: p.y * zoom,
            };
            trace!(node = %id, x = placed.x, y = placed.y, "placed");
            (id, placed)
        })
        .collect();

    let (node_radius, font_size, line_width) = zoomed_sizes(params);
    let margin = params.top_margin * zoom;
    let max_y = positions.values().map(|p| p.y).fold(0.0, f64::max);
    let right_edge = (max_x + offset) * zoom + node_radius + margin;

    Layout {
        positions,
        width: (canvas_width * zoom).max(right_edge),
        height: max_y + node_radius + margin,
        node_radius,
        font_size,
        line_width,
        x_spacing: x_spacing * zoom,
    }
}
