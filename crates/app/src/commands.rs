//! Subcommand execution

use std::collections::HashMap;
use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use huffviz_core::render::{draw_nodes, edges};
use huffviz_core::{build_tree, FrameState, HuffmanTree, Layout, LayoutParams, Node, NodeId};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::cli::{Cli, Commands, InputArgs};
use crate::config::{InputSource, Settings};
use crate::output;

pub fn execute_command(cli: &Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Encode { input } => {
            show_config(cli, &settings);
            let model = load_model(input, &settings)?;
            print_encoding(&model);
        }
        Commands::Tree { input } => {
            show_config(cli, &settings);
            let model = load_model(input, &settings)?;
            match text_tree(&model) {
                Some(tree) => output::info(&tree),
                None => output::warning("empty input, no tree"),
            }
        }
        Commands::Layout {
            input,
            layout,
            pretty,
        } => {
            settings.apply_layout_args(layout)?;
            show_config(cli, &settings);
            let model = load_model(input, &settings)?;
            let value = layout_json(&model, &model.layout(&settings.layout), None);
            let json = if *pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            output::info(&json);
        }
        Commands::Frames {
            input,
            layout,
            delay_ms,
            no_delay,
        } => {
            settings.apply_layout_args(layout)?;
            show_config(cli, &settings);
            let delay = if *no_delay {
                Duration::ZERO
            } else {
                Duration::from_millis(delay_ms.unwrap_or(settings.frame_delay_ms))
            };
            let model = load_model(input, &settings)?;
            stream_frames(&model, &settings.layout, delay)?;
        }
    }
    Ok(())
}

fn show_config(cli: &Cli, settings: &Settings) {
    if cli.print_config {
        settings.print();
    }
}

fn load_model(args: &InputArgs, settings: &Settings) -> Result<HuffmanTree> {
    let source = InputSource::from_args(args, settings);
    info!(source = %source.describe(), "reading input");
    if let InputSource::Sample { seed, .. } = source {
        output::warning(&format!("no input given, using generated sample (seed {seed})"));
    }

    let text = source.read()?;
    build_tree(&text).context("failed to build huffman tree")
}

fn print_encoding(model: &HuffmanTree) {
    output::header("=== Frequencies ===");
    for (symbol, freq) in model.frequencies().iter() {
        output::entry(symbol, &freq);
    }

    output::header("=== Codes ===");
    for (symbol, code) in model.codes().iter() {
        if code.is_empty() {
            output::entry(symbol, "(empty)");
        } else {
            output::entry(symbol, code);
        }
    }
    if !model.codes().is_empty() {
        output::info(&format!(
            "Average code length: {:.3} bits",
            model.codes().average_length(model.frequencies())
        ));
    }

    model.compression_stats().print_summary();

    output::header("=== Encoded ===");
    output::info(model.encoded());
}

/// Text rendering of the whole tree, `None` for empty input.
///
/// Built bottom-up in reverse pre-order, so every child subtree exists
/// before its parent is assembled.
fn text_tree(model: &HuffmanTree) -> Option<termtree::Tree<String>> {
    let tree = model.tree();
    let root = tree.root()?;
    let order: Vec<NodeId> = tree.preorder(root).map(|(id, _)| id).collect();

    let mut built: HashMap<NodeId, termtree::Tree<String>> = HashMap::new();
    for &id in order.iter().rev() {
        let subtree = match *tree.node(id) {
            Node::Leaf { symbol, freq } => {
                let code = model.codes().get(symbol).unwrap_or_default();
                termtree::Tree::new(format!("{symbol:?} x{freq} [{code}]"))
            }
            Node::Internal { freq, left, right } => {
                let children = [left, right].map(|child| built.remove(&child));
                termtree::Tree::new(format!("({freq})")).with_leaves(children.into_iter().flatten())
            }
        };
        built.insert(id, subtree);
    }
    built.remove(&root)
}

/// JSON document for one drawn layout: draw list, edges and bounds.
fn layout_json(
    model: &HuffmanTree,
    layout: &Layout,
    highlighted: Option<(NodeId, NodeId)>,
) -> Value {
    let tree = model.tree();
    let nodes: Vec<Value> = draw_nodes(tree, layout, highlighted)
        .into_iter()
        .map(|node| {
            json!({
                "id": node.id,
                "center": node.center,
                "style": node.style,
                "fill": node.style.default_fill(),
                "label": node.label,
                "tooltip": model.describe(node.id),
            })
        })
        .collect();

    json!({
        "width": layout.width,
        "height": layout.height,
        "node_radius": layout.node_radius,
        "font_size": layout.font_size,
        "line_width": layout.line_width,
        "nodes": nodes,
        "edges": edges(tree, layout),
    })
}

fn frame_json(model: &HuffmanTree, frame: &FrameState) -> Value {
    json!({
        "index": frame.index,
        "subtree_root": frame.subtree_root,
        "highlighted": frame.highlighted,
        "final": frame.is_final(),
        "layout": layout_json(model, &frame.layout, frame.highlighted),
    })
}

/// One JSON line per frame, pausing `delay` between frames.
#[instrument(level = "debug", skip(model, params))]
fn stream_frames(model: &HuffmanTree, params: &LayoutParams, delay: Duration) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    let frames = model.frames(params);
    let total = frames.len();
    if total == 0 {
        output::warning("empty input, no frames");
        return Ok(());
    }

    for frame in frames {
        debug!(index = frame.index, total, "frame");
        let line = serde_json::to_string(&frame_json(model, &frame))?;
        writeln!(stdout, "{line}")?;
        stdout.flush()?;

        if !frame.is_final() && !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    Ok(())
}
