//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Huffman tree visualizer: codes, layouts and step-by-step construction frames
#[derive(Parser, Debug)]
#[command(name = "huffviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// TOML config file
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print resolved configuration before running
    #[arg(long, global = true)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print frequencies, codes, statistics and the encoded bit string
    Encode {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the finished tree as an indented text tree
    Tree {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the full-tree layout as JSON
    Layout {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Stream construction frames as JSON lines
    Frames {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Pause between frames (default from config: 700)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Emit all frames without pausing
        #[arg(long, conflicts_with = "delay_ms")]
        no_delay: bool,
    },
}

/// Input selection shared by all subcommands
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Text to encode
    #[arg(short, long, conflicts_with = "input")]
    pub text: Option<String>,

    /// UTF-8 file to encode
    #[arg(long = "in", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Length of generated sample text (used when no text or file is given)
    #[arg(long)]
    pub sample: Option<usize>,

    /// Seed for the generated sample
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Layout overrides
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Zoom factor
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Vertical distance between levels
    #[arg(long)]
    pub level_gap: Option<f64>,

    /// Gap between neighbouring leaves
    #[arg(long)]
    pub horizontal_gap: Option<f64>,

    /// Node circle radius
    #[arg(long)]
    pub node_radius: Option<f64>,

    /// Canvas width to center in (default: computed from leaf count)
    #[arg(long)]
    pub canvas_width: Option<f64>,

    /// Zoom in by one step (x1.2); repeatable
    #[arg(long, action = ArgAction::Count)]
    pub zoom_in: u8,

    /// Zoom out by one step (/1.2); repeatable
    #[arg(long, action = ArgAction::Count)]
    pub zoom_out: u8,
}
