//! Configuration for the huffviz application.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML file passed with `--config`
//! 3. Environment variables: `HUFFVIZ_*` prefix, `__` between sections
//!    (e.g. `HUFFVIZ_LAYOUT__ZOOM=1.5`, `HUFFVIZ_FRAME_DELAY_MS=200`)
//! 4. Command-line flags
//!
//! The tool works with ZERO arguments: a seeded sample text is generated
//! and the seed is printed so runs are reproducible.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use huffviz_core::LayoutParams;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{InputArgs, LayoutArgs};

/// Environment variable prefix
const ENV_PREFIX: &str = "HUFFVIZ";

/// Settings resolved from defaults, config file and environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Layout parameters for static layouts and frames
    pub layout: LayoutParams,

    /// Pause between animation frames
    pub frame_delay_ms: u64,

    /// Length of the generated sample text
    pub sample_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutParams::default(),
            frame_delay_ms: 700,
            sample_len: 200,
        }
    }
}

impl Settings {
    /// Load defaults, then `config_file` (if any), then `HUFFVIZ_*` variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&Settings::default())
            .context("failed to serialize default settings")?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .context("failed to load configuration")?;

        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Apply command-line layout overrides and validate the result.
    pub fn apply_layout_args(&mut self, args: &LayoutArgs) -> Result<()> {
        let layout = &mut self.layout;
        if let Some(v) = args.zoom {
            layout.zoom = v;
        }
        if let Some(v) = args.level_gap {
            layout.level_gap = v;
        }
        if let Some(v) = args.horizontal_gap {
            layout.horizontal_gap = v;
        }
        if let Some(v) = args.node_radius {
            layout.node_radius = v;
        }
        if args.canvas_width.is_some() {
            layout.canvas_width = args.canvas_width;
        }
        for _ in 0..args.zoom_in {
            *layout = layout.zoom_in();
        }
        for _ in 0..args.zoom_out {
            *layout = layout.zoom_out();
        }

        layout.validate().context("invalid layout parameters")
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        let l = &self.layout;
        println!("=== Configuration ===");
        println!("Level gap: {}", l.level_gap);
        println!("Horizontal gap: {}", l.horizontal_gap);
        println!("Node radius: {}", l.node_radius);
        println!("Zoom: {:.3}", l.zoom);
        match l.canvas_width {
            Some(w) => println!("Canvas width: {}", w),
            None => println!("Canvas width: (computed, min {})", l.min_canvas_width),
        }
        println!("Leaf spacing: {}", l.x_spacing());
        println!("Frame delay: {} ms", self.frame_delay_ms);
        println!();
    }
}

/// Where the input text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
    Sample { seed: u64, len: usize },
}

impl InputSource {
    /// Pick the source: `--text`, then `--in`, else a generated sample.
    ///
    /// Without `--seed`, the sample seed is time-based.
    pub fn from_args(args: &InputArgs, settings: &Settings) -> Self {
        if let Some(text) = &args.text {
            return InputSource::Text(text.clone());
        }
        if let Some(path) = &args.input {
            return InputSource::File(path.clone());
        }

        let seed = args.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        InputSource::Sample {
            seed,
            len: args.sample.unwrap_or(settings.sample_len),
        }
    }

    /// Read or generate the text.
    pub fn read(&self) -> Result<String> {
        match self {
            InputSource::Text(text) => Ok(text.clone()),
            InputSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {}", path.display())),
            InputSource::Sample { seed, len } => {
                Ok(crate::input_gen::generate_sample_text(*seed, *len))
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::Text(text) => format!("text ({} chars)", text.chars().count()),
            InputSource::File(path) => format!("file {}", path.display()),
            InputSource::Sample { seed, len } => format!("sample ({len} chars, seed {seed})"),
        }
    }
}
