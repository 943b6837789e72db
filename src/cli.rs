//! Command-line interface definitions using clap.
//!
//! This module defines:
//! - [`Args`] - arguments of the `chatmd` converter
//! - [`FreqArgs`] - arguments of the `chatmd-freq` phrase counter
//! - [`init_tracing`] - stderr logging shared by both binaries
//!
//! # Example
//!
//! ```rust
//! use chatmd::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatmd", "general.json", "general.md", "--reactions"]);
//! let config = args.render_config();
//! assert!(config.include_reactions);
//! assert!(!config.include_edited);
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt::Layer, prelude::*, registry::Registry};

use crate::config::RenderConfig;
use crate::core::normalize::NoiseTerms;
use crate::error::Result;
use crate::frequency::{DEFAULT_LIMIT, DEFAULT_MAX_LENGTH};

/// Convert a DiscordChatExporter JSON export into a Markdown transcript.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatmd")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatmd general.json general.md
    chatmd general.json out/general.md --words words.txt
    chatmd general.json general.md --edited --reactions

Set RUST_LOG=debug for pipeline details on stderr.")]
pub struct Args {
    /// Path to the JSON export
    pub source: PathBuf,

    /// Path of the Markdown file to write
    pub destination: PathBuf,

    /// Noise phrase list, one phrase per line (default: built-in list)
    #[arg(short, long, value_name = "FILE")]
    pub words: Option<PathBuf>,

    /// Add edit timestamps to message headings
    #[arg(short, long)]
    pub edited: bool,

    /// List reactions under each message
    #[arg(short, long)]
    pub reactions: bool,

    /// Add guild, channel id and timezone to the front matter
    #[arg(long)]
    pub extended_front_matter: bool,
}

impl Args {
    /// Builds the renderer configuration from the flags.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new()
            .with_edited(self.edited)
            .with_reactions(self.reactions)
            .with_extended_front_matter(self.extended_front_matter)
    }

    /// Loads the noise list from `--words`, or the built-in one.
    pub fn noise_terms(&self) -> Result<NoiseTerms> {
        match &self.words {
            Some(path) => NoiseTerms::from_file(path),
            None => Ok(NoiseTerms::embedded()),
        }
    }
}

/// Count recurring short messages across a directory of exports.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatmd-freq")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatmd-freq exports/
    chatmd-freq exports/ --limit 50 > phrases.csv")]
pub struct FreqArgs {
    /// Directory scanned recursively for *.json exports
    pub directory: PathBuf,

    /// Only count messages shorter than this many characters
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Number of phrases to print
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
}

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let stderr_layer = Layer::new()
        .with_writer(std::io::stderr)
        .with_target(true);

    Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(stderr_layer)
        .try_init()
        .ok();
}
