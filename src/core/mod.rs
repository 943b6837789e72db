//! Core rendering pipeline.
//!
//! This module contains, leaf first:
//! - [`timestamp`] - Timestamp parsing and display
//! - [`normalize`] - Noise phrase removal and whitespace cleanup
//! - [`hash`] - Short message ids for headings
//! - [`filter`] - Bot filtering, ordering and visibility
//! - [`metadata`] - Channel label, date range and timezone
//! - [`output`] - Markdown writer
//!
//! # Quick Start
//!
//! ```rust
//! use chatmd::core::{NoiseTerms, RenderConfig, Renderer};
//! use chatmd::model::{Export, Message};
//!
//! # fn main() -> chatmd::Result<()> {
//! let export = Export::new("general").with_message(Message::new("1", "hi"));
//! let renderer = Renderer::new(&NoiseTerms::embedded(), RenderConfig::new())?;
//! assert!(renderer.render(&export).contains("\nhi\n"));
//! # Ok(())
//! # }
//! ```

pub mod filter;
pub mod hash;
pub mod metadata;
pub mod normalize;
pub mod output;
pub mod timestamp;

pub use filter::FilteredMessages;
pub use metadata::Metadata;
pub use normalize::{NoiseTerms, Normalizer};
pub use output::{Renderer, write_markdown};

pub use crate::config::RenderConfig;
