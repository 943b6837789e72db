//! # chatmd
//!
//! A Rust library for turning DiscordChatExporter JSON exports into
//! normalized, cross-referenced Markdown transcripts.
//!
//! ## Overview
//!
//! The pipeline is deterministic and side-effect free:
//!
//! 1. bot messages are dropped and the rest is sorted by raw timestamp;
//! 2. message content is cleaned of configured noise phrases and excess
//!    whitespace, and messages left with nothing to show are hidden;
//! 3. the transcript date range and timezone are derived;
//! 4. each visible message becomes a block with a hashed id, its reply
//!    target and a short quote of the message it answers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatmd::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = read_export("general.json")?;
//!
//!     let renderer = Renderer::new(&NoiseTerms::embedded(), RenderConfig::default())?;
//!     let markdown = renderer.render(&export);
//!
//!     write_markdown("general.md", &markdown)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`model`] — Export object graph ([`Export`](model::Export), [`Message`](model::Message), ...)
//! - [`core`] — The rendering pipeline
//!   - [`core::timestamp`] — timestamp resolution and display
//!   - [`core::normalize`] — [`NoiseTerms`](core::NoiseTerms), [`Normalizer`](core::Normalizer)
//!   - [`core::hash`] — short message ids
//!   - [`core::filter`] — [`FilteredMessages`](core::FilteredMessages)
//!   - [`core::metadata`] — [`Metadata`](core::Metadata)
//!   - [`core::output`] — [`Renderer`](core::Renderer), [`write_markdown`](core::write_markdown)
//! - [`config`] — [`RenderConfig`](config::RenderConfig)
//! - [`parsing`] — JSON loading (requires `json` feature)
//! - [`frequency`] — recurring phrase counter (requires `frequency` feature)
//! - [`cli`] — CLI argument types (requires `cli` feature)
//! - [`error`] — Unified error types ([`ChatmdError`], [`Result`])
//! - [`prelude`] — Convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `json` | Export deserialization | `serde_json` |
//! | `frequency` | Phrase frequency scan | `walkdir`, `csv` |
//! | `cli` | Binaries | `clap`, `tracing-subscriber` |
//! | `full` | Everything (default) | all of the above |

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
#[cfg(feature = "frequency")]
pub mod frequency;
pub mod model;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatmdError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatmd::prelude::*;
///
/// let renderer = Renderer::with_normalizer(Normalizer::default(), RenderConfig::new());
/// assert!(renderer.render(&Export::default()).starts_with("---\n"));
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ChatmdError, Result};

    // Object graph
    pub use crate::model::{Attachment, Author, Export, Message, Reaction, Reference};

    // Pipeline
    pub use crate::config::RenderConfig;
    pub use crate::core::{FilteredMessages, Metadata, NoiseTerms, Normalizer, Renderer, write_markdown};

    #[cfg(feature = "json")]
    pub use crate::parsing::{parse_export, read_export};

    #[cfg(feature = "frequency")]
    pub use crate::frequency::{PhraseCounts, count_messages};
}
