//! Transcript writers.
//!
//! - [`Renderer`] - renders an [`Export`](crate::model::Export) into Markdown
//! - [`write_markdown`] - writes a rendered document to disk
//!
//! The formatting helpers used by the renderer are public so callers can
//! reproduce individual fields (author labels, sizes, excerpts).
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatmd::Result<()> {
//! use chatmd::config::RenderConfig;
//! use chatmd::core::normalize::NoiseTerms;
//! use chatmd::core::output::{Renderer, write_markdown};
//! use chatmd::model::Export;
//!
//! let renderer = Renderer::new(&NoiseTerms::embedded(), RenderConfig::default())?;
//! let document = renderer.render(&Export::new("general"));
//! write_markdown("out/general.md", &document)?;
//! # Ok(())
//! # }
//! ```

mod markdown;

pub use markdown::{
    ANONYMOUS_AUTHOR, Renderer, SCHEMA, author_label, escape_quoted, excerpt, format_reaction,
    human_readable_size, sanitize_heading_value, write_markdown,
};
