//! Rendering configuration.
//!
//! The default configuration produces the plain transcript layout. Every
//! option adds output on top of it and is off unless enabled.
//!
//! # Example
//!
//! ```rust
//! use chatmd::config::RenderConfig;
//!
//! let config = RenderConfig::new()
//!     .with_edited(true)
//!     .with_reactions(true);
//!
//! assert!(config.include_edited);
//! assert!(!config.extended_front_matter);
//! ```

use serde::{Deserialize, Serialize};

/// Options for the Markdown renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Append `|edited=<timestamp>` to headings of edited messages (default: false)
    pub include_edited: bool,

    /// Emit a `- reactions:` line after the attachments (default: false)
    pub include_reactions: bool,

    /// Add `guild`, `channel_id` and `timezone` to the front matter (default: false)
    pub extended_front_matter: bool,
}

impl RenderConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with every optional section enabled.
    pub fn full() -> Self {
        Self {
            include_edited: true,
            include_reactions: true,
            extended_front_matter: true,
        }
    }

    /// Enables or disables the edited timestamp in headings.
    #[must_use]
    pub fn with_edited(mut self, enabled: bool) -> Self {
        self.include_edited = enabled;
        self
    }

    /// Enables or disables the reactions line.
    #[must_use]
    pub fn with_reactions(mut self, enabled: bool) -> Self {
        self.include_reactions = enabled;
        self
    }

    /// Enables or disables the extra front matter keys.
    #[must_use]
    pub fn with_extended_front_matter(mut self, enabled: bool) -> Self {
        self.extended_front_matter = enabled;
        self
    }
}
