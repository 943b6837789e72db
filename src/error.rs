//! Unified error types for chatmd.
//!
//! The rendering pipeline itself is infallible: unparseable timestamps,
//! missing optional fields and dangling references are all recovered
//! locally. Errors only come from the edges of the crate (reading files,
//! deserializing the export document, compiling the noise list) and from
//! the one caller contract violation, a missing export document.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatmd operations.
///
/// # Example
///
/// ```rust
/// use chatmd::error::Result;
/// use chatmd::model::Export;
///
/// fn load() -> Result<Export> {
///     Ok(Export::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatmdError>;

/// The error type for all chatmd operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatmdError {
    /// An I/O error occurred.
    ///
    /// This typically happens when the source file doesn't exist, the
    /// destination is not writable, or a directory scan hits a permission
    /// problem.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export document is not valid JSON for the expected structure.
    #[cfg(feature = "json")]
    #[error("Failed to parse Discord export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Json {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// CSV writing error.
    ///
    /// This can occur when writing the phrase frequency report.
    #[cfg(feature = "frequency")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The export document itself is absent (a JSON `null`).
    ///
    /// This is the only structural problem the pipeline reports instead of
    /// recovering from it.
    #[error("Export document is missing{}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    MissingExport {
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A directory was expected but the path is something else.
    #[error("Provided path is not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// A noise phrase could not be compiled into a matcher.
    #[error("Invalid noise phrase '{term}': {source}")]
    InvalidNoiseTerm {
        /// The phrase as it appeared in the list
        term: String,
        /// The underlying pattern error
        #[source]
        source: regex::Error,
    },
}

impl ChatmdError {
    /// Creates a JSON parse error for an export document.
    #[cfg(feature = "json")]
    pub fn json(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatmdError::Json { source, path }
    }

    /// Creates a missing export error.
    pub fn missing_export(path: Option<PathBuf>) -> Self {
        ChatmdError::MissingExport { path }
    }

    /// Creates a not-a-directory error.
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        ChatmdError::NotADirectory { path: path.into() }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatmdError::Io(_))
    }

    /// Returns `true` if the export document was missing.
    pub fn is_missing_export(&self) -> bool {
        matches!(self, ChatmdError::MissingExport { .. })
    }

    /// Returns `true` if this is a JSON error.
    pub fn is_json(&self) -> bool {
        #[cfg(feature = "json")]
        {
            matches!(self, ChatmdError::Json { .. })
        }
        #[cfg(not(feature = "json"))]
        {
            false
        }
    }
}
