//! Message content cleanup.
//!
//! Normalization runs in two passes. First every configured noise phrase is
//! removed, in list order and case-insensitively. A phrase is matched
//! literally; the edges of the phrase that are alphanumeric must sit on a
//! word boundary, so `lol` does not eat the middle of `lollipop` while `:)`
//! is removed wherever it appears. Then whitespace is tidied up: runs of
//! spaces and tabs collapse to one space, whitespace-only lines are blanked,
//! three or more newlines collapse to a paragraph break and the result is
//! trimmed.
//!
//! # Examples
//!
//! ```
//! use chatmd::core::normalize::{NoiseTerms, Normalizer};
//!
//! # fn main() -> chatmd::Result<()> {
//! let terms = NoiseTerms::new(["Lol sounds good", "lol"]);
//! let normalizer = Normalizer::new(&terms)?;
//!
//! assert_eq!(normalizer.normalize("Lol sounds good to me"), "to me");
//! assert_eq!(normalizer.normalize("lollipop lol"), "lollipop");
//! assert_eq!(normalizer.normalize("lol"), "");
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::error::{ChatmdError, Result};

/// Noise list compiled into the crate, one phrase per line.
const EMBEDDED_TERMS: &str = include_str!("../../resources/words.txt");

static HORIZONTAL_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t ]{2,}").expect("horizontal whitespace pattern is valid"));

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[\t\n\x0B\x0C\r ]+$").expect("blank line pattern is valid")
});

static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline run pattern is valid"));

/// Ordered list of noise phrases.
///
/// Order matters: phrases are removed one after another, so a longer phrase
/// listed after one of its own words will never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoiseTerms {
    terms: Vec<String>,
}

impl NoiseTerms {
    /// Creates a list from phrases, dropping empty ones.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(Into::into)
                .filter(|term| !term.is_empty())
                .collect(),
        }
    }

    /// Creates an empty list; normalization then only tidies whitespace.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses one phrase per line, trimming each line and skipping blank ones.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(str::trim))
    }

    /// Reads a phrase list file (UTF-8, one phrase per line).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    /// Returns the phrase list shipped with the crate.
    pub fn embedded() -> Self {
        Self::from_text(EMBEDDED_TERMS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Content normalizer with its noise phrases compiled once.
#[derive(Debug, Clone)]
pub struct Normalizer {
    patterns: Vec<Regex>,
}

impl Normalizer {
    /// Compiles the noise list into boundary-aware matchers.
    pub fn new(terms: &NoiseTerms) -> Result<Self> {
        let patterns = terms
            .iter()
            .map(|term| {
                RegexBuilder::new(&removal_pattern(term))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ChatmdError::InvalidNoiseTerm {
                        term: term.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Returns a normalizer without noise phrases.
    pub fn whitespace_only() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Number of compiled noise phrases.
    pub fn term_count(&self) -> usize {
        self.patterns.len()
    }

    /// Cleans raw message text. An empty result means "no content".
    pub fn normalize(&self, raw: &str) -> String {
        let mut cleaned = raw.to_string();
        for pattern in &self.patterns {
            if pattern.is_match(&cleaned) {
                cleaned = pattern.replace_all(&cleaned, "").into_owned();
            }
        }

        let cleaned = HORIZONTAL_RUNS.replace_all(&cleaned, " ");
        let cleaned = BLANK_LINES.replace_all(&cleaned, "");
        let cleaned = NEWLINE_RUNS.replace_all(&cleaned, "\n\n");
        cleaned.trim().to_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::whitespace_only()
    }
}

/// Builds the literal pattern for one phrase, anchoring alphanumeric edges.
fn removal_pattern(term: &str) -> String {
    let starts_with_word = term.chars().next().is_some_and(char::is_alphanumeric);
    let ends_with_word = term.chars().next_back().is_some_and(char::is_alphanumeric);

    let mut pattern = String::with_capacity(term.len() + 4);
    if starts_with_word {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if ends_with_word {
        pattern.push_str(r"\b");
    }
    pattern
}
