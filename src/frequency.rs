//! Recurring phrase counter.
//!
//! Scans a directory tree of exports and counts how often each short message
//! occurs across all of them. The most frequent ones are good candidates for
//! the noise phrase list.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatmd::frequency::{DEFAULT_LIMIT, DEFAULT_MAX_LENGTH, count_messages, write_report};
//!
//! # fn main() -> chatmd::Result<()> {
//! let counts = count_messages("exports/", DEFAULT_MAX_LENGTH)?;
//! write_report(std::io::stdout(), &counts.top(DEFAULT_LIMIT))?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{ChatmdError, Result};
use crate::model::Export;
use crate::parsing::read_export;

/// Messages with this many characters or more are not counted.
pub const DEFAULT_MAX_LENGTH: usize = 180;

/// Default number of phrases in a report.
pub const DEFAULT_LIMIT: usize = 320;

/// Occurrence counts of trimmed message contents.
#[derive(Debug, Clone, Default)]
pub struct PhraseCounts {
    counts: HashMap<String, u64>,
    files: usize,
}

impl PhraseCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every message of `export` whose trimmed content is non-empty
    /// and shorter than `max_length` characters. Bots are counted too.
    ///
    /// Empty and whitespace-only messages are skipped, so `""` never shows
    /// up as a phrase.
    pub fn add_export(&mut self, export: &Export, max_length: usize) {
        for message in &export.messages {
            let content = message.raw_content().trim();
            if content.is_empty() || content.chars().count() >= max_length {
                continue;
            }
            *self.counts.entry(content.to_string()).or_insert(0) += 1;
        }
        self.files += 1;
    }

    /// Occurrences of one phrase.
    pub fn get(&self, phrase: &str) -> u64 {
        self.counts.get(phrase).copied().unwrap_or(0)
    }

    /// Number of distinct phrases.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of exports added so far.
    pub fn files_scanned(&self) -> usize {
        self.files
    }

    /// Returns at most `limit` phrases, most frequent first, ties by phrase.
    pub fn top(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(phrase, &count)| (phrase.as_str(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(limit);
        ranked
    }
}

/// Reads every `*.json` file under `dir` (recursively) and counts its
/// short messages.
///
/// Any file that fails to read or parse aborts the scan.
pub fn count_messages(dir: impl AsRef<Path>, max_length: usize) -> Result<PhraseCounts> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ChatmdError::not_a_directory(dir));
    }

    let mut counts = PhraseCounts::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() || !is_json_file(entry.path()) {
            continue;
        }
        let export = read_export(entry.path())?;
        counts.add_export(&export, max_length);
        tracing::trace!(path = %entry.path().display(), "counted export");
    }

    tracing::debug!(
        files = counts.files_scanned(),
        phrases = counts.len(),
        "phrase scan finished"
    );
    Ok(counts)
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Writes a ranked report as CSV with a `rank,phrase,count` header.
pub fn write_report<W: Write>(writer: W, top: &[(&str, u64)]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["rank", "phrase", "count"])?;
    for (rank, (phrase, count)) in top.iter().enumerate() {
        writer.write_record([(rank + 1).to_string(), (*phrase).to_string(), count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
