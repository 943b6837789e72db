//! Transcript-level metadata derived from the export.
//!
//! The declared date range of the export wins over anything computed from
//! the messages. When a boundary is missing or cannot be parsed it is derived
//! from the resolved message timestamps: the earliest for the start, the
//! latest for the end (or the start itself when no message timestamp parses).

use chrono::{DateTime, FixedOffset};

use crate::core::timestamp::{self, format_date, offset_label};
use crate::model::{Export, Message};

/// Placeholder for any value that cannot be derived.
pub const UNKNOWN: &str = "<unknown>";

/// Timezone label used when neither boundary resolves.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Labels shown in the front matter and the transcript header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// `#name`, or `#<unknown>`.
    pub channel: String,
    pub channel_id: String,
    pub guild: String,
    /// Start date (`YYYY-MM-DD`) or `<unknown>`.
    pub conversation_from: String,
    /// End date (`YYYY-MM-DD`) or `<unknown>`.
    pub conversation_to: String,
    pub timezone: String,
    pub exported_at: String,
}

impl Metadata {
    /// Derives the metadata of `export` from its (filtered, sorted) messages.
    pub fn derive<'a>(export: &Export, messages: impl IntoIterator<Item = &'a Message>) -> Self {
        let resolved: Vec<DateTime<FixedOffset>> = messages
            .into_iter()
            .filter_map(|m| timestamp::resolve_opt(m.timestamp()))
            .collect();

        let declared = export.date_range.as_ref();
        let from = timestamp::resolve_opt(declared.and_then(|r| r.after.as_deref()))
            .or_else(|| earliest(&resolved));
        let to = timestamp::resolve_opt(declared.and_then(|r| r.before.as_deref()))
            .or_else(|| latest(&resolved))
            .or(from);

        let timezone = from
            .or(to)
            .map_or_else(|| DEFAULT_TIMEZONE.to_string(), |dt| offset_label(dt.offset()));

        Self {
            channel: channel_label(export),
            channel_id: export
                .channel
                .as_ref()
                .and_then(|c| c.id.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            guild: export
                .guild
                .as_ref()
                .and_then(|g| g.name.clone())
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            conversation_from: from.map_or_else(|| UNKNOWN.to_string(), |dt| format_date(&dt)),
            conversation_to: to.map_or_else(|| UNKNOWN.to_string(), |dt| format_date(&dt)),
            timezone,
            exported_at: exported_at_label(export.exported_at.as_deref()),
        }
    }
}

/// `#` followed by the channel name, or `#<unknown>` when absent or blank.
pub fn channel_label(export: &Export) -> String {
    let name = export
        .channel
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(UNKNOWN);
    format!("#{name}")
}

fn exported_at_label(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => timestamp::display_timestamp(raw),
        None => UNKNOWN.to_string(),
    }
}

fn earliest(resolved: &[DateTime<FixedOffset>]) -> Option<DateTime<FixedOffset>> {
    resolved.iter().min().copied()
}

fn latest(resolved: &[DateTime<FixedOffset>]) -> Option<DateTime<FixedOffset>> {
    resolved.iter().max().copied()
}
