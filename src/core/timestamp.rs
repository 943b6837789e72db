//! Timestamp resolution and display.
//!
//! Exports are not consistent about their timestamp format: DiscordChatExporter
//! writes RFC 3339 with a varying number of fractional digits, hand-edited or
//! converted files drop the offset or the seconds. [`resolve`] tries a strict
//! RFC 3339 parse first and then walks a list of permissive formats; values
//! without an offset are taken as UTC.
//!
//! # Examples
//!
//! ```
//! use chatmd::core::timestamp::{format_timestamp, offset_label, resolve};
//!
//! let ts = resolve("2024-01-15T10:30:00.1234567+02:00").unwrap();
//! assert_eq!(format_timestamp(&ts), "2024-01-15 10:30");
//! assert_eq!(offset_label(ts.offset()), "+02:00");
//!
//! // Missing offset is read as UTC
//! let ts = resolve("2024-01-15 10:30:00").unwrap();
//! assert_eq!(offset_label(ts.offset()), "Z");
//!
//! assert!(resolve("yesterday").is_none());
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Offset-aware formats tried after RFC 3339, in order.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Offset-less formats, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a raw timestamp into an offset-aware instant.
///
/// Returns `None` when neither the strict nor the permissive parser accepts
/// the input; callers fall back to the raw text for display or treat the
/// value as absent.
pub fn resolve(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    let resolved = resolve_permissive(raw);
    if resolved.is_none() {
        tracing::trace!(raw, "unparseable timestamp");
    }
    resolved
}

/// Resolves an optional raw timestamp; `None` stays `None`.
pub fn resolve_opt(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    raw.and_then(resolve)
}

fn resolve_permissive(raw: &str) -> Option<DateTime<FixedOffset>> {
    // Some writers use lowercase designators
    let normalized = raw.replace('t', "T").replace('z', "Z");
    let raw = normalized.as_str();

    if let Some(stripped) = raw.strip_suffix('Z') {
        return parse_naive(stripped).map(|naive| naive.and_utc().fixed_offset());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    parse_naive(raw).map(|naive| naive.and_utc().fixed_offset())
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive);
        }
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats an instant as `YYYY-MM-DD HH:MM` in its own offset.
pub fn format_timestamp(dt: &DateTime<FixedOffset>) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

/// Formats the calendar date of an instant in its own offset.
pub fn format_date(dt: &DateTime<FixedOffset>) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// Formats a raw timestamp for display, echoing it unchanged when it cannot
/// be parsed.
pub fn display_timestamp(raw: &str) -> String {
    resolve(raw).map_or_else(|| raw.to_string(), |dt| format_timestamp(&dt))
}

/// Renders an offset as `Z`, `+HH:MM` or `+HH:MM:SS`.
pub fn offset_label(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    if total == 0 {
        return "Z".to_string();
    }

    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, (abs / 60) % 60, abs % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}
