//! Short deterministic identifiers for headings and reply links.
//!
//! Message ids are Discord snowflakes (18-19 digits), which are noisy in a
//! transcript. Headings carry a 32-bit polynomial hash instead. The hash is
//! computed over UTF-16 code units with multiplier 31 and wrapping
//! arithmetic, so existing transcripts keep their ids bit for bit.

/// Prefix of every message id in the transcript.
pub const MESSAGE_ID_PREFIX: &str = "m:";

/// Placeholder hashed in place of an absent message id.
pub const UNKNOWN_ID: &str = "unknown";

/// Computes the 32-bit rolling hash of `input`.
pub fn rolling_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Renders the hash of `input` as lowercase unsigned hexadecimal.
///
/// ```
/// use chatmd::core::hash::short_id;
///
/// assert_eq!(short_id(""), "0");
/// assert_eq!(short_id("a"), "61");
/// assert_eq!(short_id("hello"), "5e918d2");
/// ```
pub fn short_id(input: &str) -> String {
    format!("{:x}", rolling_hash(input) as u32)
}

/// Formats a raw message id as it appears in headings, e.g. `m:5e918d2`.
pub fn message_id(raw: Option<&str>) -> String {
    format!("{MESSAGE_ID_PREFIX}{}", short_id(raw.unwrap_or(UNKNOWN_ID)))
}
