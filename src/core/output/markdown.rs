//! Markdown transcript writer.
//!
//! A transcript is a YAML-style front matter block, a short human-readable
//! header and one block per visible message:
//!
//! ```text
//! ### m:<id>|ts=<YYYY-MM-DD HH:MM>|user=<author>|reply_to=m:<id>
//! > **Replying to:** m:<id>
//! > **Quote:**" <excerpt>"
//!
//! <content>
//! - attachment: name=<file> size=<size> url=<url>
//! ```
//!
//! The reply lines appear only for replies, the quote only when the target's
//! content is known, and attachment lines only for non-media files.

use std::fs;
use std::path::Path;

use crate::config::RenderConfig;
use crate::core::filter::{Entry, FilteredMessages};
use crate::core::hash;
use crate::core::metadata::{Metadata, UNKNOWN};
use crate::core::normalize::{NoiseTerms, Normalizer};
use crate::core::timestamp;
use crate::error::Result;
use crate::model::{Attachment, Author, Export, Reaction};

/// Front matter schema marker.
pub const SCHEMA: &str = "chatlog-md-v1";

/// Author label used when neither name nor nickname is usable.
pub const ANONYMOUS_AUTHOR: &str = "any";

const EXCERPT_LIMIT: usize = 70;
const EXCERPT_CUT: usize = 65;
const EXCERPT_MARKER: &str = "..";

const SIZE_UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// Renders exports into Markdown transcripts.
///
/// A renderer owns its compiled noise list and can be reused for any number
/// of exports, including from several threads.
///
/// # Example
///
/// ```rust
/// use chatmd::config::RenderConfig;
/// use chatmd::core::normalize::NoiseTerms;
/// use chatmd::core::output::Renderer;
/// use chatmd::model::{Author, Export, Message};
///
/// # fn main() -> chatmd::Result<()> {
/// let export = Export::new("general").with_message(
///     Message::new("1", "hello")
///         .with_timestamp("2024-01-15T10:30:00+00:00")
///         .with_author(Author::new("alice")),
/// );
///
/// let renderer = Renderer::new(&NoiseTerms::empty(), RenderConfig::default())?;
/// let markdown = renderer.render(&export);
/// assert!(markdown.contains("|ts=2024-01-15 10:30|user=alice\nhello\n"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    normalizer: Normalizer,
    config: RenderConfig,
}

impl Renderer {
    /// Compiles `terms` and creates a renderer.
    pub fn new(terms: &NoiseTerms, config: RenderConfig) -> Result<Self> {
        Ok(Self::with_normalizer(Normalizer::new(terms)?, config))
    }

    /// Creates a renderer around an already compiled normalizer.
    pub fn with_normalizer(normalizer: Normalizer, config: RenderConfig) -> Self {
        Self { normalizer, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Renders the whole transcript.
    pub fn render(&self, export: &Export) -> String {
        let filtered = FilteredMessages::new(&export.messages, &self.normalizer);
        let metadata = Metadata::derive(export, filtered.sorted());

        let mut out = String::with_capacity(256 + export.messages.len() * 128);
        self.push_front_matter(&mut out, &metadata);
        push_header(&mut out, &metadata);

        let mut blocks = 0usize;
        for entry in filtered.visible() {
            self.push_message(&mut out, entry, &filtered);
            blocks += 1;
        }

        tracing::debug!(channel = %metadata.channel, blocks, "rendered transcript");
        out
    }

    fn push_front_matter(&self, out: &mut String, metadata: &Metadata) {
        out.push_str("---\n");
        out.push_str(&format!("schema: {SCHEMA}\n"));
        out.push_str("platform: discord\n");
        if self.config.extended_front_matter {
            push_quoted_key(out, "guild", &metadata.guild);
        }
        push_quoted_key(out, "channel", &metadata.channel);
        if self.config.extended_front_matter {
            push_quoted_key(out, "channel_id", &metadata.channel_id);
        }
        out.push_str(&format!("conversation_from: {}\n", metadata.conversation_from));
        out.push_str(&format!("conversation_to: {}\n", metadata.conversation_to));
        if self.config.extended_front_matter {
            push_quoted_key(out, "timezone", &metadata.timezone);
        }
        out.push_str(&format!("exported_at: {}\n", metadata.exported_at));
        out.push_str("---\n\n");
    }

    fn push_message(&self, out: &mut String, entry: &Entry<'_>, filtered: &FilteredMessages<'_>) {
        let message = entry.message;
        let reply_target = message.reply_target();

        let mut heading = vec![
            hash::message_id(message.id()),
            format!("ts={}", sanitize_heading_value(&heading_timestamp(message.timestamp()))),
            format!("user={}", sanitize_heading_value(&author_label(message.author.as_ref()))),
        ];
        if let Some(target) = reply_target {
            heading.push(format!("reply_to={}", hash::message_id(Some(target))));
        }
        if self.config.include_edited {
            if let Some(edited) = message.timestamp_edited.as_deref() {
                heading.push(format!(
                    "edited={}",
                    sanitize_heading_value(&timestamp::display_timestamp(edited))
                ));
            }
        }
        out.push_str("### ");
        out.push_str(&heading.join("|"));
        out.push('\n');

        if let Some(target) = reply_target {
            out.push_str(&format!("> **Replying to:** {}\n", hash::message_id(Some(target))));
            let quote = filtered.content_of(target).map(excerpt).filter(|e| !e.is_empty());
            if let Some(quote) = quote {
                out.push_str(&format!("> **Quote:**\" {quote}\"\n"));
            }
            out.push('\n');
        }

        if entry.has_content() {
            out.push_str(&entry.content);
        }
        out.push('\n');

        for attachment in message.attachments.iter().filter(|a| !a.is_media()) {
            out.push_str(&format_attachment(attachment));
            out.push('\n');
        }

        if self.config.include_reactions {
            if let Some(reactions) = format_reactions(&message.reactions) {
                out.push_str(&format!("- reactions: {reactions}\n"));
            }
        }

        out.push('\n');
    }
}

fn push_header(out: &mut String, metadata: &Metadata) {
    out.push_str(&format!("# {}\n\n", metadata.channel));
    out.push_str("**Platform:** Discord\n");
    out.push_str(&format!(
        "**Date range:** {} \u{2014} {} ({})\n\n",
        metadata.conversation_from, metadata.conversation_to, metadata.timezone
    ));
}

fn push_quoted_key(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("{key}: \"{}\"\n", escape_quoted(value)));
}

/// Escapes a value for a double-quoted front matter string.
pub fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn heading_timestamp(raw: Option<&str>) -> String {
    raw.map_or_else(|| UNKNOWN.to_string(), timestamp::display_timestamp)
}

/// Picks the display name of an author.
///
/// Blank values do not count. Of two usable values the strictly shorter one
/// wins, and the nickname wins a tie. With nothing usable the label is
/// [`ANONYMOUS_AUTHOR`].
///
/// ```
/// use chatmd::core::output::author_label;
/// use chatmd::model::Author;
///
/// let author = Author::new("Alexander").with_nickname("Al");
/// assert_eq!(author_label(Some(&author)), "Al");
/// assert_eq!(author_label(None), "any");
/// ```
pub fn author_label(author: Option<&Author>) -> String {
    fn usable(value: Option<&String>) -> Option<&str> {
        value.map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    let name = author.and_then(|a| usable(a.name.as_ref()));
    let nickname = author.and_then(|a| usable(a.nickname.as_ref()));

    let label = match (name, nickname) {
        (Some(name), Some(nickname)) => {
            if name.chars().count() < nickname.chars().count() {
                name
            } else {
                nickname
            }
        }
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => ANONYMOUS_AUTHOR,
    };
    label.to_string()
}

/// Replaces `|`, the heading field separator, with `/`.
pub fn sanitize_heading_value(value: &str) -> String {
    value.replace('|', "/")
}

/// Flattens content into one line and shortens it for a reply quote.
pub fn excerpt(content: &str) -> String {
    let single_line = content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if single_line.chars().count() <= EXCERPT_LIMIT {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(EXCERPT_CUT).collect();
    cut.push_str(EXCERPT_MARKER);
    cut
}

/// Formats a byte count with binary units and one decimal place.
///
/// ```
/// use chatmd::core::output::human_readable_size;
///
/// assert_eq!(human_readable_size(512), "512B");
/// assert_eq!(human_readable_size(2048), "2.0KB");
/// assert_eq!(human_readable_size(1_048_576), "1.0MB");
/// ```
pub fn human_readable_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes}B");
    }

    let value = u128::from(bytes);
    let mut divisor: u128 = 1;
    let mut exponent = 0;
    while exponent < SIZE_UNITS.len() && value >= divisor * 1024 {
        divisor *= 1024;
        exponent += 1;
    }

    // Tenths, rounded half up
    let tenths = (value * 20 + divisor) / (divisor * 2);
    format!("{}.{}{}", tenths / 10, tenths % 10, SIZE_UNITS[exponent - 1])
}

fn format_attachment(attachment: &Attachment) -> String {
    // Negative sizes are echoed as plain bytes
    let size = attachment.file_size_bytes;
    let mut line = format!(
        "- attachment: name={} size={}",
        attachment.file_name.as_deref().unwrap_or(UNKNOWN),
        u64::try_from(size).map_or_else(|_| format!("{size}B"), human_readable_size)
    );
    if let Some(url) = attachment.url.as_deref() {
        line.push_str(" url=");
        line.push_str(url);
    }
    line
}

/// Formats one reaction as `"<emoji>"=<count>`.
///
/// Reactions without an emoji or with a zero count yield `None`.
pub fn format_reaction(reaction: &Reaction) -> Option<String> {
    let emoji = reaction.emoji.as_ref()?;
    if reaction.count == 0 {
        return None;
    }
    let label = emoji
        .name
        .as_deref()
        .or(emoji.code.as_deref())
        .unwrap_or("?");
    Some(format!("\"{label}\"={}", reaction.count))
}

fn format_reactions(reactions: &[Reaction]) -> Option<String> {
    let formatted: Vec<String> = reactions.iter().filter_map(format_reaction).collect();
    if formatted.is_empty() {
        None
    } else {
        Some(formatted.join(" "))
    }
}

/// Writes a rendered document, creating missing parent directories.
pub fn write_markdown(path: impl AsRef<Path>, document: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document)?;
    tracing::debug!(path = %path.display(), bytes = document.len(), "wrote transcript");
    Ok(())
}
