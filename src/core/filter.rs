//! Bot filtering, ordering and visibility of messages.
//!
//! [`FilteredMessages::new`] runs the whole selection in one pass over the
//! export:
//!
//! 1. bot-authored messages are dropped;
//! 2. the rest is sorted by the **raw** timestamp string (see below);
//! 3. a content index maps each message id to its normalized content,
//!    first occurrence wins;
//! 4. the referenced-id set collects every reply target;
//! 5. a message is visible when it has content, an attachment, or is the
//!    target of a reply.
//!
//! Steps 3 and 4 see every non-bot message, visible or not, so an empty
//! message that somebody replied to stays in the transcript.
//!
//! # Ordering
//!
//! The sort key is the timestamp string as written in the export, compared
//! lexicographically, with messages lacking a timestamp last. This is only
//! chronological when every timestamp shares one zero-padded ISO format with
//! the same offset, which is what DiscordChatExporter writes. Mixed formats
//! are not reordered by instant. The sort is stable.
//!
//! # Examples
//!
//! ```
//! use chatmd::core::filter::FilteredMessages;
//! use chatmd::core::normalize::Normalizer;
//! use chatmd::model::{Author, Message};
//!
//! let messages = vec![
//!     Message::new("2", "second").with_timestamp("2024-01-01T10:01:00+00:00"),
//!     Message::new("1", "first").with_timestamp("2024-01-01T10:00:00+00:00"),
//!     Message::new("3", "beep").with_author(Author::new("bot").bot()),
//!     Message::new("4", "   ").with_timestamp("2024-01-01T10:02:00+00:00"),
//! ];
//!
//! let filtered = FilteredMessages::new(&messages, &Normalizer::default());
//! let ids: Vec<_> = filtered.visible().map(|e| e.message.id().unwrap()).collect();
//! assert_eq!(ids, vec!["1", "2"]);
//! ```

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::core::normalize::Normalizer;
use crate::model::Message;

/// A non-bot message together with its normalized content.
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    pub message: &'a Message,
    /// Content after noise removal; empty means "no content".
    pub content: String,
    pub visible: bool,
}

impl Entry<'_> {
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Sorted non-bot messages plus the lookups the renderer needs.
#[derive(Debug, Clone)]
pub struct FilteredMessages<'a> {
    entries: Vec<Entry<'a>>,
    content_index: HashMap<&'a str, usize>,
    referenced_ids: HashSet<&'a str>,
}

impl<'a> FilteredMessages<'a> {
    /// Filters, sorts and indexes `messages`.
    pub fn new(messages: &'a [Message], normalizer: &Normalizer) -> Self {
        let mut sorted: Vec<&'a Message> = messages.iter().filter(|m| !m.is_bot()).collect();
        let bots = messages.len() - sorted.len();
        sort_by_raw_timestamp(&mut sorted);

        let referenced_ids = collect_referenced_ids(&sorted);

        let mut content_index = HashMap::new();
        let mut entries = Vec::with_capacity(sorted.len());
        for (position, message) in sorted.into_iter().enumerate() {
            let content = normalizer.normalize(message.raw_content());
            if let Some(id) = message.id() {
                content_index.entry(id).or_insert(position);
            }
            let visible = is_visible(message, &content, &referenced_ids);
            if !visible {
                tracing::trace!(id = ?message.id(), "dropping message without content");
            }
            entries.push(Entry {
                message,
                content,
                visible,
            });
        }

        let filtered = Self {
            entries,
            content_index,
            referenced_ids,
        };
        tracing::debug!(
            total = messages.len(),
            bots,
            visible = filtered.visible_count(),
            "filtered messages"
        );
        filtered
    }

    /// All non-bot messages in sort order, visible or not.
    pub fn sorted(&self) -> impl Iterator<Item = &'a Message> + '_ {
        self.entries.iter().map(|e| e.message)
    }

    /// Entries that make it into the transcript, in sort order.
    pub fn visible(&self) -> impl Iterator<Item = &Entry<'a>> {
        self.entries.iter().filter(|e| e.visible)
    }

    /// Normalized content of the first message with this raw id.
    pub fn content_of(&self, id: &str) -> Option<&str> {
        self.content_index
            .get(id)
            .map(|&position| self.entries[position].content.as_str())
    }

    /// Returns `true` if some non-bot message replies to `id`.
    pub fn is_referenced(&self, id: &str) -> bool {
        self.referenced_ids.contains(id)
    }

    pub fn referenced_ids(&self) -> &HashSet<&'a str> {
        &self.referenced_ids
    }

    /// Number of non-bot messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.visible).count()
    }
}

/// Stable sort by raw timestamp string; messages without one go last.
pub fn sort_by_raw_timestamp(messages: &mut [&Message]) {
    messages.sort_by(|a, b| compare_raw_timestamps(a.timestamp(), b.timestamp()));
}

fn compare_raw_timestamps(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn collect_referenced_ids<'a>(messages: &[&'a Message]) -> HashSet<&'a str> {
    messages.iter().filter_map(|m| m.reply_target()).collect()
}

/// Visibility rule: content, any attachment, or an inbound reply.
pub fn is_visible(message: &Message, content: &str, referenced_ids: &HashSet<&str>) -> bool {
    !content.is_empty()
        || message.has_attachments()
        || message.id().is_some_and(|id| referenced_ids.contains(id))
}
