//! Object graph of a DiscordChatExporter JSON export.
//!
//! These types mirror the document written by DiscordChatExporter closely
//! enough to be deserialized directly with serde, but every field is
//! optional: the renderer never validates the schema and substitutes
//! placeholders for anything that is missing.
//!
//! # Examples
//!
//! ```
//! use chatmd::model::{Attachment, Author, Export, Message};
//!
//! let export = Export::new("general")
//!     .with_exported_at("2024-06-01T12:00:00+00:00")
//!     .with_message(
//!         Message::new("1", "Hello!")
//!             .with_timestamp("2024-06-01T10:00:00+00:00")
//!             .with_author(Author::new("alice")),
//!     )
//!     .with_message(
//!         Message::new("2", "")
//!             .with_timestamp("2024-06-01T10:01:00+00:00")
//!             .with_author(Author::new("bob"))
//!             .with_attachment(Attachment::new("notes.pdf", 2048)),
//!     );
//!
//! assert_eq!(export.messages.len(), 2);
//! assert!(export.messages[1].has_attachments());
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// File extensions of attachments that are never listed in the transcript.
const MEDIA_EXTENSIONS: &[&str] = &[
    ".png", ".webp", ".jpg", ".jpeg", ".mp4", ".wmv", ".avi", ".mkv", ".webm", ".asf", ".avif",
    ".jxl",
];

/// Root of a chat export: one channel of one guild.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    /// Guild (server) the channel belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild: Option<Guild>,

    /// Exported channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,

    /// Date range requested when the export was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,

    /// Raw timestamp of the export run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,

    /// Messages in export order. `null` entries are dropped on input.
    #[serde(default, deserialize_with = "skip_nulls")]
    pub messages: Vec<Message>,

    /// Message count declared by the exporter, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guild {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// Declared boundaries of the export, as raw timestamp strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

/// A single chat message.
///
/// Ids are kept as strings: Discord snowflakes are numeric, but nothing in
/// the pipeline depends on that and ids are not guaranteed to be unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    /// Raw message text, before noise removal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Raw send timestamp. Also the sort key, compared as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_edited: Option<String>,

    /// Reply target, if this message is a reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,

    #[serde(default, deserialize_with = "skip_nulls")]
    pub attachments: Vec<Attachment>,

    #[serde(default, deserialize_with = "skip_nulls")]
    pub reactions: Vec<Reaction>,
}

impl Message {
    /// Creates a message with an id and raw content and nothing else.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_timestamp(mut self, ts: impl Into<String>) -> Self {
        self.timestamp = Some(ts.into());
        self
    }

    #[must_use]
    pub fn with_edited(mut self, ts: impl Into<String>) -> Self {
        self.timestamp_edited = Some(ts.into());
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    /// Marks this message as a reply to `message_id`.
    #[must_use]
    pub fn with_reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.reference = Some(Reference::to(message_id));
        self
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    #[must_use]
    pub fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reactions.push(reaction);
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the raw content, or an empty string when absent.
    pub fn raw_content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Returns `true` if the author is flagged as a bot.
    ///
    /// A message without an author is not a bot message.
    pub fn is_bot(&self) -> bool {
        self.author.as_ref().is_some_and(|a| a.is_bot)
    }

    /// Returns the id of the message this one replies to.
    ///
    /// A reference that carries no message id yields `None`.
    pub fn reply_target(&self) -> Option<&str> {
        self.reference.as_ref().and_then(|r| r.message_id.as_deref())
    }

    /// Returns `true` if the message carries any attachment, media included.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub is_bot: bool,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Flags the author as a bot.
    #[must_use]
    pub fn bot(mut self) -> Self {
        self.is_bot = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
}

impl Reference {
    /// Creates a reference to a message in the same channel.
    pub fn to(message_id: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Size in bytes as declared by the exporter; not validated.
    #[serde(default, deserialize_with = "null_default")]
    pub file_size_bytes: i64,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, file_size_bytes: i64) -> Self {
        Self {
            file_name: Some(file_name.into()),
            file_size_bytes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Returns `true` for images and videos, judged by file extension.
    ///
    /// An attachment without a file name is never media.
    pub fn is_media(&self) -> bool {
        let Some(name) = self.file_name.as_deref() else {
            return false;
        };
        let name = name.to_lowercase();
        MEDIA_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(default, deserialize_with = "null_default")]
    pub count: u64,
}

impl Reaction {
    pub fn new(emoji_name: impl Into<String>, count: u64) -> Self {
        Self {
            emoji: Some(Emoji {
                name: Some(emoji_name.into()),
                ..Emoji::default()
            }),
            count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emoji {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Export {
    /// Creates an empty export of the channel `channel_name`.
    pub fn new(channel_name: impl Into<String>) -> Self {
        Self {
            channel: Some(Channel {
                name: Some(channel_name.into()),
                ..Channel::default()
            }),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_guild(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.guild = Some(Guild {
            id: Some(id.into()),
            name: Some(name.into()),
        });
        self
    }

    #[must_use]
    pub fn with_channel_id(mut self, id: impl Into<String>) -> Self {
        self.channel.get_or_insert_with(Channel::default).id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, after: Option<&str>, before: Option<&str>) -> Self {
        self.date_range = Some(DateRange {
            after: after.map(str::to_string),
            before: before.map(str::to_string),
        });
        self
    }

    #[must_use]
    pub fn with_exported_at(mut self, ts: impl Into<String>) -> Self {
        self.exported_at = Some(ts.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    #[must_use]
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }
}

/// Deserializes a possibly-`null` array, dropping `null` elements.
fn skip_nulls<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

/// Deserializes a possibly-`null` scalar, mapping `null` to its default.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
