//! DiscordChatExporter JSON loading.
//!
//! The document is deserialized straight into the [`Export`] model. Every
//! field is optional, unknown fields are ignored and `null` entries inside
//! the `messages` array are dropped. A document that is `null` as a whole is
//! reported as [`ChatmdError::MissingExport`].

use std::fs;
use std::path::Path;

use crate::error::{ChatmdError, Result};
use crate::model::Export;

const BOM: char = '\u{feff}';

/// Parses an export document from JSON text.
///
/// # Example
///
/// ```rust
/// use chatmd::parsing::parse_export;
///
/// # fn main() -> chatmd::Result<()> {
/// let export = parse_export(r#"{"channel": {"name": "general"}, "messages": []}"#)?;
/// assert_eq!(export.channel.unwrap().name.as_deref(), Some("general"));
///
/// assert!(parse_export("null").unwrap_err().is_missing_export());
/// # Ok(())
/// # }
/// ```
pub fn parse_export(json: &str) -> Result<Export> {
    parse_document(json).and_then(|export| export.ok_or_else(|| ChatmdError::missing_export(None)))
}

/// Reads and parses an export file, attaching the path to parse errors.
pub fn read_export(path: impl AsRef<Path>) -> Result<Export> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let export = parse_document(&content)
        .map_err(|e| match e {
            ChatmdError::Json { source, .. } => ChatmdError::json(source, Some(path.to_path_buf())),
            other => other,
        })?
        .ok_or_else(|| ChatmdError::missing_export(Some(path.to_path_buf())))?;

    tracing::debug!(
        path = %path.display(),
        messages = export.messages.len(),
        "loaded export"
    );
    Ok(export)
}

fn parse_document(json: &str) -> Result<Option<Export>> {
    let json = json.strip_prefix(BOM).unwrap_or(json);
    serde_json::from_str::<Option<Export>>(json).map_err(|source| ChatmdError::json(source, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "guild": {"id": "1", "name": "Rustaceans", "iconUrl": "https://cdn.example/icon.png"},
        "channel": {"id": "42", "type": "GuildTextChat", "category": "Text", "name": "general", "topic": null},
        "dateRange": {"after": null, "before": null},
        "exportedAt": "2024-01-16T08:00:00.1234567+00:00",
        "messages": [
            {
                "id": "100",
                "type": "Default",
                "timestamp": "2024-01-15T10:30:00.123+00:00",
                "timestampEdited": null,
                "isPinned": false,
                "content": "hello",
                "author": {"id": "7", "name": "alice", "discriminator": "0000", "nickname": "Al", "isBot": false},
                "attachments": [{"id": "9", "url": "https://cdn.example/a.txt", "fileName": "a.txt", "fileSizeBytes": 12}],
                "reactions": [{"emoji": {"id": "", "name": "👍", "code": "thumbsup"}, "count": 2}],
                "mentions": []
            },
            null,
            {
                "id": "101",
                "timestamp": "2024-01-15T10:31:00+00:00",
                "content": "reply",
                "author": {"name": "bot", "isBot": true},
                "reference": {"messageId": "100", "channelId": "42", "guildId": "1"}
            }
        ],
        "messageCount": 2
    }"#;

    #[test]
    fn test_parse_full_document() {
        let export = parse_export(SAMPLE).unwrap();
        assert_eq!(export.guild.as_ref().unwrap().name.as_deref(), Some("Rustaceans"));
        assert_eq!(export.channel.as_ref().unwrap().id.as_deref(), Some("42"));
        assert_eq!(export.message_count, Some(2));
        assert_eq!(export.messages.len(), 2);

        let first = &export.messages[0];
        assert_eq!(first.id(), Some("100"));
        assert_eq!(first.author.as_ref().unwrap().nickname.as_deref(), Some("Al"));
        assert_eq!(first.attachments[0].file_size_bytes, 12);
        assert_eq!(first.reactions[0].count, 2);

        let second = &export.messages[1];
        assert!(second.is_bot());
        assert_eq!(second.reply_target(), Some("100"));
    }

    #[test]
    fn test_parse_minimal_document() {
        let export = parse_export("{}").unwrap();
        assert!(export.channel.is_none());
        assert!(export.messages.is_empty());
    }

    #[test]
    fn test_parse_null_document() {
        let err = parse_export("null").unwrap_err();
        assert!(err.is_missing_export());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_export("{ not json").unwrap_err();
        assert!(err.is_json());
    }

    #[test]
    fn test_parse_null_scalars() {
        let json = r#"{"messages": [{
            "id": "1",
            "content": "hi",
            "author": {"name": "a", "isBot": null},
            "attachments": [
                {"fileName": "a.txt", "fileSizeBytes": null},
                {"fileName": "b.txt", "fileSizeBytes": -1}
            ],
            "reactions": [{"emoji": {"name": "👍"}, "count": null}]
        }]}"#;
        let export = parse_export(json).unwrap();
        let message = &export.messages[0];
        assert!(!message.is_bot());
        assert_eq!(message.attachments[0].file_size_bytes, 0);
        assert_eq!(message.attachments[1].file_size_bytes, -1);
        assert_eq!(message.reactions[0].count, 0);
    }

    #[test]
    fn test_parse_with_bom() {
        let export = parse_export("\u{feff}{\"messages\": []}").unwrap();
        assert!(export.messages.is_empty());
    }

    #[test]
    fn test_read_export_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        fs::write(&path, SAMPLE).unwrap();
        let export = read_export(&path).unwrap();
        assert_eq!(export.messages.len(), 2);
    }

    #[test]
    fn test_read_export_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "[1, 2").unwrap();
        let err = read_export(&broken).unwrap_err();
        assert!(err.to_string().contains("broken.json"));

        let null = dir.path().join("null.json");
        fs::write(&null, "null").unwrap();
        let err = read_export(&null).unwrap_err();
        assert!(err.is_missing_export());
        assert!(err.to_string().contains("null.json"));

        let err = read_export(dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_io());
    }
}
