//! Loading export documents.
//!
//! The rendering core works on an in-memory [`Export`](crate::model::Export);
//! this module builds one from DiscordChatExporter JSON.

#[cfg(feature = "json")]
pub mod discord;

#[cfg(feature = "json")]
pub use discord::{parse_export, read_export};
