//! The structured chat record.
//!
//! A [`Message`] is built once by the record builder and never changes
//! afterwards. Derived features (word count, URL count, emojis, kind) are
//! computed at build time so aggregation only reads them.
//!
//! # Examples
//!
//! ```
//! use chatlens::{Message, MessageKind};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 12)
//!     .unwrap()
//!     .and_hms_opt(10, 15, 0)
//!     .unwrap();
//!
//! let msg = Message::build(ts, Some("Alice".into()), "Hello world 👋".into());
//! assert_eq!(msg.sender(), Some("Alice"));
//! assert_eq!(msg.word_count, 3);
//! assert_eq!(msg.emojis, vec!['👋']);
//! assert_eq!(msg.kind, MessageKind::Text);
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::parsing::RecordBuilder;

/// What a record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Text written by a participant
    Text,
    /// Attachment placeholder such as `<Media omitted>`
    Media,
    /// "This message was deleted"
    Deleted,
    /// Group event or other line not authored by a participant
    Notice,
}

impl MessageKind {
    /// Lower-case label, as used in exports.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Media => "media",
            MessageKind::Deleted => "deleted",
            MessageKind::Notice => "notice",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat record.
///
/// | Field | Description |
/// |-------|-------------|
/// | `timestamp` | Local date and time as written in the export |
/// | `sender` | Author; `None` for system notices |
/// | `body` | Message text, newlines of multi-line messages preserved |
/// | `word_count` | Whitespace-delimited tokens; 0 for placeholders |
/// | `url_count` | URL-like substrings |
/// | `emojis` | Emoji code points in order, duplicates kept |
/// | `kind` | [`MessageKind`] |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent (local time of the exporting device).
    pub timestamp: NaiveDateTime,

    /// Display name of the author. Absent for system notices.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender: Option<String>,

    /// Message text.
    pub body: String,

    /// Number of whitespace-delimited tokens in `body`.
    pub word_count: usize,

    /// Number of URL-like substrings in `body`.
    pub url_count: usize,

    /// Emoji code points found in `body`.
    #[serde(default)]
    pub emojis: Vec<char>,

    /// Classification of the record.
    pub kind: MessageKind,
}

impl Message {
    /// Builds a record and derives its features using the shared lexicon.
    ///
    /// Never fails: an unusual body simply yields zero-valued features.
    pub fn build(timestamp: NaiveDateTime, sender: Option<String>, body: String) -> Self {
        RecordBuilder::new().build_parts(timestamp, sender, body)
    }

    /// Returns the author, if any.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns `true` for system notices (no author).
    pub fn is_notice(&self) -> bool {
        self.sender.is_none()
    }

    /// Returns `true` for attachment and deleted-message placeholders.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, MessageKind::Media | MessageKind::Deleted)
    }

    /// Hour of day, 0-23.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday()
    }

    /// Calendar `(year, month)`.
    pub fn year_month(&self) -> (i32, u32) {
        (self.timestamp.year(), self.timestamp.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 12)
            .unwrap()
            .and_hms_opt(22, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_build_text_message() {
        let msg = Message::build(ts(), Some("Alice".into()), "Hello world".into());
        assert_eq!(msg.kind, MessageKind::Text);
        assert_eq!(msg.word_count, 2);
        assert_eq!(msg.url_count, 0);
        assert!(msg.emojis.is_empty());
        assert!(!msg.is_notice());
    }

    #[test]
    fn test_build_counts_urls_and_emojis() {
        let msg = Message::build(
            ts(),
            Some("Bob".into()),
            "look 😂 https://example.com and www.rust-lang.org 😂🔥".into(),
        );
        assert_eq!(msg.url_count, 2);
        assert_eq!(msg.emojis, vec!['😂', '😂', '🔥']);
        assert_eq!(msg.word_count, 6);
    }

    #[test]
    fn test_media_placeholder_has_zero_words() {
        let msg = Message::build(ts(), Some("Alice".into()), "<Media omitted>".into());
        assert_eq!(msg.kind, MessageKind::Media);
        assert_eq!(msg.word_count, 0);
        assert!(msg.is_placeholder());
    }

    #[test]
    fn test_deleted_placeholder_has_zero_words() {
        let msg = Message::build(ts(), Some("Alice".into()), "This message was deleted".into());
        assert_eq!(msg.kind, MessageKind::Deleted);
        assert_eq!(msg.word_count, 0);
    }

    #[test]
    fn test_notice_without_sender() {
        let msg = Message::build(ts(), None, "Alice added Bob".into());
        assert_eq!(msg.kind, MessageKind::Notice);
        assert!(msg.is_notice());
        assert_eq!(msg.sender(), None);
    }

    #[test]
    fn test_empty_body_degrades_to_zero_features() {
        let msg = Message::build(ts(), Some("Alice".into()), String::new());
        assert_eq!(msg.word_count, 0);
        assert_eq!(msg.url_count, 0);
        assert!(msg.emojis.is_empty());
    }

    #[test]
    fn test_date_parts() {
        let msg = Message::build(ts(), Some("Alice".into()), "hi".into());
        assert_eq!(msg.hour(), 22);
        assert_eq!(msg.weekday(), Weekday::Thu);
        assert_eq!(msg.year_month(), (2023, 1));
    }

    #[test]
    fn test_multiline_word_count() {
        let msg = Message::build(ts(), Some("Alice".into()), "one two\nthree\n\nfour".into());
        assert_eq!(msg.word_count, 4);
        assert!(msg.body.contains('\n'));
    }

    #[test]
    fn test_serde_omits_missing_sender() {
        let msg = Message::build(ts(), None, "Alice left".into());
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("sender"));
        assert!(json.contains(r#""kind":"notice""#));
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
