//! Assembling parsed units into [`Message`]s with derived features.

use chrono::NaiveDateTime;

use super::line::ParsedLine;
use crate::lexicon::{self, Lexicon};
use crate::message::{Message, MessageKind};

/// Derives word count, URL count, emojis and kind for each record.
///
/// Building never fails: an empty or unusual body yields a message with
/// zero-valued features.
#[derive(Debug, Clone, Copy)]
pub struct RecordBuilder<'a> {
    lexicon: &'a Lexicon,
}

impl RecordBuilder<'static> {
    /// Uses the shared lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::shared(),
        }
    }
}

impl Default for RecordBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RecordBuilder<'a> {
    pub fn with_lexicon(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn build(&self, line: ParsedLine) -> Message {
        self.build_parts(line.timestamp, line.sender, line.body)
    }

    pub fn build_parts(
        &self,
        timestamp: NaiveDateTime,
        sender: Option<String>,
        body: String,
    ) -> Message {
        let kind = classify(sender.is_some(), &body);

        // placeholders carry no words of their own
        let word_count = match kind {
            MessageKind::Media | MessageKind::Deleted => 0,
            MessageKind::Text | MessageKind::Notice => body.split_whitespace().count(),
        };

        Message {
            url_count: self.lexicon.count_urls(&body),
            emojis: lexicon::extract_emojis(&body),
            timestamp,
            sender,
            body,
            word_count,
            kind,
        }
    }
}

fn classify(has_sender: bool, body: &str) -> MessageKind {
    if !has_sender {
        MessageKind::Notice
    } else if lexicon::is_media_placeholder(body) {
        MessageKind::Media
    } else if lexicon::is_deleted_placeholder(body) {
        MessageKind::Deleted
    } else {
        MessageKind::Text
    }
}
