//! The immutable, parsed transcript.
//!
//! A [`RecordSet`] is created once per transcript and never changes. Cloning
//! it is cheap (the messages live behind an [`Arc`]), so it can be shared
//! across threads as a read-only snapshot. Narrowing it to one sender yields a
//! borrowed [`RecordView`]; the set itself is untouched.
//!
//! # Example
//!
//! ```
//! use chatlens::RecordSet;
//! use chatlens::core::SenderFilter;
//!
//! let records = RecordSet::parse(
//!     "12/1/23, 10:15 AM - Alice: Hello world\n\
//!      12/1/23, 10:16 AM - Bob: Hi\n\
//!      12/1/23, 10:17 AM - Alice added Carol",
//! );
//!
//! assert_eq!(records.len(), 3);
//! assert_eq!(records.senders(), vec!["Alice", "Bob"]);
//! assert_eq!(records.notice_count(), 1);
//!
//! let alice = records.filter(&SenderFilter::sender("Alice"));
//! assert_eq!(alice.len(), 1);
//! ```

use std::collections::BTreeSet;
use std::ops::Index;
use std::sync::Arc;

use crate::Message;
use crate::config::{AnalysisConfig, ParserConfig};
use crate::core::{SenderFilter, StatsBundle, aggregate};
use crate::parsing::{ParseReport, parse_messages};

/// Ordered, immutable sequence of messages for one transcript.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    messages: Arc<[Message]>,
    report: ParseReport,
}

impl RecordSet {
    /// Parses `text` with the default configuration.
    ///
    /// Never fails: malformed units are dropped and empty text gives an
    /// empty set.
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, &ParserConfig::default())
    }

    /// Parses `text` with a specific configuration.
    pub fn parse_with(text: &str, config: &ParserConfig) -> Self {
        let (messages, report) = parse_messages(text, config);
        Self {
            messages: messages.into(),
            report,
        }
    }

    /// Wraps already built messages, e.g. those collected from a stream.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let report = ParseReport {
            units: messages.len(),
            messages: messages.len(),
            ..ParseReport::default()
        };
        Self {
            messages: messages.into(),
            report,
        }
    }

    /// Attaches the counters of the parse that produced these messages.
    #[must_use]
    pub fn with_report(mut self, report: ParseReport) -> Self {
        self.report = report;
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Distinct senders, sorted. Notices contribute none.
    pub fn senders(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(Message::sender)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns `true` if `sender` wrote at least one message (exact match).
    pub fn contains_sender(&self, sender: &str) -> bool {
        self.messages.iter().any(|m| m.sender() == Some(sender))
    }

    /// Number of system notices.
    pub fn notice_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_notice()).count()
    }

    /// Counters from parsing: units seen, messages built, units dropped.
    pub fn parse_report(&self) -> ParseReport {
        self.report
    }

    /// The records in `scope`, in input order.
    pub fn filter(&self, scope: &SenderFilter) -> RecordView<'_> {
        RecordView {
            scope: scope.clone(),
            messages: self.messages.iter().filter(|m| scope.matches(m)).collect(),
        }
    }

    /// Aggregates `scope` without checking that the sender exists.
    ///
    /// An unknown sender yields the zero bundle; use
    /// [`Analyzer`](crate::Analyzer) to get a `NoSuchSender` error instead.
    pub fn stats(&self, scope: &SenderFilter, config: &AnalysisConfig) -> StatsBundle {
        aggregate(self.iter(), scope, config)
    }
}

impl From<Vec<Message>> for RecordSet {
    fn from(messages: Vec<Message>) -> Self {
        Self::from_messages(messages)
    }
}

impl FromIterator<Message> for RecordSet {
    fn from_iter<T: IntoIterator<Item = Message>>(iter: T) -> Self {
        Self::from_messages(iter.into_iter().collect())
    }
}

impl Index<usize> for RecordSet {
    type Output = Message;

    fn index(&self, index: usize) -> &Message {
        &self.messages[index]
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// A sender-filtered view over a [`RecordSet`].
#[derive(Debug, Clone)]
pub struct RecordView<'a> {
    scope: SenderFilter,
    messages: Vec<&'a Message>,
}

impl<'a> RecordView<'a> {
    pub fn scope(&self) -> &SenderFilter {
        &self.scope
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Message> + '_ {
        self.messages.iter().copied()
    }

    /// Aggregates the records of this view.
    pub fn stats(&self, config: &AnalysisConfig) -> StatsBundle {
        aggregate(self.iter(), &self.scope, config)
    }
}
