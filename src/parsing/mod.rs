//! The parsing pipeline: raw text to [`Message`]s.
//!
//! ```text
//! raw lines -> Segmenter -> LogicalUnit -> LineParser -> ParsedLine -> RecordBuilder -> Message
//! ```
//!
//! - [`timestamp`] - prefix pattern and date/time normalisation
//! - [`segment`] - grouping raw lines into logical units
//! - [`line`] - splitting a unit into timestamp, sender and body
//! - [`builder`] - deriving per-record features
//!
//! Line-level failures never stop the pipeline. A unit with an unreadable
//! timestamp is dropped and counted in the [`ParseReport`].

pub mod builder;
pub mod line;
pub mod segment;
pub mod timestamp;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use builder::RecordBuilder;
pub use line::{LineParser, ParsedLine};
pub use segment::{LogicalUnit, Segmenter, Segments};
pub use timestamp::{PrefixMatcher, PrefixParts, normalize};

use crate::Message;
use crate::config::ParserConfig;

/// What happened while parsing a transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Raw lines read
    pub lines: usize,
    /// Logical units found by the segmenter
    pub units: usize,
    /// Units turned into messages
    pub messages: usize,
    /// Units dropped because of a malformed timestamp
    pub dropped: usize,
    /// Lines before the first message, discarded
    pub orphan_lines: usize,
}

/// Line parser and record builder bound together, shared by the in-memory
/// and streaming paths.
#[derive(Debug, Clone)]
pub struct Pipeline {
    parser: LineParser,
    builder: RecordBuilder<'static>,
    report: ParseReport,
    last_timestamp: Option<NaiveDateTime>,
}

impl Pipeline {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            parser: LineParser::new(config),
            builder: RecordBuilder::new(),
            report: ParseReport::default(),
            last_timestamp: None,
        }
    }

    /// The compiled prefix pattern, for feeding a segmenter.
    pub fn matcher(&self) -> PrefixMatcher {
        self.parser.matcher().clone()
    }

    /// Parses one unit. Returns `None` if the unit was dropped.
    pub fn process(&mut self, unit: &LogicalUnit) -> Option<Message> {
        self.report.units += 1;

        let parsed = match self.parser.parse_unit(unit) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.report.dropped += 1;
                tracing::debug!(line = err.line(), error = %err, "dropping unit");
                return None;
            }
        };

        if self
            .last_timestamp
            .is_some_and(|last| parsed.timestamp < last)
        {
            tracing::debug!(
                line = unit.line_number(),
                timestamp = %parsed.timestamp,
                "timestamp earlier than previous message"
            );
        }
        self.last_timestamp = Some(parsed.timestamp);

        self.report.messages += 1;
        Some(self.builder.build(parsed))
    }

    /// Records line counters from the segmenter that fed this pipeline.
    pub fn finish(&mut self, lines: usize, orphan_lines: usize) -> ParseReport {
        self.report.lines = lines;
        self.report.orphan_lines = orphan_lines;
        tracing::info!(
            lines = self.report.lines,
            messages = self.report.messages,
            dropped = self.report.dropped,
            "parsed transcript"
        );
        self.report
    }

    /// Counters accumulated so far.
    pub fn report(&self) -> ParseReport {
        self.report
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

/// Parses a whole transcript held in memory.
///
/// Messages come back in input order; timestamps are not reordered.
///
/// ```
/// use chatlens::config::ParserConfig;
/// use chatlens::parsing::parse_messages;
///
/// let text = "12/1/23, 10:15 AM - Alice: Hello world\n12/1/23, 10:16 AM - Alice added Bob";
/// let (messages, report) = parse_messages(text, &ParserConfig::default());
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].word_count, 2);
/// assert!(messages[1].is_notice());
/// assert_eq!(report.dropped, 0);
/// ```
pub fn parse_messages(text: &str, config: &ParserConfig) -> (Vec<Message>, ParseReport) {
    let mut pipeline = Pipeline::new(config.clone());
    let mut segments = Segments::new(text.lines(), pipeline.matcher());

    let messages: Vec<Message> = segments
        .by_ref()
        .filter_map(|unit| pipeline.process(&unit))
        .collect();

    let report = pipeline.finish(segments.lines_seen(), segments.orphan_lines());
    (messages, report)
}
