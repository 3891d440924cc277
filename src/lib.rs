//! # Chatlens
//!
//! A Rust library for turning exported WhatsApp chat transcripts into
//! structured message records and activity statistics.
//!
//! ## Overview
//!
//! A transcript goes through a fixed pipeline:
//!
//! ```text
//! text -> segmenter -> line parser -> record builder -> RecordSet -> aggregation -> StatsBundle
//! ```
//!
//! - Multi-line messages are reassembled from continuation lines.
//! - Lines with unreadable timestamps are dropped, never fatal.
//! - Lines without a sender become system notices.
//! - Each message carries derived features: word count, URL count, emojis.
//! - Statistics cover totals, hour/weekday/month timelines, top senders,
//!   top words (stop words removed), top emojis and the longest messages.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = "\
//! 12/1/23, 10:15 AM - Alice: Hello world
//! 12/1/23, 10:16 AM - Bob: Hi Alice, check https://example.com
//! and this second line";
//!
//!     let analyzer = Analyzer::new();
//!     let records = analyzer.parse(text);
//!     assert_eq!(records.len(), 2);
//!
//!     let stats = analyzer.analyze(&records, &SenderFilter::Overall)?;
//!     assert_eq!(stats.total_urls, 1);
//!     assert_eq!(stats.top_senders[0].sender, "Alice");
//!
//!     // Asking for someone who never wrote is an error, not an empty result
//!     assert!(analyzer.analyze(&records, &SenderFilter::sender("Carol")).is_err());
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming for Large Files
//!
//! ```rust,no_run
//! # #[cfg(feature = "streaming")]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::streaming::MessageStream;
//!
//! for result in MessageStream::open("huge_chat.txt")? {
//!     let msg = result?;
//!     println!("{} {}", msg.timestamp, msg.body);
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "streaming"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`analyzer`] - [`Analyzer`] query facade and [`analyze()`]
//! - [`parsing`] - segmenter, line parser, record builder
//! - [`record_set`] - [`RecordSet`] and [`RecordView`]
//! - [`core`] - sender filter, aggregation, [`StatsBundle`], output writers
//! - [`lexicon`] - stop words, emoji table, URL pattern, placeholders
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`AnalysisConfig`](config::AnalysisConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and format dispatch
//! - [`streaming`] - line-by-line parsing with progress (feature `streaming`)
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - convenient re-exports

pub mod analyzer;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod lexicon;
pub mod message;
pub mod parsing;
pub mod record_set;
#[cfg(feature = "streaming")]
pub mod streaming;

// Re-export the main types at the crate root for convenience
pub use analyzer::{Analyzer, analyze};
pub use crate::core::{SenderFilter, StatsBundle};
pub use error::{ChatlensError, Result};
pub use message::{Message, MessageKind};
pub use record_set::{RecordSet, RecordView};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Message, MessageKind};

    pub use crate::error::{ChatlensError, Result};

    pub use crate::analyzer::{Analyzer, analyze};
    pub use crate::record_set::{RecordSet, RecordView};

    pub use crate::config::{AnalysisConfig, ChatlensConfig, DateOrder, ParserConfig};

    pub use crate::core::{SenderFilter, StatsBundle, aggregate};

    pub use crate::format::{OutputFormat, write_records};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{
        stats_to_json, to_json, to_jsonl, write_json, write_jsonl, write_stats_json,
    };

    #[cfg(feature = "streaming")]
    pub use crate::streaming::{MessageStream, StreamingConfig};
}
