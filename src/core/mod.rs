//! Aggregation and export.
//!
//! This module contains:
//! - [`filter`] - [`SenderFilter`], the scope of an analysis
//! - [`frequency`] - counting with first-occurrence tie-breaks
//! - [`stats`] - [`StatsBundle`] and its entry types
//! - [`aggregate`](mod@aggregate) - the aggregation engine
//! - [`output`] - format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::RecordSet;
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::{SenderFilter, aggregate};
//!
//! let records = RecordSet::parse("12/1/23, 10:15 AM - Alice: Hello 😀");
//! let stats = aggregate(&records, &SenderFilter::Overall, &AnalysisConfig::default());
//!
//! assert_eq!(stats.top_emojis[0].emoji, '😀');
//! ```

pub mod aggregate;
pub mod filter;
pub mod frequency;
pub mod output;
pub mod stats;

pub use aggregate::aggregate;
pub use filter::SenderFilter;
pub use frequency::RankedCounter;
pub use stats::{
    EmojiCount, HourCount, LongMessage, MonthCount, SenderShare, StatsBundle, WeekdayCount,
    WordCount,
};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{stats_to_json, to_json, to_jsonl, write_json, write_jsonl, write_stats_json};
