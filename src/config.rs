//! Configuration types for parsing and analysis.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - how transcript lines are read
//! - [`AnalysisConfig`] - caps and word filtering used by the aggregation engine
//! - [`ChatlensConfig`] - both of the above, loadable from JSON
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, DateOrder, ParserConfig};
//!
//! let parser = ParserConfig::new().with_date_order(DateOrder::MonthFirst);
//! let analysis = AnalysisConfig::new()
//!     .with_top_words(20)
//!     .with_extra_stopwords(["lol", "ok"]);
//!
//! assert_eq!(parser.date_order, DateOrder::MonthFirst);
//! assert_eq!(analysis.top_words, 20);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ChatlensError, Result};

/// Order of the first two numeric date components.
///
/// WhatsApp writes dates in the exporting device's locale, and the text gives
/// no reliable way to tell `3/4/23` (3 April) from `3/4/23` (March 4). The
/// order is therefore a policy, not something inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `D/M/Y` (default)
    #[default]
    DayFirst,
    /// `M/D/Y`, as written by US-locale phones
    MonthFirst,
}

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
///
/// let config = ParserConfig::new().with_detect_system_bodies(false);
/// assert!(!config.detect_system_bodies);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// How to read ambiguous numeric dates (default: day first)
    pub date_order: DateOrder,

    /// Treat authored lines whose body is a known WhatsApp system phrase
    /// (encryption banner, "created group", ...) as system notices (default: true)
    pub detect_system_bodies: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::DayFirst,
            detect_system_bodies: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date component order.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Enables or disables system phrase detection on authored lines.
    #[must_use]
    pub fn with_detect_system_bodies(mut self, enabled: bool) -> Self {
        self.detect_system_bodies = enabled;
        self
    }
}

/// Configuration for the aggregation engine.
///
/// The defaults reproduce the fixed report: top 5 senders, top 10 words,
/// top 5 emojis and the 3 longest messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of senders in the ranking (default: 5)
    pub top_senders: usize,

    /// Number of words in the frequency table (default: 10)
    pub top_words: usize,

    /// Number of emojis in the frequency table (default: 5)
    pub top_emojis: usize,

    /// Number of longest messages reported (default: 3)
    pub longest_messages: usize,

    /// Words shorter than this many characters are ignored (default: 2)
    pub min_word_len: usize,

    /// Additional stop words on top of the built-in lexicon
    pub extra_stopwords: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_senders: 5,
            top_words: 10,
            top_emojis: 5,
            longest_messages: 3,
            min_word_len: 2,
            extra_stopwords: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender ranking size.
    #[must_use]
    pub fn with_top_senders(mut self, n: usize) -> Self {
        self.top_senders = n;
        self
    }

    /// Sets the word frequency table size.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the emoji frequency table size.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = n;
        self
    }

    /// Sets how many longest messages are reported.
    #[must_use]
    pub fn with_longest_messages(mut self, n: usize) -> Self {
        self.longest_messages = n;
        self
    }

    /// Sets the minimum word length counted in the frequency table.
    #[must_use]
    pub fn with_min_word_len(mut self, len: usize) -> Self {
        self.min_word_len = len;
        self
    }

    /// Adds stop words on top of the built-in lexicon.
    #[must_use]
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_stopwords
            .extend(words.into_iter().map(Into::into));
        self
    }

    /// Checks that every cap is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidConfig`] when a cap or the minimum word
    /// length is zero.
    pub fn validate(&self) -> Result<()> {
        let caps = [
            ("top_senders", self.top_senders),
            ("top_words", self.top_words),
            ("top_emojis", self.top_emojis),
            ("longest_messages", self.longest_messages),
            ("min_word_len", self.min_word_len),
        ];
        for (field, value) in caps {
            if value == 0 {
                return Err(ChatlensError::invalid_config(field, "must be at least 1"));
            }
        }
        Ok(())
    }
}

/// Parser and analysis settings in one document.
///
/// ```json
/// {
///   "parser": { "date_order": "month_first" },
///   "analysis": { "top_words": 15, "extra_stopwords": ["ok"] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatlensConfig {
    /// Parsing settings
    pub parser: ParserConfig,
    /// Aggregation settings
    pub analysis: AnalysisConfig,
}

impl ChatlensConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Json`] for malformed JSON and
    /// [`ChatlensError::InvalidConfig`] for out-of-range values.
    #[cfg(feature = "json-output")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.analysis.validate()?;
        Ok(config)
    }
}
