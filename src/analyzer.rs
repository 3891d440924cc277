//! Query facade: text in, statistics out.
//!
//! [`Analyzer`] composes parsing and aggregation and adds one check on top:
//! a sender filter must name a sender that actually wrote something, otherwise
//! the caller gets [`ChatlensError::NoSuchSender`] instead of a bundle of zeros.
//!
//! # Example
//!
//! ```rust
//! use chatlens::{Analyzer, SenderFilter};
//!
//! let analyzer = Analyzer::new();
//! let records = analyzer.parse("12/1/23, 10:15 AM - Alice: Hello world");
//!
//! let stats = analyzer.analyze(&records, &SenderFilter::Overall)?;
//! assert_eq!(stats.total_messages, 1);
//! assert_eq!(stats.total_words, 2);
//!
//! let err = analyzer.analyze(&records, &SenderFilter::sender("Bob")).unwrap_err();
//! assert!(err.is_no_such_sender());
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use crate::config::{AnalysisConfig, ChatlensConfig, ParserConfig};
use crate::core::{SenderFilter, StatsBundle};
use crate::error::{ChatlensError, Result};
use crate::record_set::RecordSet;

/// Parses transcripts and answers statistics queries over them.
///
/// Holds configuration only, so one instance can serve any number of
/// transcripts, from any number of threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analyzer {
    parser: ParserConfig,
    analysis: AnalysisConfig,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ChatlensConfig) -> Self {
        Self {
            parser: config.parser,
            analysis: config.analysis,
        }
    }

    #[must_use]
    pub fn with_parser_config(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_analysis_config(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn parser_config(&self) -> &ParserConfig {
        &self.parser
    }

    pub fn analysis_config(&self) -> &AnalysisConfig {
        &self.analysis
    }

    /// Parses a transcript. Never fails; see [`RecordSet::parse_with`].
    pub fn parse(&self, text: &str) -> RecordSet {
        RecordSet::parse_with(text, &self.parser)
    }

    /// Aggregates `records` for `scope`.
    ///
    /// # Errors
    ///
    /// - [`ChatlensError::InvalidConfig`] if the analysis caps are invalid
    /// - [`ChatlensError::NoSuchSender`] if `scope` names a sender with no
    ///   messages in `records` (exact, case-sensitive match)
    pub fn analyze(&self, records: &RecordSet, scope: &SenderFilter) -> Result<StatsBundle> {
        self.analysis.validate()?;

        if let Some(name) = scope.sender_name() {
            if !records.contains_sender(name) {
                let available = records.senders().into_iter().map(String::from).collect();
                return Err(ChatlensError::no_such_sender(name, available));
            }
        }

        Ok(records.stats(scope, &self.analysis))
    }

    /// Parses `text` and aggregates it in one call.
    pub fn analyze_text(&self, text: &str, scope: &SenderFilter) -> Result<StatsBundle> {
        self.analyze(&self.parse(text), scope)
    }
}

/// Analyzes a transcript with default settings.
///
/// ```rust
/// use chatlens::{SenderFilter, analyze};
///
/// let stats = analyze("", &SenderFilter::Overall)?;
/// assert!(stats.is_empty());
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
///
/// # Errors
///
/// Returns [`ChatlensError::NoSuchSender`] if `scope` names an absent sender.
pub fn analyze(text: &str, scope: &SenderFilter) -> Result<StatsBundle> {
    Analyzer::new().analyze_text(text, scope)
}
