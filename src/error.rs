//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum for every failure a
//! caller can observe, plus the line-level [`ParseError`] that the parsing
//! pipeline recovers from internally.
//!
//! # Error Handling Philosophy
//!
//! - **Line-level problems never abort a run.** A unit whose timestamp cannot
//!   be read is dropped, logged at `debug` level, and parsing continues.
//! - **Only user mistakes are surfaced.** [`ChatlensError::NoSuchSender`] tells
//!   the caller the requested sender does not exist, which is distinguishable
//!   from "this sender exists but wrote nothing that matters".
//! - **Empty input is not an error.** It yields an empty record set and a
//!   statistics bundle full of zeros.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::RecordSet;
///
/// fn load(text: &str) -> Result<RecordSet> {
///     Ok(RecordSet::parse(text))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all caller-visible chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input transcript doesn't exist
    /// - Permission denied
    /// - Disk is full (when exporting)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The requested sender never wrote a message in this transcript.
    ///
    /// Raised by the query facade instead of returning empty statistics, so a
    /// UI can tell a typo apart from a quiet participant.
    #[error("No sender named '{sender}' in this chat{}", format_available(available))]
    NoSuchSender {
        /// The sender that was asked for
        sender: String,
        /// Senders that do exist, sorted
        available: Vec<String>,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// The offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Unknown or disabled output format.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// Which format was being resolved (e.g. "output")
        format: &'static str,
        /// What went wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when the transcript or generated output is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        String::new()
    } else {
        format!(" (known senders: {})", available.join(", "))
    }
}

/// Line-level parse failures.
///
/// These are recovered inside the pipeline: the offending logical unit is
/// dropped and parsing continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The unit does not start with a readable timestamp, or the timestamp
    /// names an impossible date or time.
    #[error("Malformed timestamp on line {line}: '{input}'")]
    MalformedTimestamp {
        /// 1-based line number of the unit's first raw line
        line: usize,
        /// The offending timestamp text (or line head when no prefix was found)
        input: String,
    },
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a "no such sender" error.
    pub fn no_such_sender(sender: impl Into<String>, available: Vec<String>) -> Self {
        ChatlensError::NoSuchSender {
            sender: sender.into(),
            available,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Creates a UTF-8 error for input or output named by `context`.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if the requested sender does not exist.
    pub fn is_no_such_sender(&self) -> bool {
        matches!(self, ChatlensError::NoSuchSender { .. })
    }

    /// Returns `true` if this is a UTF-8 decoding error.
    pub fn is_utf8(&self) -> bool {
        matches!(self, ChatlensError::Utf8 { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatlensError::InvalidConfig { .. })
    }
}

impl ParseError {
    pub(crate) fn malformed(line: usize, input: impl Into<String>) -> Self {
        ParseError::MalformedTimestamp {
            line,
            input: input.into(),
        }
    }

    /// Returns the 1-based line number the failure refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedTimestamp { line, .. } => *line,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
