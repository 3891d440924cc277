//! Output format selection.
//!
//! Library-first format types with no CLI framework dependency.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatlens::Result<()> {
//! use chatlens::RecordSet;
//! use chatlens::format::{OutputFormat, write_records};
//!
//! let records = RecordSet::parse("12/1/23, 10:15 AM - Alice: Hello world");
//!
//! // Write using format enum
//! write_records(records.messages(), "chat.csv", OutputFormat::Csv)?;
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("chat.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::{ChatlensError, Result};

/// Export format for the record set.
///
/// ```rust
/// use chatlens::format::OutputFormat;
///
/// let format: OutputFormat = "jsonl".parse().unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines, one record per line (also known as NDJSON)
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all accepted format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Cargo feature that provides the writer.
    pub fn required_feature(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Detects the format from a file extension.
    ///
    /// ```rust
    /// use chatlens::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/chat.NDJSON").unwrap(), OutputFormat::Jsonl);
    /// assert!(OutputFormat::from_path("chat.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        ext.parse().map_err(|_| {
            ChatlensError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes records to a file in the given format.
///
/// # Errors
///
/// Returns an error if the format's feature is disabled or the file cannot be
/// written.
#[allow(unused_variables)]
pub fn write_records(
    messages: &[Message],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(messages, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(messages, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(messages, path),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Converts records to a string in the given format.
#[allow(unused_variables)]
pub fn to_format_string(messages: &[Message], format: OutputFormat) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(messages),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(messages),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(messages),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

#[allow(dead_code)]
fn feature_disabled(format: OutputFormat) -> ChatlensError {
    ChatlensError::invalid_format(
        "output",
        format!(
            "Output format {} requires the '{}' feature to be enabled",
            format,
            format.required_feature()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("ndjson".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("csv, json, jsonl, ndjson"));
    }

    #[test]
    fn test_format_display_and_extension() {
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
        assert_eq!(OutputFormat::all().len(), 3);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("a.csv").unwrap(), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_path("/tmp/dir.v2/b.JSON").unwrap(),
            OutputFormat::Json
        );
        let err = OutputFormat::from_path("noext").unwrap_err();
        assert!(err.to_string().contains("Unknown file extension"));
    }

    #[test]
    fn test_format_serde() {
        assert_eq!(serde_json::to_string(&OutputFormat::Jsonl).unwrap(), "\"jsonl\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_to_format_string_dispatch() {
        let records = crate::RecordSet::parse("12/1/23, 10:15 AM - Alice: Hello");
        let csv = to_format_string(records.messages(), OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("Timestamp;Sender"));
        let jsonl = to_format_string(records.messages(), OutputFormat::Jsonl).unwrap();
        assert_eq!(jsonl.lines().count(), 1);
    }
}
