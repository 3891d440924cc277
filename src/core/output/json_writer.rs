//! JSON output writer for records and statistics.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Message;
use crate::core::stats::StatsBundle;
use crate::error::Result;

/// Writes records to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {
///     "timestamp": "2023-01-12T10:15:00",
///     "sender": "Alice",
///     "body": "Hello world",
///     "word_count": 2,
///     "url_count": 0,
///     "emojis": [],
///     "kind": "text"
///   }
/// ]
/// ```
///
/// `sender` is omitted for system notices.
pub fn write_json(messages: &[Message], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(messages)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a pretty-printed JSON array.
pub fn to_json(messages: &[Message]) -> Result<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}

/// Writes a statistics bundle to a JSON file.
pub fn write_stats_json(stats: &StatsBundle, output_path: impl AsRef<Path>) -> Result<()> {
    let json = stats_to_json(stats)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts a statistics bundle to pretty-printed JSON.
///
/// ```
/// use chatlens::{RecordSet, config::AnalysisConfig, core::SenderFilter};
/// use chatlens::core::output::stats_to_json;
///
/// let records = RecordSet::parse("12/1/23, 10:15 AM - Alice: Hello world");
/// let stats = records.stats(&SenderFilter::Overall, &AnalysisConfig::default());
/// let json = stats_to_json(&stats).unwrap();
///
/// assert!(json.contains(r#""scope": "Overall""#));
/// assert!(json.contains(r#""total_messages": 1"#));
/// ```
pub fn stats_to_json(stats: &StatsBundle) -> Result<String> {
    Ok(serde_json::to_string_pretty(stats)?)
}
