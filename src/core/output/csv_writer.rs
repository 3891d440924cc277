//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Message;
use crate::error::Result;

const HEADER: [&str; 7] = ["Timestamp", "Sender", "Kind", "Words", "Urls", "Emojis", "Body"];

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Sender`, `Kind`, `Words`, `Urls`, `Emojis`, `Body`
/// - `Sender` is empty for system notices
/// - Multi-line bodies are quoted, newlines preserved
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(messages, file)
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(messages: &[Message]) -> Result<String> {
    let mut buf = Vec::new();
    write_records(messages, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(messages: &[Message], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(HEADER)?;
    for msg in messages {
        writer.write_record(build_record(msg))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_record(msg: &Message) -> [String; 7] {
    [
        msg.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        msg.sender().unwrap_or_default().to_string(),
        msg.kind.as_str().to_string(),
        msg.word_count.to_string(),
        msg.url_count.to_string(),
        msg.emojis.iter().collect(),
        msg.body.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn msg(sender: Option<&str>, body: &str) -> Message {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        Message::build(ts, sender.map(String::from), body.to_string())
    }

    #[test]
    fn test_to_csv_header_and_rows() {
        let csv = to_csv(&[msg(Some("Alice"), "Hello 😀"), msg(None, "Bob left")]).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("Timestamp;Sender;Kind;Words;Urls;Emojis;Body")
        );
        assert_eq!(lines.next(), Some("2024-06-15 12:30:00;Alice;text;2;0;😀;Hello 😀"));
        assert_eq!(lines.next(), Some("2024-06-15 12:30:00;;notice;2;0;;Bob left"));
    }

    #[test]
    fn test_write_csv_quotes_multiline_bodies() {
        let temp_file = NamedTempFile::new().unwrap();
        write_csv(&[msg(Some("Alice"), "line one\nline two")], temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_empty_records_write_header_only() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "Timestamp;Sender;Kind;Words;Urls;Emojis;Body");
    }
}
