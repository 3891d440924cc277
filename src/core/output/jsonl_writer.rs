//! JSON Lines (JSONL) output writer.
//!
//! One record per line, which suits line-oriented tools and appending
//! several transcripts to one file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Message;
use crate::error::Result;

/// Writes records to JSONL (JSON Lines) format.
///
/// # Format
/// ```text
/// {"timestamp":"2023-01-12T10:15:00","sender":"Alice","body":"Hello","word_count":1,"url_count":0,"emojis":[],"kind":"text"}
/// {"timestamp":"2023-01-12T10:16:00","body":"Alice added Bob","word_count":3,"url_count":0,"emojis":[],"kind":"notice"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(messages, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string, one JSON object per line.
pub fn to_jsonl(messages: &[Message]) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(messages, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(messages: &[Message], out: &mut W) -> Result<()> {
    for msg in messages {
        serde_json::to_writer(&mut *out, msg)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
