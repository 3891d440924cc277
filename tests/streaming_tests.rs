//! Integration tests for the streaming parser

#![cfg(feature = "streaming")]

use std::fs;
use std::io::{BufReader, Cursor, Read};

use chatlens::config::{DateOrder, ParserConfig};
use chatlens::streaming::{MessageStream, StreamingConfig};
use chatlens::{ChatlensError, RecordSet};
use tempfile::tempdir;

fn transcript(count: usize) -> String {
    let mut lines = Vec::with_capacity(count * 2);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        lines.push(format!(
            "{}/3/23, {}:{:02} - {}: Message number {}",
            (i % 28) + 1,
            i % 24,
            i % 60,
            sender,
            i
        ));
        if i % 3 == 0 {
            lines.push(format!("continuation of {}", i));
        }
        if i % 10 == 5 {
            lines.push(format!("{}/3/23, {}:{:02} - Alice added Carol", (i % 28) + 1, i % 24, i % 60));
        }
    }
    lines.join("\n")
}

#[test]
fn test_stream_file_matches_in_memory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    let text = transcript(500);
    fs::write(&path, &text).unwrap();

    let streamed: Vec<_> = MessageStream::open(&path)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let parsed = RecordSet::parse(&text);

    assert_eq!(streamed.len(), 550);
    assert_eq!(streamed, parsed.messages());
}

#[test]
fn test_stream_progress_tracking() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    let text = transcript(200);
    fs::write(&path, &text).unwrap();

    let config = StreamingConfig::new().with_buffer_size(128);
    let mut stream = MessageStream::open_with(&path, &config).unwrap();
    assert_eq!(stream.total_bytes(), Some(text.len() as u64));

    let mut last = 0.0;
    while let Some(result) = stream.next() {
        result.unwrap();
        let pct = stream.progress().unwrap();
        assert!(pct >= last);
        assert!(pct <= 100.0);
        last = pct;
    }
    assert_eq!(stream.progress(), Some(100.0));
    assert_eq!(stream.bytes_processed(), text.len() as u64);
}

#[test]
fn test_stream_report_matches_in_memory() {
    let text = "header\n12/1/23, 10:15 - Alice: hi\n31/2/23, 10:16 - Bob: bad\n12/1/23, 10:17 - Bob: ok\n";
    let records = MessageStream::new(Cursor::new(text), ParserConfig::default())
        .into_record_set()
        .unwrap();
    let parsed = RecordSet::parse(text);

    assert_eq!(records.len(), 2);
    assert_eq!(records.parse_report(), parsed.parse_report());
}

#[test]
fn test_stream_with_month_first() {
    let text = "[1/15/24, 10:30:00 AM] Alice: Hello\n[1/15/24, 10:31:00 AM] Bob: Hi";
    let config = ParserConfig::new().with_date_order(DateOrder::MonthFirst);

    let messages: Vec<_> = MessageStream::new(Cursor::new(text), config)
        .map(Result::unwrap)
        .collect();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender(), Some("Bob"));
}

#[test]
fn test_stream_missing_file() {
    let err = MessageStream::open("/nonexistent/chat.txt").err().unwrap();
    assert!(matches!(err, ChatlensError::Io(_)));
}

/// A reader that fails after the first chunk.
struct FailingReader {
    data: Cursor<Vec<u8>>,
    served: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.served > 0 {
            return Err(std::io::Error::other("disk went away"));
        }
        let n = self.data.read(buf)?;
        self.served += n;
        Ok(n)
    }
}

#[test]
fn test_stream_surfaces_io_error_then_stops() {
    let reader = FailingReader {
        data: Cursor::new(b"12/1/23, 10:15 - Alice: hi\n12/1/23, 10:16 - Bob: there\n".to_vec()),
        served: 0,
    };
    let mut stream = MessageStream::new(BufReader::with_capacity(16, reader), ParserConfig::default());

    let results: Vec<_> = stream.by_ref().collect();
    let err = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert!(err.is_io());
    assert!(err.to_string().contains("disk went away"));
    assert!(results.last().unwrap().is_err());
    assert!(stream.next().is_none());
}

#[test]
fn test_stream_empty_input() {
    let mut stream = MessageStream::new(Cursor::new(""), ParserConfig::default());
    assert!(stream.next().is_none());
    assert_eq!(stream.report().lines, 0);
}
