//! Streaming transcript parsing.
//!
//! [`MessageStream`] reads a transcript line by line from any [`BufRead`] and
//! yields messages as soon as each one is complete, so only the message being
//! assembled is held in memory. It drives the same segmenter, line parser and
//! record builder as [`RecordSet::parse`](crate::RecordSet::parse); malformed
//! units are skipped exactly as they are there.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlens::streaming::MessageStream;
//!
//! # fn main() -> chatlens::Result<()> {
//! let mut stream = MessageStream::open("WhatsApp Chat with Family.txt")?;
//!
//! while let Some(result) = stream.next() {
//!     let msg = result?;
//!     if let Some(pct) = stream.progress() {
//!         eprint!("\r{pct:.1}%");
//!     }
//!     println!("{}: {}", msg.sender().unwrap_or("-"), msg.body);
//! }
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::Message;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::parsing::{ParseReport, Pipeline, Segmenter};
use crate::record_set::RecordSet;

/// Options for [`MessageStream::open_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingConfig {
    /// Read buffer size in bytes (default: 64KB)
    pub buffer_size: usize,
    /// Parsing settings
    pub parser: ParserConfig,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
            parser: ParserConfig::default(),
        }
    }
}

impl StreamingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    #[must_use]
    pub fn with_parser_config(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }
}

/// Lazy iterator of messages over a line source.
///
/// Yields `Err` only for I/O failures (including invalid UTF-8); the stream
/// ends after the first error.
pub struct MessageStream<R: BufRead> {
    reader: R,
    line: String,
    segmenter: Segmenter,
    pipeline: Pipeline,
    bytes_read: u64,
    total_bytes: Option<u64>,
    report: Option<ParseReport>,
    finished: bool,
}

impl MessageStream<BufReader<File>> {
    /// Opens a transcript file with default settings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &StreamingConfig::default())
    }

    /// Opens a transcript file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`](crate::ChatlensError::Io) if the file
    /// cannot be opened.
    pub fn open_with(path: impl AsRef<Path>, config: &StreamingConfig) -> Result<Self> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let reader = BufReader::with_capacity(config.buffer_size, file);
        Ok(Self::new(reader, config.parser.clone()).with_total_bytes(size))
    }
}

impl<R: BufRead> MessageStream<R> {
    pub fn new(reader: R, config: ParserConfig) -> Self {
        let pipeline = Pipeline::new(config);
        Self {
            reader,
            line: String::with_capacity(4096),
            segmenter: Segmenter::new(pipeline.matcher()),
            pipeline,
            bytes_read: 0,
            total_bytes: None,
            report: None,
            finished: false,
        }
    }

    /// Sets the expected input size, enabling [`progress`](Self::progress).
    #[must_use]
    pub fn with_total_bytes(mut self, total: u64) -> Self {
        self.total_bytes = Some(total);
        self
    }

    /// Bytes consumed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Input size, if known.
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Approximate progress as a percentage (0.0 to 100.0).
    ///
    /// Returns `None` if the input size is unknown or zero.
    pub fn progress(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => {
                Some((self.bytes_read as f64 / total as f64 * 100.0).min(100.0))
            }
            _ => None,
        }
    }

    /// Parse counters. Line counts are filled in once the stream is exhausted.
    pub fn report(&self) -> ParseReport {
        self.report.unwrap_or_else(|| self.pipeline.report())
    }

    /// Drains the stream into a [`RecordSet`].
    ///
    /// # Errors
    ///
    /// Returns the first I/O error encountered.
    pub fn into_record_set(mut self) -> Result<RecordSet> {
        let messages = self.by_ref().collect::<Result<Vec<Message>>>()?;
        Ok(RecordSet::from_messages(messages).with_report(self.report()))
    }

    fn finish(&mut self) -> Option<Message> {
        self.finished = true;
        let last = self
            .segmenter
            .finish()
            .and_then(|unit| self.pipeline.process(&unit));
        self.report = Some(
            self.pipeline
                .finish(self.segmenter.lines_seen(), self.segmenter.orphan_lines()),
        );
        last
    }
}

impl<R: BufRead> Iterator for MessageStream<R> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return self.finish().map(Ok),
                Ok(n) => {
                    self.bytes_read += n as u64;
                    let line = self.line.strip_suffix('\n').unwrap_or(&self.line);
                    if let Some(unit) = self.segmenter.push_line(line) {
                        if let Some(msg) = self.pipeline.process(&unit) {
                            return Some(Ok(msg));
                        }
                    }
                }
                Err(err) => {
                    self.finished = true;
                    tracing::warn!(bytes = self.bytes_read, error = %err, "stopping stream");
                    return Some(Err(err.into()));
                }
            }
        }
    }
}
