//! Output format writers.
//!
//! This module provides writers for the record set and the statistics bundle:
//! - [`write_csv`] / [`to_csv`] - records as CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - records as a JSON array - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - records as JSON Lines - requires `json-output` feature
//! - [`write_stats_json`] / [`stats_to_json`] - the statistics bundle - requires `json-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | CSV | Spreadsheets, the "processed data" table |
//! | JSON | Structured data, APIs |
//! | JSONL | Line-oriented tools, appending |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::RecordSet;
//! use chatlens::core::output::{to_csv, write_csv, write_json};
//!
//! let records = RecordSet::parse("12/1/23, 10:15 AM - Alice: Hello world");
//!
//! write_csv(records.messages(), "chat.csv")?;
//! write_json(records.messages(), "chat.json")?;
//!
//! let csv_string = to_csv(records.messages())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{stats_to_json, to_json, write_json, write_stats_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
