//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_json`] / [`to_json`] - the full report as pretty JSON - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - reconstructed messages, one JSON object per line - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - participant table with semicolon delimiter - requires `csv-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Contents | Use Case |
//! |--------|----------|----------|
//! | JSON | [`DeepStats`](crate::analysis::DeepStats) | Dashboards, APIs |
//! | JSONL | [`Message`](crate::Message) records | Search indexes, pipelines |
//! | CSV | One row per participant | Spreadsheets |
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::analysis::calculate_deep_stats;
//! use chatstats::output::{to_csv, to_json, to_jsonl};
//! use chatstats::parser::parse_transcript;
//!
//! let messages = parse_transcript("1/2/23, 9:00 - Alice: hi\n1/2/23, 9:01 - Bob: hello");
//! let stats = calculate_deep_stats(&messages).unwrap();
//!
//! let report = to_json(&stats)?;
//! let lines = to_jsonl(&messages)?;
//! let table = to_csv(&stats)?;
//!
//! assert!(report.contains("\"participants\""));
//! assert_eq!(lines.lines().count(), 2);
//! assert!(table.starts_with("Participant;"));
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
pub use csv_writer::{CSV_HEADER, to_csv, write_csv, write_participants};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
