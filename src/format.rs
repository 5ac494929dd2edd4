//! Output format selection.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks. Each format writes a different view of one run:
//!
//! | Format | Writes |
//! |--------|--------|
//! | [`Json`](OutputFormat::Json) | the full report |
//! | [`Jsonl`](OutputFormat::Jsonl) | the reconstructed messages |
//! | [`Csv`](OutputFormat::Csv) | the participant table |
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::analysis::calculate_deep_stats;
//! use chatstats::format::{OutputFormat, to_format_string};
//! use chatstats::parser::parse_transcript;
//!
//! let messages = parse_transcript("1/2/23, 9:00 - Alice: hi");
//! let stats = calculate_deep_stats(&messages).unwrap();
//!
//! let format = OutputFormat::from_path("report.csv")?;
//! let table = to_format_string(&messages, &stats, format)?;
//! assert!(table.contains("Alice;1;1"));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::analysis::DeepStats;
use crate::error::ChatstatsError;

/// Output format for a statistics run.
///
/// ```rust
/// use chatstats::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Pretty-printed JSON report (default)
    #[default]
    Json,

    /// JSON Lines - one message object per line
    Jsonl,

    /// Participant table, semicolon-delimited
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Jsonl, OutputFormat::Csv]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
            OutputFormat::Csv => "text/csv",
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstats::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("messages.ndjson").unwrap(), OutputFormat::Jsonl);
    /// assert!(OutputFormat::from_path("report.txt").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self, ChatstatsError> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ChatstatsError::invalid_format(
                "output",
                format!("Unknown file extension: '.{}'. Expected one of: json, jsonl, csv", ext),
            )),
        }
    }

    /// Name of the cargo feature a writer for this format needs.
    pub fn required_feature(&self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
            OutputFormat::Csv => "csv-output",
        }
    }

    fn unavailable(self) -> ChatstatsError {
        ChatstatsError::invalid_format(
            "output",
            format!(
                "Output format {:?} requires the '{}' feature to be enabled",
                self,
                self.required_feature()
            ),
        )
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes the selected view of a run to a file.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    messages: &[Message],
    stats: &DeepStats,
    path: &str,
    format: OutputFormat,
) -> Result<(), ChatstatsError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::output::write_json(stats, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::output::write_jsonl(messages, path),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::write_csv(stats, path),
        #[allow(unreachable_patterns)]
        _ => Err(format.unavailable()),
    }
}

/// Renders the selected view of a run to a string.
#[allow(unused_variables)]
pub fn to_format_string(
    messages: &[Message],
    stats: &DeepStats,
    format: OutputFormat,
) -> Result<String, ChatstatsError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::output::to_json(stats),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::output::to_jsonl(messages),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::to_csv(stats),
        #[allow(unreachable_patterns)]
        _ => Err(format.unavailable()),
    }
}
