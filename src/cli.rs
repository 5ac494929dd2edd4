//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! ```rust
//! use chatstats::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatstats", "chat.txt", "--day-first", "-o", "report.csv"]);
//! assert!(args.day_first);
//! assert_eq!(args.output.as_deref(), Some("report.csv"));
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::ChatstatsError;
use crate::format::OutputFormat as LibFormat;

/// Output file name used when `--format` is given without `--output`.
pub const DEFAULT_OUTPUT_STEM: &str = "chat_stats";

/// Turn an exported WhatsApp chat transcript into per-participant statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats \"WhatsApp Chat with Bob.txt\"
    chatstats chat.txt -o report.json
    chatstats chat.txt -f csv --min-emoji 3
    chatstats chat.txt --day-first --from Alice
    chatstats chat.txt --search pizza -f jsonl -o pizza.jsonl")]
pub struct Args {
    /// Path to the exported transcript (.txt)
    pub input: String,

    /// Path to output file (format detected from extension)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// JSON file with statistics settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Minimum uses before an emoji can rank as least used
    #[arg(long, value_name = "N")]
    pub min_emoji: Option<usize>,

    /// Length of top emoji and top day rankings
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Read dates as D/M/YY instead of M/D/YY
    #[arg(long)]
    pub day_first: bool,

    /// Keep only messages whose content or sender contains this text
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Keep only messages with this date token (as written, e.g. 1/2/23)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Keep only messages from specific user
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Drop system notices before analysis
    #[arg(long)]
    pub no_system: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Output path and format, if any output file was requested.
    ///
    /// An explicit `--format` wins over the output extension; `--format`
    /// alone writes to `chat_stats.<ext>`.
    pub fn output_target(&self) -> Result<Option<(String, LibFormat)>, ChatstatsError> {
        match (&self.output, self.format) {
            (None, None) => Ok(None),
            (Some(path), Some(format)) => Ok(Some((path.clone(), format.into()))),
            (Some(path), None) => Ok(Some((path.clone(), LibFormat::from_path(path)?))),
            (None, Some(format)) => Ok(Some((
                format!("{}.{}", DEFAULT_OUTPUT_STEM, format.extension()),
                format.into(),
            ))),
        }
    }
}

/// Output format options.
///
/// - [`Json`](OutputFormat::Json) - Full report
/// - [`Jsonl`](OutputFormat::Jsonl) - One message per line
/// - [`Csv`](OutputFormat::Csv) - Participant table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON report
    #[default]
    Json,

    /// JSON Lines - one message object per line
    #[value(alias = "ndjson")]
    Jsonl,

    /// Participant table with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        LibFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", LibFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for LibFormat {
    fn from(format: OutputFormat) -> LibFormat {
        match format {
            OutputFormat::Json => LibFormat::Json,
            OutputFormat::Jsonl => LibFormat::Jsonl,
            OutputFormat::Csv => LibFormat::Csv,
        }
    }
}
