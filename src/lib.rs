//! # Chatstats
//!
//! A Rust library for turning exported WhatsApp chat transcripts into
//! structured messages and per-participant statistics.
//!
//! ## Overview
//!
//! The work happens in two stages:
//!
//! 1. **Reconstruction** ([`parser`]) splits the raw transcript into
//!    [`Message`] records, folding wrapped lines back into the message they
//!    belong to and flagging system notices.
//! 2. **Analysis** ([`analysis`]) runs one accumulation pass over the
//!    messages and assembles a [`DeepStats`](analysis::DeepStats) report:
//!    per-sender counters, emoji and word rankings, message and day streaks,
//!    time-of-day bars and a messages-per-day series.
//!
//! Both stages are pure and deterministic: the same transcript always yields
//! the same report, ranking ties included.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstats::prelude::*;
//!
//! let transcript = "1/1/23, 9:00 - Alice: pizza tonight? 🍕\n\
//!                   1/2/23, 9:05 - Bob: yes!\n\
//!                   1/3/23, 21:30 - Alice: <Media omitted>";
//!
//! let messages = parse_transcript(transcript);
//! let stats = calculate_deep_stats(&messages).expect("transcript has messages");
//!
//! assert_eq!(stats.max_days_streak, 3);
//! assert_eq!(stats.participants["Alice"].msg_count, 2);
//! assert_eq!(stats.participants["Alice"].media, 1);
//! ```
//!
//! ## Reading Files
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let messages = TranscriptParser::new().parse("WhatsApp Chat with Bob.txt".as_ref())?;
//!     let config = StatsConfig::new().with_date_order(DateOrder::DayFirst);
//!
//!     if let Some(stats) = calculate_deep_stats_with(&messages, &config) {
//!         write_json(&stats, "report.json")?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - transcript reconstruction ([`TranscriptParser`](parser::TranscriptParser))
//! - [`parsing`] - the line grammar and date interpretation
//! - [`message`] - the [`Message`] record
//! - [`analysis`] - accumulation, streaks, rankings, the report
//! - [`config`] - [`StatsConfig`](config::StatsConfig), [`ParserConfig`](config::ParserConfig)
//! - [`filter`] - [`FilterConfig`](filter::FilterConfig), [`apply_filters`](filter::apply_filters)
//! - [`output`] / [`format`] - JSON, JSONL and CSV writers
//! - [`error`] - [`ChatstatsError`], [`Result`]
//! - [`prelude`] - Convenient re-exports
//!
//! ## Logging
//!
//! The library emits [`tracing`](https://docs.rs/tracing) events at `debug`
//! and `trace` level and never installs a subscriber.

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod message;
pub mod output;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Reconstruction
    pub use crate::parser::{Transcript, TranscriptParser, parse_transcript};

    // Configuration
    pub use crate::config::{DateOrder, ParserConfig, StatsConfig};

    // Statistics
    pub use crate::analysis::{
        Accumulator, DeepStats, EmojiMatcher, ParticipantStat, YapLevel, analyze,
        calculate_basic_stats, calculate_deep_stats, calculate_deep_stats_with,
    };

    // Filtering
    pub use crate::filter::{FilterConfig, apply_filters};

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::OutputFormat;
}
