//! Transcript reconstruction.
//!
//! Turns a raw exported transcript into an ordered sequence of [`Message`]
//! records. WhatsApp does not re-prefix wrapped or multi-line messages with a
//! timestamp, so any line that doesn't start with a record header belongs to
//! the message above it.
//!
//! # Example
//!
//! ```rust
//! use chatstats::parser::parse_transcript;
//!
//! let text = "1/2/23, 9:00 - Alice: first line\nsecond line\n1/2/23, 9:01 - Bob: hi";
//! let messages = parse_transcript(text);
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].content, "first line\nsecond line");
//! assert_eq!(messages[1].sender, "Bob");
//! ```

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::Message;
use crate::config::ParserConfig;
use crate::error::ChatstatsError;
use crate::parsing::{match_header, split_sender};

/// Line accounting for one reconstruction run.
///
/// For every transcript:
/// `records + continuation_lines + dropped_lines + skipped_system_lines`
/// equals the number of non-blank lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconstructionStats {
    /// Total lines seen, blank ones included.
    pub total_lines: usize,
    /// Blank or whitespace-only lines.
    pub blank_lines: usize,
    /// Lines that started a new message.
    pub records: usize,
    /// Lines merged into the previous message.
    pub continuation_lines: usize,
    /// Non-header lines with no message to attach to.
    pub dropped_lines: usize,
    /// System header lines (and their continuations) left out by configuration.
    pub skipped_system_lines: usize,
}

/// Messages together with the line accounting that produced them.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// Reconstructed messages in transcript order.
    pub messages: Vec<Message>,
    /// Line accounting.
    pub stats: ReconstructionStats,
}

/// Parser for exported WhatsApp transcripts.
///
/// # Example
///
/// ```rust,no_run
/// use chatstats::parser::TranscriptParser;
///
/// let parser = TranscriptParser::new();
/// let messages = parser.parse("WhatsApp Chat with Bob.txt".as_ref())?;
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ParserConfig,
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads a transcript file and reconstructs its messages.
    ///
    /// A leading byte-order mark is ignored.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>, ChatstatsError> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes)?;
        Ok(self.parse_str(&text))
    }

    /// Reconstructs messages from transcript text.
    pub fn parse_str(&self, content: &str) -> Vec<Message> {
        self.reconstruct(content).messages
    }

    /// Reconstructs messages and reports how every line was used.
    pub fn reconstruct(&self, content: &str) -> Transcript {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut messages: Vec<Message> = Vec::new();
        let mut stats = ReconstructionStats::default();
        // False while continuation lines belong to a skipped system notice
        let mut attach = true;

        for line in content.lines() {
            stats.total_lines += 1;
            if line.trim().is_empty() {
                stats.blank_lines += 1;
                continue;
            }

            if let Some(header) = match_header(line) {
                let msg = match split_sender(header.rest) {
                    Some((sender, text)) => Message::new(header.date, header.time, sender, text),
                    None => Message::system(header.date, header.time, header.rest),
                };

                if msg.is_system && self.config.skip_system_messages {
                    stats.skipped_system_lines += 1;
                    attach = false;
                    continue;
                }

                stats.records += 1;
                attach = true;
                messages.push(msg);
            } else if !attach {
                stats.skipped_system_lines += 1;
            } else if let Some(last) = messages.last_mut() {
                last.content.push('\n');
                last.content.push_str(line);
                stats.continuation_lines += 1;
            } else {
                stats.dropped_lines += 1;
            }
        }

        debug!(
            lines = stats.total_lines,
            records = stats.records,
            continuations = stats.continuation_lines,
            dropped = stats.dropped_lines,
            "reconstructed transcript"
        );

        Transcript { messages, stats }
    }
}

/// Reconstructs messages from transcript text with default settings.
pub fn parse_transcript(content: &str) -> Vec<Message> {
    TranscriptParser::new().parse_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authored_and_system_lines() {
        let text = "1/2/23, 8:59 - Messages and calls are end-to-end encrypted.\n\
                    1/2/23, 9:00 - Alice: hi";
        let messages = parse_transcript(text);

        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_system);
        assert_eq!(messages[0].sender, "System");
        assert_eq!(
            messages[0].content,
            "Messages and calls are end-to-end encrypted."
        );
        assert!(!messages[1].is_system);
        assert_eq!(messages[1].sender, "Alice");
        assert_eq!(messages[1].content, "hi");
    }

    #[test]
    fn test_continuation_keeps_leading_whitespace() {
        let text = "1/2/23, 9:00 - Alice: list:\n  - eggs\n\t- milk";
        let messages = parse_transcript(text);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "list:\n  - eggs\n\t- milk");
    }

    #[test]
    fn test_leading_orphan_lines_dropped() {
        let text = "orphan one\norphan two\n1/2/23, 9:00 - Alice: hi";
        let transcript = TranscriptParser::new().reconstruct(text);

        assert_eq!(transcript.messages.len(), 1);
        assert_eq!(transcript.messages[0].content, "hi");
        assert_eq!(transcript.stats.dropped_lines, 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = "1/2/23, 9:00 - Alice: hi\n\n   \n1/2/23, 9:01 - Bob: hey\n";
        let transcript = TranscriptParser::new().reconstruct(text);

        assert_eq!(transcript.messages.len(), 2);
        assert_eq!(transcript.messages[0].content, "hi");
        assert_eq!(transcript.stats.blank_lines, 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "1/2/23, 9:00 - Alice: hi\r\nmore\r\n1/2/23, 9:01 - Bob: hey\r\n";
        let messages = parse_transcript(text);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "hi\nmore");
        assert_eq!(messages[1].content, "hey");
    }

    #[test]
    fn test_continuation_after_system_line() {
        let text = "1/2/23, 9:00 - Alice created group \"Trip\"\nsecond line";
        let messages = parse_transcript(text);

        assert_eq!(messages.len(), 1);
        assert!(messages[0].is_system);
        assert_eq!(messages[0].content, "Alice created group \"Trip\"\nsecond line");
    }

    #[test]
    fn test_skip_system_messages() {
        let text = "1/2/23, 9:00 - Alice: hi\n\
                    1/2/23, 9:01 - Bob joined using this group's invite link\n\
                    stray line\n\
                    1/2/23, 9:02 - Bob: hey";
        let parser =
            TranscriptParser::with_config(ParserConfig::new().with_skip_system_messages(true));
        let transcript = parser.reconstruct(text);

        assert_eq!(transcript.messages.len(), 2);
        assert_eq!(transcript.messages[0].content, "hi");
        assert_eq!(transcript.stats.skipped_system_lines, 2);
    }

    #[test]
    fn test_line_accounting_adds_up() {
        let text = "junk\n\n1/2/23, 9:00 - Alice: a\nb\nc\n1/2/23, 9:01 - note\n1/2/23, 9:02 - Bob: d";
        let stats = TranscriptParser::new().reconstruct(text).stats;

        let non_blank = stats.total_lines - stats.blank_lines;
        assert_eq!(
            stats.records + stats.continuation_lines + stats.dropped_lines,
            non_blank
        );
        assert_eq!(stats.records, 3);
        assert_eq!(stats.continuation_lines, 2);
        assert_eq!(stats.dropped_lines, 1);
    }

    #[test]
    fn test_byte_order_mark_ignored() {
        let messages = parse_transcript("\u{feff}1/2/23, 9:00 - Alice: hi");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].date, "1/2/23");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_transcript("").is_empty());
        assert!(parse_transcript("\n\n  \n").is_empty());
    }

    #[test]
    fn test_parse_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1/2/23, 9:00 - Alice: hi\n1/2/23, 9:01 - Bob: hey").unwrap();

        let messages = TranscriptParser::new().parse(file.path()).unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_parse_missing_file() {
        let err = TranscriptParser::new()
            .parse(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }
}
