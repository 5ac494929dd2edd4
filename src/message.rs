//! Message record produced by transcript reconstruction.
//!
//! A [`Message`] keeps the date and time tokens exactly as they appeared in
//! the transcript. The order of messages in the reconstructed sequence is the
//! only reliable chronology: the date strings are locale-ambiguous and are
//! only interpreted as calendar dates where a [`DateOrder`] is supplied.
//!
//! # Examples
//!
//! ```
//! use chatstats::Message;
//!
//! let msg = Message::new("1/2/23", "9:00", "Alice", "hi");
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.hour(), Some(9));
//! assert!(!msg.is_system());
//!
//! let notice = Message::system("1/2/23", "9:00", "Alice created group \"Trip\"");
//! assert_eq!(notice.sender(), "System");
//! assert!(notice.is_system());
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::parsing::{DateOrder, parse_date, parse_hour};

/// Sender name given to lines without a `sender: ` prefix.
pub const SYSTEM_SENDER: &str = "System";

/// Placeholder WhatsApp writes in place of attachments.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// Marker WhatsApp appends to edited messages.
pub const EDITED_MARKER: &str = "<This message was edited>";

/// A single logical message from a chat transcript.
///
/// | Field | Description |
/// |-------|-------------|
/// | `date` | Literal date token (`M/D/YY` or `D/M/YY`), not normalized |
/// | `time` | Literal `H:MM` 24-hour time token |
/// | `sender` | Author name, or `"System"` for notices |
/// | `content` | Text, with `\n` between merged continuation lines |
/// | `is_system` | `true` when the line had no `sender: ` prefix |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Date token as written in the transcript.
    pub date: String,

    /// Time token as written in the transcript.
    pub time: String,

    /// Display name of the author.
    pub sender: String,

    /// Message body.
    ///
    /// May contain newlines for messages that spanned several transcript lines.
    pub content: String,

    /// Whether this is a system notice rather than an authored message.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_system: bool,
}

impl Message {
    /// Creates an authored message.
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            sender: sender.into(),
            content: content.into(),
            is_system: false,
        }
    }

    /// Creates a system notice (sender `"System"`).
    pub fn system(
        date: impl Into<String>,
        time: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            sender: SYSTEM_SENDER.to_string(),
            content: content.into(),
            is_system: true,
        }
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the date token.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the time token.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` for system notices.
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    // =========================================================================
    // Derived properties
    // =========================================================================

    /// Returns the hour part of the time token exactly as written (`"9"`, `"09"`).
    pub fn hour_str(&self) -> &str {
        self.time.split(':').next().unwrap_or_default()
    }

    /// Returns the hour of day, or `None` when the token is not a valid hour.
    pub fn hour(&self) -> Option<u32> {
        parse_hour(&self.time)
    }

    /// Interprets the date token as a calendar date.
    pub fn calendar_date(&self, order: DateOrder) -> Option<NaiveDate> {
        parse_date(&self.date, order)
    }

    /// Returns `true` if the content carries the media-omitted placeholder.
    pub fn is_media(&self) -> bool {
        self.content.contains(MEDIA_OMITTED)
    }

    /// Returns `true` if the content carries the edited marker.
    pub fn is_edited(&self) -> bool {
        self.content.contains(EDITED_MARKER)
    }

    /// Returns the number of transcript lines this message spans.
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}
