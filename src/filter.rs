//! Filter messages by keyword, date and sender.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Search | [`with_search`](FilterConfig::with_search) | Keyword in content or sender name |
//! | Date | [`with_date`](FilterConfig::with_date) | Messages with this exact date token |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from specific user |
//! | System | [`exclude_system`](FilterConfig::exclude_system) | Drop system notices |
//!
//! # Examples
//!
//! ```
//! use chatstats::filter::{FilterConfig, apply_filters};
//! use chatstats::Message;
//!
//! # fn main() -> chatstats::Result<()> {
//! let messages = vec![
//!     Message::new("1/2/23", "9:00", "Alice", "Pizza tonight?"),
//!     Message::new("1/2/23", "9:01", "Bob", "sure"),
//!     Message::new("1/3/23", "9:00", "Alice", "more pizza"),
//! ];
//!
//! let config = FilterConfig::new().with_search("PIZZA").with_date("1/2/23")?;
//! let filtered = apply_filters(messages, &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].content, "Pizza tonight?");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Search terms are trimmed; a blank term disables the search filter
//! - Date matching compares the literal token, so `1/2/23` and `01/02/23` differ
//! - Multiple filters are combined with AND logic

use crate::Message;
use crate::error::ChatstatsError;
use crate::parsing::{DateOrder, parse_date};

/// Configuration for filtering messages.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Lowercased keyword matched against content and sender.
    pub search: Option<String>,

    /// Include only messages with this date token.
    pub date: Option<String>,

    /// Include only messages from this sender (case-insensitive).
    pub from: Option<String>,

    /// Drop system notices.
    pub exclude_system: bool,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keyword filter.
    ///
    /// Matching is case-insensitive against both content and sender name.
    #[must_use]
    pub fn with_search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim().to_lowercase();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    /// Sets the date filter.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if `date` is not a readable
    /// date token in either field order.
    ///
    /// ```
    /// use chatstats::filter::FilterConfig;
    ///
    /// assert!(FilterConfig::new().with_date("12/31/23").is_ok());
    /// assert!(FilterConfig::new().with_date("2023-12-31").is_err());
    /// ```
    pub fn with_date(mut self, date: &str) -> Result<Self, ChatstatsError> {
        let date = date.trim();
        let readable = parse_date(date, DateOrder::MonthFirst).is_some()
            || parse_date(date, DateOrder::DayFirst).is_some();
        if !readable {
            return Err(ChatstatsError::invalid_date(date));
        }
        self.date = Some(date.to_string());
        Ok(self)
    }

    /// Sets the sender filter.
    ///
    /// ```
    /// use chatstats::filter::FilterConfig;
    ///
    /// // Matches "Alice", "alice", "ALICE"
    /// let config = FilterConfig::new().with_sender("Alice");
    /// assert!(config.is_active());
    /// ```
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Drops system notices from the result.
    #[must_use]
    pub fn exclude_system(mut self, exclude: bool) -> Self {
        self.exclude_system = exclude;
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.search.is_some() || self.date.is_some() || self.from.is_some() || self.exclude_system
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if self.exclude_system && msg.is_system {
            return false;
        }

        if let Some(ref date) = self.date {
            if msg.date != *date {
                return false;
            }
        }

        if let Some(ref from) = self.from {
            if msg.sender.to_lowercase() != from.to_lowercase() {
                return false;
            }
        }

        if let Some(ref term) = self.search {
            if !msg.content.to_lowercase().contains(term.as_str())
                && !msg.sender.to_lowercase().contains(term.as_str())
            {
                return false;
            }
        }

        true
    }
}

/// Filters a collection of messages based on the provided configuration.
///
/// Returns a new vector containing only messages that match all active filters.
/// If no filters are active, returns the original messages unchanged.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages
        .into_iter()
        .filter(|msg| config.matches(msg))
        .collect()
}
