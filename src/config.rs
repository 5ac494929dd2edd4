//! Configuration types for transcript parsing and statistics.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - transcript reconstruction settings
//! - [`StatsConfig`] - ranking and date interpretation settings
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{DateOrder, StatsConfig};
//!
//! let config = StatsConfig::new()
//!     .with_min_emoji_occurrence(3)
//!     .with_date_order(DateOrder::DayFirst);
//!
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ChatstatsError;

pub use crate::parsing::DateOrder;

/// Minimum number of uses before an emoji can appear in a "least used" list.
///
/// Rarer emojis are excluded entirely rather than ranked last.
pub const DEFAULT_MIN_EMOJI_OCCURRENCE: usize = 6;

/// Default length of top/least ranking slices.
pub const DEFAULT_RANK_LEN: usize = 3;

/// Configuration for transcript reconstruction.
///
/// # Example
///
/// ```rust
/// use chatstats::config::ParserConfig;
///
/// let config = ParserConfig::new().with_skip_system_messages(true);
/// assert!(config.skip_system_messages);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Drop system notices instead of keeping them flagged (default: false).
    ///
    /// Continuation lines that follow a dropped notice are dropped with it.
    pub skip_system_messages: bool,
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip system messages.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }
}

/// Configuration for the statistics engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Minimum count for an emoji to be ranked as least used (default: 6).
    pub min_emoji_occurrence: usize,

    /// Length of top emoji and top day slices (default: 3).
    pub top_n: usize,

    /// Length of the least-used emoji slice (default: 3).
    pub least_n: usize,

    /// How to read `a/b/yy` date tokens (default: month first).
    pub date_order: DateOrder,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            min_emoji_occurrence: DEFAULT_MIN_EMOJI_OCCURRENCE,
            top_n: DEFAULT_RANK_LEN,
            least_n: DEFAULT_RANK_LEN,
            date_order: DateOrder::default(),
        }
    }
}

impl StatsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the least-used emoji threshold.
    #[must_use]
    pub fn with_min_emoji_occurrence(mut self, min: usize) -> Self {
        self.min_emoji_occurrence = min;
        self
    }

    /// Sets the length of top slices.
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Sets the length of the least-used slice.
    #[must_use]
    pub fn with_least_n(mut self, n: usize) -> Self {
        self.least_n = n;
        self
    }

    /// Sets the date token interpretation.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Checks that ranking lengths are usable.
    pub fn validate(&self) -> Result<(), ChatstatsError> {
        if self.top_n == 0 {
            return Err(ChatstatsError::invalid_config("top_n", "must be at least 1"));
        }
        if self.least_n == 0 {
            return Err(ChatstatsError::invalid_config("least_n", "must be at least 1"));
        }
        Ok(())
    }

    /// Reads a configuration from a JSON document. Missing fields take defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstats::config::{DateOrder, StatsConfig};
    ///
    /// let config = StatsConfig::from_json_str(r#"{"date_order": "day-first"}"#)?;
    /// assert_eq!(config.date_order, DateOrder::DayFirst);
    /// assert_eq!(config.min_emoji_occurrence, 6);
    /// # Ok::<(), chatstats::ChatstatsError>(())
    /// ```
    #[cfg(feature = "json-output")]
    pub fn from_json_str(json: &str) -> Result<Self, ChatstatsError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
