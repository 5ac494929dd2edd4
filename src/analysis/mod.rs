//! Statistics engine.
//!
//! Everything here works on already reconstructed [`Message`](crate::Message)
//! sequences and performs no I/O:
//!
//! - [`time_bucket`] - hour → bucket and histogram slot
//! - [`text`] - word tokens and the pluggable [`EmojiMatcher`]
//! - [`frequency`] - counted keys and ranking tie-breaks
//! - [`streak`] - message runs and calendar-day runs
//! - [`accumulator`] - the per-run [`Accumulator`]
//! - [`ranking`] - sender ranking, chattiness levels
//! - [`report`] - the final [`DeepStats`]
//!
//! # Example
//!
//! ```rust
//! use chatstats::analysis::{calculate_basic_stats, calculate_deep_stats};
//! use chatstats::parser::parse_transcript;
//!
//! let messages = parse_transcript(
//!     "1/1/23, 9:00 - Alice: hi\n1/2/23, 9:00 - Bob: hey\n1/3/23, 9:00 - Alice: 😂",
//! );
//!
//! let basic = calculate_basic_stats(&messages);
//! assert_eq!(basic[0].sender, "Alice");
//!
//! let stats = calculate_deep_stats(&messages).unwrap();
//! assert_eq!(stats.max_days_streak, 3);
//! assert_eq!(stats.participants["Alice"].emojis, 1);
//! ```

pub mod accumulator;
pub mod frequency;
pub mod ranking;
pub mod report;
pub mod streak;
pub mod text;
pub mod time_bucket;

pub use accumulator::{Accumulator, ParticipantStat};
pub use frequency::{FrequencyMap, Ranked};
pub use ranking::{
    DayCount, MostActiveBar, SenderCount, WordCount, YapLevel, calculate_basic_stats,
    most_active_bar,
};
pub use report::{
    DeepStats, GraphSeries, MessageSpan, analyze, calculate_deep_stats, calculate_deep_stats_with,
};
pub use streak::{
    DayStreak, MessageStreaks, day_streak, longest_message_streaks, messages_per_day, sort_dates,
};
pub use text::{EmojiMatcher, UnicodeRangeMatcher};
pub use time_bucket::{TimeBucket, TimeOfDayBar, TimeOfDayBars};
