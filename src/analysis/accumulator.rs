//! Single-pass participant accumulation.
//!
//! An [`Accumulator`] is the per-invocation context of one statistics run.
//! It owns every counter, so two runs never share state, and it accepts
//! messages one at a time so a host can feed a large transcript in chunks.
//!
//! # Example
//!
//! ```rust
//! use chatstats::analysis::Accumulator;
//! use chatstats::parser::parse_transcript;
//!
//! let messages = parse_transcript(
//!     "1/2/23, 9:00 - Alice: hi\n1/2/23, 9:01 - Bob: hello\n1/2/23, 9:02 - Alice: <Media omitted>",
//! );
//!
//! let mut acc = Accumulator::new();
//! for chunk in messages.chunks(2) {
//!     acc.extend(chunk);
//! }
//! let stats = acc.finish().unwrap();
//!
//! assert_eq!(stats.participants["Alice"].msg_count, 2);
//! assert_eq!(stats.participants["Alice"].media, 1);
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::trace;

use super::frequency::FrequencyMap;
use super::ranking::{DayCount, WordCount, YapLevel};
use super::report::{self, DeepStats};
use super::streak::MessageStreaks;
use super::text::{EmojiMatcher, UnicodeRangeMatcher, raw_word_count, ranking_tokens};
use super::time_bucket::TimeOfDayBars;
use crate::Message;
use crate::config::StatsConfig;

/// Counters and rankings for one sender.
///
/// Created on the sender's first non-system message, updated once per
/// message, and finalized once when the report is assembled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStat {
    /// Messages sent.
    pub msg_count: usize,
    /// Raw whitespace-separated words in non-media messages.
    pub words: usize,
    /// Media messages.
    pub media: usize,
    /// Edited messages.
    pub edited: usize,
    /// Emoji graphemes in non-media messages.
    pub emojis: usize,
    /// Longest run of consecutive messages.
    pub longest_streak: usize,
    /// Length of the run in progress when the transcript ends.
    pub current_streak: usize,
    /// Messages per hour token as written (`"9"`, `"09"`, `"21"`).
    pub times_of_day: FrequencyMap,
    /// Uses per emoji.
    pub emoji_counts: FrequencyMap,
    /// Most used emojis, most frequent first.
    pub top_emojis: Vec<String>,
    /// Least used emojis above the occurrence threshold, least frequent first.
    pub least_emojis: Vec<String>,
    /// Most frequent ranking word.
    pub most_said_word: Option<WordCount>,
    /// Busiest dates.
    pub top_days: Vec<DayCount>,
    /// Messages per date token.
    pub msgs_per_date: FrequencyMap,
    /// Chattiness label derived from `words`.
    pub yap_level: YapLevel,
    /// Ranking-word frequencies.
    #[serde(skip)]
    pub word_counts: FrequencyMap,
}

impl ParticipantStat {
    /// Fills the derived fields from the raw counters.
    pub(crate) fn finalize(&mut self, config: &StatsConfig) {
        self.top_emojis = self
            .emoji_counts
            .top_n(config.top_n)
            .into_iter()
            .map(|r| r.key)
            .collect();
        self.least_emojis = self
            .emoji_counts
            .least_n(config.least_n, config.min_emoji_occurrence)
            .into_iter()
            .map(|r| r.key)
            .collect();
        self.most_said_word = self.word_counts.most_frequent().map(WordCount::from);
        self.top_days = self
            .msgs_per_date
            .top_n(config.top_n)
            .into_iter()
            .map(DayCount::from)
            .collect();
        self.yap_level = YapLevel::from_words(self.words);
    }
}

/// First and last non-system message seen on one date.
#[derive(Debug, Clone)]
pub(crate) struct DateEdges {
    pub(crate) first: Message,
    pub(crate) last: Message,
}

/// Per-run statistics context.
pub struct Accumulator {
    pub(crate) config: StatsConfig,
    matcher: Box<dyn EmojiMatcher>,
    pub(crate) participants: BTreeMap<String, ParticipantStat>,
    pub(crate) word_counts: FrequencyMap,
    pub(crate) msgs_by_date: FrequencyMap,
    pub(crate) bars: TimeOfDayBars,
    pub(crate) streaks: MessageStreaks,
    pub(crate) date_edges: HashMap<String, DateEdges>,
    pub(crate) total_messages: usize,
    pub(crate) system_messages: usize,
    pub(crate) total_words: usize,
    pub(crate) total_media: usize,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Accumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accumulator")
            .field("config", &self.config)
            .field("participants", &self.participants.len())
            .field("total_messages", &self.total_messages)
            .finish_non_exhaustive()
    }
}

impl Accumulator {
    /// Creates an accumulator with default configuration.
    pub fn new() -> Self {
        Self::with_config(StatsConfig::default())
    }

    /// Creates an accumulator with custom configuration.
    pub fn with_config(config: StatsConfig) -> Self {
        Self::with_matcher(config, UnicodeRangeMatcher::new())
    }

    /// Creates an accumulator with a custom emoji matcher.
    pub fn with_matcher(config: StatsConfig, matcher: impl EmojiMatcher + 'static) -> Self {
        Self {
            config,
            matcher: Box::new(matcher),
            participants: BTreeMap::new(),
            word_counts: FrequencyMap::new(),
            msgs_by_date: FrequencyMap::new(),
            bars: TimeOfDayBars::new(),
            streaks: MessageStreaks::new(),
            date_edges: HashMap::new(),
            total_messages: 0,
            system_messages: 0,
            total_words: 0,
            total_media: 0,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Number of messages pushed so far, system messages included.
    pub fn messages_seen(&self) -> usize {
        self.total_messages
    }

    /// Accounts for one message. System messages are counted but not analysed.
    pub fn push(&mut self, msg: &Message) {
        self.total_messages += 1;
        if msg.is_system {
            self.system_messages += 1;
            return;
        }

        let p = self.participants.entry(msg.sender.clone()).or_default();
        p.msg_count += 1;

        if msg.is_media() {
            p.media += 1;
            self.total_media += 1;
        } else {
            for token in ranking_tokens(&msg.content) {
                self.word_counts.increment(&token);
                p.word_counts.increment(&token);
            }

            let words = raw_word_count(&msg.content);
            p.words += words;
            self.total_words += words;

            for emoji in self.matcher.extract(&msg.content) {
                p.emojis += 1;
                p.emoji_counts.increment(emoji);
            }
        }

        if msg.is_edited() {
            p.edited += 1;
        }

        p.times_of_day.increment(msg.hour_str());
        if let Some(hour) = msg.hour() {
            self.bars.record(hour, &msg.sender);
        }

        p.msgs_per_date.increment(&msg.date);
        self.msgs_by_date.increment(&msg.date);

        match self.date_edges.get_mut(&msg.date) {
            Some(edges) => edges.last = msg.clone(),
            None => {
                self.date_edges.insert(
                    msg.date.clone(),
                    DateEdges {
                        first: msg.clone(),
                        last: msg.clone(),
                    },
                );
            }
        }

        self.streaks.push(&msg.sender);
        trace!(sender = %msg.sender, date = %msg.date, "accumulated message");
    }

    /// Accounts for a batch of messages in order.
    pub fn extend<'a, I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = &'a Message>,
    {
        for msg in messages {
            self.push(msg);
        }
    }

    /// Finalizes the run into a report.
    ///
    /// Returns `None` if no message at all was pushed.
    pub fn finish(self) -> Option<DeepStats> {
        report::assemble(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(sender: &str, time: &str, content: &str) -> Message {
        Message::new("1/2/23", time, sender, content)
    }

    fn run(messages: &[Message]) -> DeepStats {
        let mut acc = Accumulator::new();
        acc.extend(messages);
        acc.finish().unwrap()
    }

    #[test]
    fn test_lazy_participant_creation() {
        let stats = run(&[
            Message::system("1/2/23", "9:00", "created group"),
            msg("Alice", "9:01", "hi"),
        ]);
        assert_eq!(stats.participants.len(), 1);
        assert!(stats.participants.contains_key("Alice"));
        assert!(!stats.participants.contains_key("System"));
    }

    #[test]
    fn test_media_excluded_from_words_and_emojis() {
        let stats = run(&[
            msg("Alice", "9:00", "<Media omitted>"),
            msg("Alice", "9:01", "nice pic 😂"),
        ]);
        let alice = &stats.participants["Alice"];
        assert_eq!(alice.media, 1);
        assert_eq!(alice.words, 3);
        assert_eq!(alice.emojis, 1);
        assert_eq!(stats.total_media, 1);
        assert_eq!(stats.total_words, 3);
    }

    #[test]
    fn test_edited_counted_independently() {
        let stats = run(&[
            msg("Bob", "9:00", "typo fixed <This message was edited>"),
            msg("Bob", "9:01", "<Media omitted> <This message was edited>"),
        ]);
        let bob = &stats.participants["Bob"];
        assert_eq!(bob.edited, 2);
        assert_eq!(bob.media, 1);
    }

    #[test]
    fn test_word_counting_vs_ranking() {
        let stats = run(&[msg("Alice", "9:00", "The pizza is the best pizza")]);
        let alice = &stats.participants["Alice"];
        // Raw count keeps every token
        assert_eq!(alice.words, 6);
        // Ranking drops stopwords and short tokens
        assert_eq!(alice.word_counts.get("pizza"), 2);
        assert_eq!(alice.word_counts.get("the"), 0);
        assert_eq!(alice.word_counts.get("is"), 0);
        assert_eq!(
            alice.most_said_word,
            Some(WordCount {
                word: "pizza".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn test_emoji_rankings() {
        let mut messages = Vec::new();
        for _ in 0..7 {
            messages.push(msg("Alice", "9:00", "😂"));
        }
        for _ in 0..6 {
            messages.push(msg("Alice", "9:00", "🔥"));
        }
        messages.push(msg("Alice", "9:00", "🎉 🎉"));
        messages.push(msg("Alice", "9:00", "☀"));

        let stats = run(&messages);
        let alice = &stats.participants["Alice"];
        assert_eq!(alice.emojis, 16);
        assert_eq!(alice.top_emojis, ["😂", "🔥", "🎉"]);
        // 🎉 (2) and ☀ (1) are below the threshold of 6
        assert_eq!(alice.least_emojis, ["🔥", "😂"]);
    }

    #[test]
    fn test_custom_threshold() {
        let mut acc = Accumulator::with_config(StatsConfig::new().with_min_emoji_occurrence(1));
        acc.extend(&[msg("Alice", "9:00", "🎉 ☀ ☀")]);
        let stats = acc.finish().unwrap();
        assert_eq!(stats.participants["Alice"].least_emojis, ["🎉", "☀"]);
    }

    #[test]
    fn test_custom_matcher() {
        let matcher = UnicodeRangeMatcher::with_ranges([('\u{2764}', '\u{2764}')]);
        let mut acc = Accumulator::with_matcher(StatsConfig::default(), matcher);
        acc.push(&msg("Alice", "9:00", "❤ 😂"));
        let stats = acc.finish().unwrap();
        assert_eq!(stats.participants["Alice"].emojis, 1);
        assert_eq!(stats.participants["Alice"].emoji_counts.get("❤"), 1);
    }

    #[test]
    fn test_times_of_day_and_buckets() {
        let stats = run(&[
            msg("Alice", "9:00", "a"),
            msg("Alice", "09:30", "b"),
            msg("Bob", "21:15", "c"),
        ]);
        let alice = &stats.participants["Alice"];
        assert_eq!(alice.times_of_day.get("9"), 1);
        assert_eq!(alice.times_of_day.get("09"), 1);

        let morning = &stats.time_of_day_bars[1];
        assert_eq!(morning.label, "Morning");
        assert_eq!(morning.total, 2);
        assert_eq!(stats.time_of_day_bars[3].totals["Bob"], 1);
        assert_eq!(stats.hourly_histogram[9], 2);
    }

    #[test]
    fn test_invalid_hour_counted_but_not_bucketed() {
        let stats = run(&[msg("Alice", "99:00", "late")]);
        let alice = &stats.participants["Alice"];
        assert_eq!(alice.times_of_day.get("99"), 1);
        assert!(stats.time_of_day_bars.iter().all(|b| b.total == 0));
        assert!(stats.most_active_bar.is_none());
    }

    #[test]
    fn test_msgs_per_date() {
        let stats = run(&[
            Message::new("1/2/23", "9:00", "Alice", "a"),
            Message::new("1/2/23", "9:00", "Alice", "b"),
            Message::new("1/3/23", "9:00", "Alice", "c"),
        ]);
        let alice = &stats.participants["Alice"];
        assert_eq!(alice.msgs_per_date.get("1/2/23"), 2);
        assert_eq!(alice.top_days[0].date, "1/2/23");
        assert_eq!(alice.top_days[0].count, 2);
    }

    #[test]
    fn test_fresh_state_per_run() {
        let first = run(&[msg("Alice", "9:00", "hello there")]);
        let second = run(&[msg("Bob", "9:00", "hello again")]);
        assert!(!second.participants.contains_key("Alice"));
        assert_eq!(first.participants.len(), 1);
        assert_eq!(second.total_words, 2);
    }

    #[test]
    fn test_only_system_messages() {
        let stats = run(&[Message::system("1/2/23", "9:00", "created group")]);
        assert!(stats.participants.is_empty());
        assert_eq!(stats.total_active_days, 0);
        assert_eq!(stats.max_days_streak, 0);
    }

    #[test]
    fn test_empty_accumulator() {
        assert!(Accumulator::new().finish().is_none());
    }
}
