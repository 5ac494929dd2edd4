//! Ranked report items and the sender ranking.
//!
//! Frequency maps do the sorting (see [`FrequencyMap`](super::FrequencyMap));
//! this module names what comes out of them.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::frequency::Ranked;
use super::time_bucket::TimeOfDayBars;
use crate::Message;

/// A word with its number of uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl From<Ranked> for WordCount {
    fn from(r: Ranked) -> Self {
        Self {
            word: r.key,
            count: r.count,
        }
    }
}

/// A date token with its number of messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: String,
    pub count: usize,
}

impl From<Ranked> for DayCount {
    fn from(r: Ranked) -> Self {
        Self {
            date: r.key,
            count: r.count,
        }
    }
}

/// Messages sent by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderCount {
    pub sender: String,
    pub count: usize,
}

/// Counts non-system messages per sender.
///
/// Sorted by count descending, ties by sender name ascending. Empty input
/// gives an empty list.
///
/// # Example
///
/// ```rust
/// use chatstats::analysis::calculate_basic_stats;
/// use chatstats::parser::parse_transcript;
///
/// let messages = parse_transcript(
///     "1/2/23, 9:00 - Alice: hi\n1/2/23, 9:01 - Bob: hello\n1/2/23, 9:02 - Alice: bye",
/// );
/// let stats = calculate_basic_stats(&messages);
///
/// assert_eq!(stats[0].sender, "Alice");
/// assert_eq!(stats[0].count, 2);
/// assert_eq!(stats[1].sender, "Bob");
/// ```
pub fn calculate_basic_stats(messages: &[Message]) -> Vec<SenderCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for msg in messages.iter().filter(|m| !m.is_system) {
        *counts.entry(msg.sender.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by_key(|&(sender, count)| (Reverse(count), sender));
    ranked
        .into_iter()
        .map(|(sender, count)| SenderCount {
            sender: sender.to_string(),
            count,
        })
        .collect()
}

/// The busiest time bucket and its most active sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MostActiveBar {
    pub label: String,
    pub top_sender: String,
    pub total: usize,
}

/// Picks the most active bar, if any message landed in a bucket.
pub fn most_active_bar(bars: &TimeOfDayBars) -> Option<MostActiveBar> {
    let bar = bars.most_active()?;
    let (sender, _) = bar.top_sender()?;
    Some(MostActiveBar {
        label: bar.label.clone(),
        top_sender: sender.to_string(),
        total: bar.total,
    })
}

/// Chattiness label derived from a participant's raw word count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum YapLevel {
    #[default]
    #[serde(rename = "Casual Chatter")]
    CasualChatter,
    #[serde(rename = "Friendly Conversationalist")]
    FriendlyConversationalist,
    #[serde(rename = "Message Master")]
    MessageMaster,
    #[serde(rename = "Chat Enthusiast")]
    ChatEnthusiast,
    #[serde(rename = "Social Butterfly")]
    SocialButterfly,
    #[serde(rename = "Conversation Champion")]
    ConversationChampion,
    #[serde(rename = "Legendary Communicator")]
    LegendaryCommunicator,
    #[serde(rename = "Chat Guru")]
    ChatGuru,
    #[serde(rename = "Ultimate Message Maven")]
    UltimateMessageMaven,
}

impl YapLevel {
    /// Upper bounds (exclusive) of every level but the last.
    const THRESHOLDS: [(usize, YapLevel); 8] = [
        (1_000, YapLevel::CasualChatter),
        (5_000, YapLevel::FriendlyConversationalist),
        (10_000, YapLevel::MessageMaster),
        (20_000, YapLevel::ChatEnthusiast),
        (50_000, YapLevel::SocialButterfly),
        (100_000, YapLevel::ConversationChampion),
        (200_000, YapLevel::LegendaryCommunicator),
        (500_000, YapLevel::ChatGuru),
    ];

    /// Maps a word count to its level.
    ///
    /// ```rust
    /// use chatstats::analysis::YapLevel;
    ///
    /// assert_eq!(YapLevel::from_words(0), YapLevel::CasualChatter);
    /// assert_eq!(YapLevel::from_words(1_000), YapLevel::FriendlyConversationalist);
    /// assert_eq!(YapLevel::from_words(750_000), YapLevel::UltimateMessageMaven);
    /// ```
    pub fn from_words(words: usize) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(limit, _)| words < *limit)
            .map_or(YapLevel::UltimateMessageMaven, |&(_, level)| level)
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            YapLevel::CasualChatter => "Casual Chatter",
            YapLevel::FriendlyConversationalist => "Friendly Conversationalist",
            YapLevel::MessageMaster => "Message Master",
            YapLevel::ChatEnthusiast => "Chat Enthusiast",
            YapLevel::SocialButterfly => "Social Butterfly",
            YapLevel::ConversationChampion => "Conversation Champion",
            YapLevel::LegendaryCommunicator => "Legendary Communicator",
            YapLevel::ChatGuru => "Chat Guru",
            YapLevel::UltimateMessageMaven => "Ultimate Message Maven",
        }
    }
}

impl fmt::Display for YapLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_stats_order() {
        let messages = vec![
            Message::new("1/2/23", "9:00", "Carol", "a"),
            Message::new("1/2/23", "9:00", "Bob", "a"),
            Message::system("1/2/23", "9:00", "notice"),
            Message::new("1/2/23", "9:00", "Alice", "a"),
            Message::new("1/2/23", "9:00", "Bob", "a"),
        ];
        let stats = calculate_basic_stats(&messages);
        let order: Vec<_> = stats.iter().map(|s| (s.sender.as_str(), s.count)).collect();
        assert_eq!(order, [("Bob", 2), ("Alice", 1), ("Carol", 1)]);
    }

    #[test]
    fn test_basic_stats_empty() {
        assert!(calculate_basic_stats(&[]).is_empty());
        assert!(calculate_basic_stats(&[Message::system("1/2/23", "9:00", "x")]).is_empty());
    }

    #[test]
    fn test_yap_level_thresholds() {
        assert_eq!(YapLevel::from_words(999), YapLevel::CasualChatter);
        assert_eq!(YapLevel::from_words(4_999), YapLevel::FriendlyConversationalist);
        assert_eq!(YapLevel::from_words(5_000), YapLevel::MessageMaster);
        assert_eq!(YapLevel::from_words(19_999), YapLevel::ChatEnthusiast);
        assert_eq!(YapLevel::from_words(20_000), YapLevel::SocialButterfly);
        assert_eq!(YapLevel::from_words(99_999), YapLevel::ConversationChampion);
        assert_eq!(YapLevel::from_words(100_000), YapLevel::LegendaryCommunicator);
        assert_eq!(YapLevel::from_words(499_999), YapLevel::ChatGuru);
        assert_eq!(YapLevel::from_words(500_000), YapLevel::UltimateMessageMaven);
    }

    #[test]
    fn test_yap_level_serializes_as_label() {
        let json = serde_json::to_string(&YapLevel::ChatGuru).unwrap();
        assert_eq!(json, r#""Chat Guru""#);
        assert_eq!(YapLevel::SocialButterfly.to_string(), "Social Butterfly");
    }

    #[test]
    fn test_most_active_bar() {
        let mut bars = TimeOfDayBars::new();
        assert!(most_active_bar(&bars).is_none());

        bars.record(2, "Bob");
        bars.record(9, "Carol");
        bars.record(10, "Alice");
        let top = most_active_bar(&bars).unwrap();
        assert_eq!(top.label, "Morning");
        assert_eq!(top.top_sender, "Alice");
        assert_eq!(top.total, 2);
    }
}
