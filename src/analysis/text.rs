//! Text classification: word tokens, raw word counts and emoji detection.
//!
//! Word *counting* and word *ranking* deliberately tokenize differently:
//! [`raw_word_count`] counts every whitespace-separated token, while
//! [`ranking_tokens`] lowercases, strips punctuation and drops short tokens
//! and stopwords.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

/// English function words and transcript artifacts excluded from word ranking.
pub const STOPWORDS: [&str; 35] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "with", "is", "are",
    "was", "were", "of", "it", "that", "this", "my", "your", "i", "me", "you", "he", "she", "we",
    "they", "it's", "i'm", "omitted", "media", "message", "deleted",
];

/// Shortest token that can rank.
pub const MIN_TOKEN_LEN: usize = 3;

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.into_iter().collect());

/// Returns `true` if `word` is in the stopword list.
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Number of whitespace-separated tokens, with no filtering.
pub fn raw_word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Tokens eligible for word-frequency ranking.
///
/// The text is lowercased, every character that is neither an ASCII word
/// character (`[A-Za-z0-9_]`) nor whitespace is removed, and the remainder is
/// split on whitespace. Tokens shorter than [`MIN_TOKEN_LEN`] and stopwords
/// are dropped.
///
/// # Example
///
/// ```rust
/// use chatstats::analysis::text::ranking_tokens;
///
/// let tokens = ranking_tokens("Are you coming to the PARTY tonight?!");
/// assert_eq!(tokens, ["coming", "party", "tonight"]);
/// ```
pub fn ranking_tokens(content: &str) -> Vec<String> {
    let cleaned: String = content
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.len() >= MIN_TOKEN_LEN && !is_stopword(w))
        .map(str::to_string)
        .collect()
}

/// Decides whether a grapheme cluster is an emoji.
///
/// The statistics passes only ever ask this question, so the set of
/// recognised emoji can be changed without touching aggregation.
pub trait EmojiMatcher: Send + Sync {
    /// Returns `true` if `grapheme` counts as an emoji.
    fn is_emoji(&self, grapheme: &str) -> bool;

    /// Returns every emoji grapheme in `text`, in order.
    fn extract<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.graphemes(true).filter(|g| self.is_emoji(g)).collect()
    }
}

/// Matches graphemes containing a scalar in one of a fixed set of ranges.
///
/// The default ranges are the pictographic blocks U+1F300-U+1F9FF and the
/// miscellaneous symbols block U+2600-U+26FF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeRangeMatcher {
    ranges: Vec<(char, char)>,
}

impl UnicodeRangeMatcher {
    /// Default inclusive ranges.
    pub const DEFAULT_RANGES: [(char, char); 2] = [
        ('\u{1F300}', '\u{1F9FF}'),
        ('\u{2600}', '\u{26FF}'),
    ];

    /// Creates a matcher with the default ranges.
    pub fn new() -> Self {
        Self {
            ranges: Self::DEFAULT_RANGES.to_vec(),
        }
    }

    /// Creates a matcher over custom inclusive ranges.
    pub fn with_ranges(ranges: impl IntoIterator<Item = (char, char)>) -> Self {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    /// Adds another inclusive range.
    #[must_use]
    pub fn with_range(mut self, start: char, end: char) -> Self {
        self.ranges.push((start, end));
        self
    }

    fn in_range(&self, c: char) -> bool {
        self.ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
    }
}

impl Default for UnicodeRangeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EmojiMatcher for UnicodeRangeMatcher {
    fn is_emoji(&self, grapheme: &str) -> bool {
        grapheme.chars().any(|c| self.in_range(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_word_count() {
        assert_eq!(raw_word_count("hello there  friend"), 3);
        assert_eq!(raw_word_count("  padded\ttext\nnext line "), 4);
        assert_eq!(raw_word_count(""), 0);
        assert_eq!(raw_word_count("   "), 0);
    }

    #[test]
    fn test_ranking_tokens_filters() {
        // "is", "it" are short, "the", "this" are stopwords
        assert_eq!(ranking_tokens("This is the best it gets"), ["best", "gets"]);
        // Apostrophes are stripped before the stopword check
        assert_eq!(ranking_tokens("I'm here"), ["here"]);
        // Non-ASCII letters are stripped
        assert_eq!(ranking_tokens("café time"), ["caf", "time"]);
    }

    #[test]
    fn test_ranking_tokens_artifacts() {
        assert!(ranking_tokens("<Media omitted>").is_empty());
        assert!(ranking_tokens("This message was deleted").is_empty());
    }

    #[test]
    fn test_ranking_tokens_keeps_underscores_and_digits() {
        assert_eq!(ranking_tokens("snake_case 2024"), ["snake_case", "2024"]);
    }

    #[test]
    fn test_default_matcher_ranges() {
        let matcher = UnicodeRangeMatcher::new();
        assert!(matcher.is_emoji("😂"));
        assert!(matcher.is_emoji("☀"));
        assert!(matcher.is_emoji("🎉"));
        assert!(!matcher.is_emoji("a"));
        assert!(!matcher.is_emoji("❤"));
    }

    #[test]
    fn test_extract_counts_clusters() {
        let matcher = UnicodeRangeMatcher::new();
        let found = matcher.extract("ok 😂😂 fine 👍🏽!");
        assert_eq!(found, ["😂", "😂", "👍🏽"]);
    }

    #[test]
    fn test_custom_range() {
        let matcher = UnicodeRangeMatcher::new().with_range('\u{2700}', '\u{27BF}');
        assert!(matcher.is_emoji("❤"));
        assert!(matcher.is_emoji("✨"));

        let only_hearts = UnicodeRangeMatcher::with_ranges([('\u{2764}', '\u{2764}')]);
        assert_eq!(only_hearts.extract("❤ 😂"), ["❤"]);
    }
}
