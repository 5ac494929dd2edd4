//! Frequency maps and their ranking rules.
//!
//! A [`FrequencyMap`] counts string keys (words, emojis, date tokens). Every
//! ranking breaks count ties by key in ascending byte order, so the same
//! transcript always produces the same output.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A key with its count, as produced by a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranked {
    /// The counted key.
    pub key: String,
    /// How often it was seen.
    pub count: usize,
}

/// Counts of string keys.
///
/// # Example
///
/// ```rust
/// use chatstats::analysis::FrequencyMap;
///
/// let mut words = FrequencyMap::new();
/// for w in ["pizza", "tonight", "pizza", "beer", "tonight", "pizza"] {
///     words.increment(w);
/// }
///
/// let top: Vec<_> = words.top_n(2).into_iter().map(|r| r.key).collect();
/// assert_eq!(top, ["pizza", "tonight"]);
/// assert_eq!(words.most_frequent().unwrap().count, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyMap {
    counts: BTreeMap<String, usize>,
}

impl FrequencyMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to `key`.
    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Adds `n` to `key`.
    pub fn add(&mut self, key: &str, n: usize) {
        if let Some(count) = self.counts.get_mut(key) {
            *count += n;
        } else {
            self.counts.insert(key.to_string(), n);
        }
    }

    /// Returns the count for `key` (0 when absent).
    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` when nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates `(key, count)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The `n` most frequent keys, count descending, then key ascending.
    pub fn top_n(&self, n: usize) -> Vec<Ranked> {
        self.ranked(n, |a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
    }

    /// The `n` least frequent keys among those seen at least `min_count`
    /// times, count ascending, then key ascending.
    ///
    /// Keys below the threshold are excluded, not ranked last.
    pub fn least_n(&self, n: usize, min_count: usize) -> Vec<Ranked> {
        let mut entries: Vec<(&str, usize)> =
            self.iter().filter(|&(_, count)| count >= min_count).collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries.into_iter().take(n).map(Ranked::from).collect()
    }

    /// The single most frequent key, or `None` for an empty map.
    pub fn most_frequent(&self) -> Option<Ranked> {
        // Keys iterate ascending, so strict > keeps the smallest key among equals
        let mut best: Option<(&str, usize)> = None;
        for (key, count) in self.iter() {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((key, count));
            }
        }
        best.map(Ranked::from)
    }

    fn ranked<F>(&self, n: usize, order: F) -> Vec<Ranked>
    where
        F: FnMut(&(&str, usize), &(&str, usize)) -> Ordering,
    {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_by(order);
        entries.into_iter().take(n).map(Ranked::from).collect()
    }
}

impl From<(&str, usize)> for Ranked {
    fn from((key, count): (&str, usize)) -> Self {
        Self {
            key: key.to_string(),
            count,
        }
    }
}

impl<'a> FromIterator<&'a str> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for key in iter {
            map.increment(key);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ranked: &[Ranked]) -> Vec<&str> {
        ranked.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn test_increment_and_get() {
        let mut map = FrequencyMap::new();
        map.increment("a");
        map.increment("a");
        map.add("b", 5);

        assert_eq!(map.get("a"), 2);
        assert_eq!(map.get("b"), 5);
        assert_eq!(map.get("missing"), 0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.total(), 7);
    }

    #[test]
    fn test_top_n_orders_by_count_then_key() {
        let map: FrequencyMap = ["b", "a", "c", "c", "b", "d", "d", "d"].into_iter().collect();

        let top = map.top_n(3);
        assert_eq!(keys(&top), ["d", "b", "c"]);
        assert_eq!(top[0].count, 3);
    }

    #[test]
    fn test_top_n_shorter_than_n() {
        let map: FrequencyMap = ["x"].into_iter().collect();
        assert_eq!(map.top_n(3).len(), 1);
        assert!(FrequencyMap::new().top_n(3).is_empty());
    }

    #[test]
    fn test_least_n_applies_threshold() {
        let mut map = FrequencyMap::new();
        map.add("rare", 2);
        map.add("six", 6);
        map.add("seven", 7);
        map.add("also_six", 6);
        map.add("many", 40);

        let least = map.least_n(3, 6);
        assert_eq!(keys(&least), ["also_six", "six", "seven"]);
        assert!(least.iter().all(|r| r.count >= 6));
    }

    #[test]
    fn test_least_n_all_below_threshold() {
        let map: FrequencyMap = ["a", "b", "b"].into_iter().collect();
        assert!(map.least_n(3, 6).is_empty());
    }

    #[test]
    fn test_most_frequent_tie_is_lexical() {
        let map: FrequencyMap = ["pear", "apple", "pear", "apple"].into_iter().collect();
        let best = map.most_frequent().unwrap();
        assert_eq!(best.key, "apple");
        assert_eq!(best.count, 2);
    }

    #[test]
    fn test_most_frequent_empty() {
        assert!(FrequencyMap::new().most_frequent().is_none());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let map: FrequencyMap = ["b", "a", "b"].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
    }
}
