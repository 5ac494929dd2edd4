//! Message-run and calendar-day streaks.
//!
//! Both streaks are recomputed from scratch for every input:
//!
//! - a **message streak** is the longest run of consecutive non-system
//!   messages from one sender, in transcript order;
//! - the **day streak** is the longest run of consecutive calendar days that
//!   have at least one message.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::Message;
use crate::parsing::{DateOrder, parse_date};

/// Incremental tracker of per-sender message runs.
///
/// Feed senders in transcript order with [`push`](Self::push); query with
/// [`longest`](Self::longest) at any point.
///
/// # Example
///
/// ```rust
/// use chatstats::analysis::MessageStreaks;
///
/// let mut streaks = MessageStreaks::new();
/// for sender in ["Alice", "Alice", "Bob", "Alice", "Alice", "Alice"] {
///     streaks.push(sender);
/// }
/// assert_eq!(streaks.longest("Alice"), 3);
/// assert_eq!(streaks.longest("Bob"), 1);
/// assert_eq!(streaks.current(), Some(("Alice", 3)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageStreaks {
    longest: HashMap<String, usize>,
    run_sender: Option<String>,
    run_len: usize,
}

impl MessageStreaks {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the next message's sender.
    pub fn push(&mut self, sender: &str) {
        if self.run_sender.as_deref() == Some(sender) {
            self.run_len += 1;
        } else {
            self.flush();
            self.run_sender = Some(sender.to_string());
            self.run_len = 1;
        }
    }

    /// Longest run seen for `sender`, including the run in progress.
    pub fn longest(&self, sender: &str) -> usize {
        let stored = self.longest.get(sender).copied().unwrap_or(0);
        match self.current() {
            Some((s, len)) if s == sender => stored.max(len),
            _ => stored,
        }
    }

    /// The run in progress, as `(sender, length)`.
    pub fn current(&self) -> Option<(&str, usize)> {
        self.run_sender.as_deref().map(|s| (s, self.run_len))
    }

    /// Longest run per sender, with the run in progress flushed.
    pub fn into_longest(mut self) -> HashMap<String, usize> {
        self.flush();
        self.longest
    }

    fn flush(&mut self) {
        if let Some(sender) = &self.run_sender {
            let best = self.longest.entry(sender.clone()).or_insert(0);
            *best = (*best).max(self.run_len);
        }
    }
}

/// Longest consecutive-message run per sender over non-system messages.
pub fn longest_message_streaks(messages: &[Message]) -> HashMap<String, usize> {
    let mut streaks = MessageStreaks::new();
    for msg in messages.iter().filter(|m| !m.is_system) {
        streaks.push(&msg.sender);
    }
    streaks.into_longest()
}

/// The longest run of consecutive calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStreak {
    /// Number of days in the run (0 when there are no dates).
    pub length: usize,
    /// Date token of the first day of the run.
    pub start: Option<String>,
    /// Date token of the last day of the run.
    pub end: Option<String>,
}

/// Orders date tokens by calendar date.
///
/// Tokens that can't be read as dates sort after every readable one, in
/// lexical order among themselves.
pub fn sort_dates<'a, I>(dates: I, order: DateOrder) -> Vec<(&'a str, Option<NaiveDate>)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parsed: Vec<(&str, Option<NaiveDate>)> = dates
        .into_iter()
        .map(|token| (token, parse_date(token, order)))
        .collect();
    parsed.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.0.cmp(b.0)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.0.cmp(b.0),
    });
    parsed
}

/// Longest run of consecutive calendar days among `dates`.
///
/// Successive sorted dates continue a run when they are exactly one day
/// apart. Any other gap, a duplicate calendar day spelled differently, or an
/// unreadable token starts a new run. On equal lengths the earliest run wins.
///
/// # Example
///
/// ```rust
/// use chatstats::analysis::day_streak;
/// use chatstats::config::DateOrder;
///
/// let streak = day_streak(["1/1/23", "1/2/23", "1/3/23", "1/10/23"], DateOrder::MonthFirst);
/// assert_eq!(streak.length, 3);
/// assert_eq!(streak.start.as_deref(), Some("1/1/23"));
/// assert_eq!(streak.end.as_deref(), Some("1/3/23"));
/// ```
pub fn day_streak<'a, I>(dates: I, order: DateOrder) -> DayStreak
where
    I: IntoIterator<Item = &'a str>,
{
    let unique: BTreeSet<&str> = dates.into_iter().collect();
    let sorted = sort_dates(unique, order);

    let mut best = DayStreak::default();
    let mut run_start = 0usize;
    let mut run_len = 0usize;
    let mut prev: Option<NaiveDate> = None;

    for (i, &(_, date)) in sorted.iter().enumerate() {
        let continues = match (prev, date) {
            (Some(p), Some(d)) => (d - p).num_days() == 1,
            _ => false,
        };
        if continues {
            run_len += 1;
        } else {
            run_start = i;
            run_len = 1;
        }
        if run_len > best.length {
            best = DayStreak {
                length: run_len,
                start: Some(sorted[run_start].0.to_string()),
                end: Some(sorted[i].0.to_string()),
            };
        }
        prev = date;
    }

    best
}

/// Counts messages per date token, returned in calendar order.
pub fn messages_per_day(messages: &[Message], order: DateOrder) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for msg in messages.iter().filter(|m| !m.is_system) {
        *counts.entry(msg.date.as_str()).or_insert(0) += 1;
    }
    sort_dates(counts.keys().copied(), order)
        .into_iter()
        .map(|(date, _)| (date.to_string(), counts[date]))
        .collect()
}
