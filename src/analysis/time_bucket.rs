//! Time-of-day classification.
//!
//! Every hour of the day falls into exactly one of four fixed six-hour
//! buckets, and into one of 24 hourly histogram slots.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// One of the four fixed activity windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TimeBucket {
    /// 00:00 - 05:59
    Night,
    /// 06:00 - 11:59
    Morning,
    /// 12:00 - 17:59
    Afternoon,
    /// 18:00 - 23:59
    Evening,
}

impl TimeBucket {
    /// All buckets in chronological order.
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::Night,
        TimeBucket::Morning,
        TimeBucket::Afternoon,
        TimeBucket::Evening,
    ];

    /// Classifies an hour of day. Hours above 23 have no bucket.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstats::analysis::TimeBucket;
    ///
    /// assert_eq!(TimeBucket::from_hour(5), Some(TimeBucket::Night));
    /// assert_eq!(TimeBucket::from_hour(6), Some(TimeBucket::Morning));
    /// assert_eq!(TimeBucket::from_hour(24), None);
    /// ```
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            0..=5 => Some(TimeBucket::Night),
            6..=11 => Some(TimeBucket::Morning),
            12..=17 => Some(TimeBucket::Afternoon),
            18..=23 => Some(TimeBucket::Evening),
            _ => None,
        }
    }

    /// Inclusive hour range covered by this bucket.
    pub fn range(self) -> (u32, u32) {
        match self {
            TimeBucket::Night => (0, 5),
            TimeBucket::Morning => (6, 11),
            TimeBucket::Afternoon => (12, 17),
            TimeBucket::Evening => (18, 23),
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            TimeBucket::Night => "Night",
            TimeBucket::Morning => "Morning",
            TimeBucket::Afternoon => "Afternoon",
            TimeBucket::Evening => "Evening",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Message totals for one time bucket, overall and per sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayBar {
    /// Bucket label (`"Night"`, `"Morning"`, ...).
    pub label: String,
    /// Inclusive hour range.
    pub range: (u32, u32),
    /// Messages per sender within the bucket.
    pub totals: BTreeMap<String, usize>,
    /// Messages within the bucket.
    pub total: usize,
}

impl TimeOfDayBar {
    fn empty(bucket: TimeBucket) -> Self {
        Self {
            label: bucket.label().to_string(),
            range: bucket.range(),
            totals: BTreeMap::new(),
            total: 0,
        }
    }

    /// The sender with the most messages in this bucket.
    ///
    /// Ties go to the lexically smallest name.
    pub fn top_sender(&self) -> Option<(&str, usize)> {
        // BTreeMap iterates names ascending, so strict > keeps the first of equals
        let mut best: Option<(&str, usize)> = None;
        for (sender, &count) in &self.totals {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((sender.as_str(), count));
            }
        }
        best
    }
}

/// The four time-of-day bars plus a 24-slot hourly histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDayBars {
    bars: [TimeOfDayBar; 4],
    hourly: [usize; 24],
}

impl Default for TimeOfDayBars {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeOfDayBars {
    /// Creates four empty bars.
    pub fn new() -> Self {
        Self {
            bars: TimeBucket::ALL.map(TimeOfDayBar::empty),
            hourly: [0; 24],
        }
    }

    /// Counts one message from `sender` at `hour`.
    ///
    /// Returns the bucket it landed in, or `None` for an invalid hour.
    pub fn record(&mut self, hour: u32, sender: &str) -> Option<TimeBucket> {
        let bucket = TimeBucket::from_hour(hour)?;
        let bar = &mut self.bars[bucket.index()];
        *bar.totals.entry(sender.to_string()).or_insert(0) += 1;
        bar.total += 1;
        self.hourly[hour as usize] += 1;
        Some(bucket)
    }

    /// Returns the bar for a bucket.
    pub fn bar(&self, bucket: TimeBucket) -> &TimeOfDayBar {
        &self.bars[bucket.index()]
    }

    /// Returns the hourly histogram.
    pub fn hourly(&self) -> &[usize; 24] {
        &self.hourly
    }

    /// The busiest bucket.
    ///
    /// Ties go to the earlier bucket; `None` when no message was recorded.
    pub fn most_active(&self) -> Option<&TimeOfDayBar> {
        let mut best: Option<&TimeOfDayBar> = None;
        for bar in &self.bars {
            if bar.total > best.map_or(0, |b| b.total) {
                best = Some(bar);
            }
        }
        best
    }

    /// Consumes the collection, returning bars in chronological order.
    pub fn into_parts(self) -> (Vec<TimeOfDayBar>, [usize; 24]) {
        (self.bars.into(), self.hourly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        for hour in 0..24 {
            let bucket = TimeBucket::from_hour(hour).unwrap();
            let (lo, hi) = bucket.range();
            assert!(lo <= hour && hour <= hi, "hour {hour} outside {bucket}");
        }
        assert_eq!(TimeBucket::from_hour(11), Some(TimeBucket::Morning));
        assert_eq!(TimeBucket::from_hour(12), Some(TimeBucket::Afternoon));
        assert_eq!(TimeBucket::from_hour(17), Some(TimeBucket::Afternoon));
        assert_eq!(TimeBucket::from_hour(18), Some(TimeBucket::Evening));
        assert_eq!(TimeBucket::from_hour(23), Some(TimeBucket::Evening));
    }

    #[test]
    fn test_record_updates_bar_and_histogram() {
        let mut bars = TimeOfDayBars::new();
        assert_eq!(bars.record(9, "Alice"), Some(TimeBucket::Morning));
        bars.record(10, "Alice");
        bars.record(10, "Bob");
        assert_eq!(bars.record(30, "Bob"), None);

        let morning = bars.bar(TimeBucket::Morning);
        assert_eq!(morning.total, 3);
        assert_eq!(morning.totals["Alice"], 2);
        assert_eq!(morning.totals["Bob"], 1);
        assert_eq!(bars.hourly()[10], 2);
        assert_eq!(bars.hourly().iter().sum::<usize>(), 3);
    }

    #[test]
    fn test_most_active_empty() {
        assert!(TimeOfDayBars::new().most_active().is_none());
    }

    #[test]
    fn test_most_active_tie_prefers_earlier_bucket() {
        let mut bars = TimeOfDayBars::new();
        bars.record(20, "Alice");
        bars.record(2, "Bob");

        let top = bars.most_active().unwrap();
        assert_eq!(top.label, "Night");
    }

    #[test]
    fn test_top_sender_tie_is_lexical() {
        let mut bars = TimeOfDayBars::new();
        bars.record(13, "Zed");
        bars.record(14, "Amy");
        bars.record(15, "Zed");
        bars.record(16, "Amy");

        let bar = bars.bar(TimeBucket::Afternoon);
        assert_eq!(bar.top_sender(), Some(("Amy", 2)));
    }
}
