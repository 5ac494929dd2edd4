//! The assembled statistics report.
//!
//! [`DeepStats`] is built once at the end of a run and never mutated. It owns
//! every nested map, so it can be serialized or handed to a presentation
//! layer as-is.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use super::accumulator::{Accumulator, DateEdges, ParticipantStat};
use super::ranking::{DayCount, MostActiveBar, WordCount, most_active_bar};
use super::streak::{day_streak, sort_dates};
use super::time_bucket::TimeOfDayBar;
use crate::Message;
use crate::config::StatsConfig;
use crate::parser::parse_transcript;

/// Name of the single messages-per-day series.
pub const MESSAGES_SERIES: &str = "Messages";

/// One chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSeries {
    pub name: String,
    pub data: Vec<usize>,
}

/// A first and a last message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSpan {
    pub first: Message,
    pub last: Message,
}

/// The full statistics report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepStats {
    /// Messages in the input, system notices included.
    pub total_messages: usize,
    /// Distinct date tokens with at least one authored message.
    pub total_active_days: usize,
    /// Longest run of consecutive calendar days.
    pub max_days_streak: usize,
    /// Date tokens bounding the longest day run.
    pub streak_start: Option<String>,
    pub streak_end: Option<String>,
    /// First message on the run's first day and last message on its last day.
    pub streak_span: Option<MessageSpan>,
    /// First message of the earliest date and last message of the latest date.
    pub activity_span: Option<MessageSpan>,
    pub total_words: usize,
    pub total_media: usize,
    /// Authored messages per active day (0 when there are none).
    pub avg_messages_per_day: f64,
    pub participants: BTreeMap<String, ParticipantStat>,
    /// Messages per day, aligned with `graph_categories`.
    pub graph_series: Vec<GraphSeries>,
    /// Date tokens in calendar order.
    pub graph_categories: Vec<String>,
    pub time_of_day_bars: Vec<TimeOfDayBar>,
    pub hourly_histogram: [usize; 24],
    pub most_active_bar: Option<MostActiveBar>,
    pub most_said_word: Option<WordCount>,
    pub top_days: Vec<DayCount>,
}

impl DeepStats {
    /// The messages-per-day series.
    pub fn messages_per_day(&self) -> impl Iterator<Item = (&str, usize)> {
        let data = self
            .graph_series
            .iter()
            .find(|s| s.name == MESSAGES_SERIES)
            .map_or(&[][..], |s| s.data.as_slice());
        self.graph_categories
            .iter()
            .map(String::as_str)
            .zip(data.iter().copied())
    }

    /// Participant names, ordered by message count descending.
    pub fn participants_by_activity(&self) -> Vec<(&str, &ParticipantStat)> {
        let mut list: Vec<_> = self
            .participants
            .iter()
            .map(|(name, stat)| (name.as_str(), stat))
            .collect();
        list.sort_by(|a, b| b.1.msg_count.cmp(&a.1.msg_count).then_with(|| a.0.cmp(b.0)));
        list
    }
}

fn span_between(edges: &HashMap<String, DateEdges>, start: &str, end: &str) -> Option<MessageSpan> {
    Some(MessageSpan {
        first: edges.get(start)?.first.clone(),
        last: edges.get(end)?.last.clone(),
    })
}

pub(crate) fn assemble(acc: Accumulator) -> Option<DeepStats> {
    if acc.total_messages == 0 {
        return None;
    }

    let Accumulator {
        config,
        mut participants,
        word_counts,
        msgs_by_date,
        bars,
        streaks,
        date_edges,
        total_messages,
        system_messages,
        total_words,
        total_media,
        ..
    } = acc;

    let current = streaks.current();
    for (name, stat) in &mut participants {
        stat.longest_streak = streaks.longest(name);
        stat.current_streak = match current {
            Some((sender, len)) if sender == name.as_str() => len,
            _ => 0,
        };
        stat.finalize(&config);
    }

    let sorted = sort_dates(msgs_by_date.iter().map(|(date, _)| date), config.date_order);
    let graph_categories: Vec<String> = sorted.iter().map(|(date, _)| (*date).to_string()).collect();
    let data: Vec<usize> = sorted.iter().map(|(date, _)| msgs_by_date.get(date)).collect();

    let activity_span = match (sorted.first(), sorted.last()) {
        (Some((first, _)), Some((last, _))) => span_between(&date_edges, first, last),
        _ => None,
    };

    let streak = day_streak(msgs_by_date.iter().map(|(date, _)| date), config.date_order);
    let streak_span = match (&streak.start, &streak.end) {
        (Some(start), Some(end)) => span_between(&date_edges, start, end),
        _ => None,
    };

    let active_days = msgs_by_date.len();
    let authored = total_messages - system_messages;
    let avg_messages_per_day = if active_days == 0 {
        0.0
    } else {
        authored as f64 / active_days as f64
    };

    let most_active = most_active_bar(&bars);
    let (time_of_day_bars, hourly_histogram) = bars.into_parts();

    debug!(
        participants = participants.len(),
        active_days,
        max_days_streak = streak.length,
        "assembled report"
    );

    Some(DeepStats {
        total_messages,
        total_active_days: active_days,
        max_days_streak: streak.length,
        streak_start: streak.start,
        streak_end: streak.end,
        streak_span,
        activity_span,
        total_words,
        total_media,
        avg_messages_per_day,
        participants,
        graph_series: vec![GraphSeries {
            name: MESSAGES_SERIES.to_string(),
            data,
        }],
        graph_categories,
        time_of_day_bars,
        hourly_histogram,
        most_active_bar: most_active,
        most_said_word: word_counts.most_frequent().map(WordCount::from),
        top_days: msgs_by_date
            .top_n(config.top_n)
            .into_iter()
            .map(DayCount::from)
            .collect(),
    })
}

/// Computes the full report with default configuration.
///
/// Returns `None` when `messages` is empty.
///
/// # Example
///
/// ```rust
/// use chatstats::analysis::calculate_deep_stats;
/// use chatstats::parser::parse_transcript;
///
/// let messages = parse_transcript(
///     "1/2/23, 9:00 - Alice: hi\n1/2/23, 9:01 - Bob: hello\n1/2/23, 9:02 - Alice: <Media omitted>",
/// );
/// let stats = calculate_deep_stats(&messages).unwrap();
///
/// assert_eq!(stats.participants["Alice"].msg_count, 2);
/// assert_eq!(stats.participants["Alice"].media, 1);
/// assert_eq!(stats.participants["Bob"].msg_count, 1);
/// assert_eq!(stats.max_days_streak, 1);
///
/// assert!(calculate_deep_stats(&[]).is_none());
/// ```
pub fn calculate_deep_stats(messages: &[Message]) -> Option<DeepStats> {
    calculate_deep_stats_with(messages, &StatsConfig::default())
}

/// Computes the full report with a custom configuration.
pub fn calculate_deep_stats_with(messages: &[Message], config: &StatsConfig) -> Option<DeepStats> {
    let mut acc = Accumulator::with_config(config.clone());
    acc.extend(messages);
    acc.finish()
}

/// Reconstructs a transcript and computes its report in one call.
pub fn analyze(transcript: &str, config: &StatsConfig) -> (Vec<Message>, Option<DeepStats>) {
    let messages = parse_transcript(transcript);
    let stats = calculate_deep_stats_with(&messages, config);
    (messages, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateOrder;

    fn stats(text: &str) -> DeepStats {
        calculate_deep_stats(&parse_transcript(text)).unwrap()
    }

    #[test]
    fn test_graph_in_calendar_order() {
        let s = stats(
            "1/10/23, 9:00 - Alice: a\n\
             1/2/23, 9:00 - Alice: b\n\
             1/2/23, 9:05 - Bob: c\n\
             12/31/22, 9:00 - Bob: d",
        );
        assert_eq!(s.graph_categories, ["12/31/22", "1/2/23", "1/10/23"]);
        assert_eq!(s.graph_series[0].name, "Messages");
        assert_eq!(s.graph_series[0].data, [1, 2, 1]);

        let days: Vec<_> = s.messages_per_day().collect();
        assert_eq!(days[1], ("1/2/23", 2));
    }

    #[test]
    fn test_day_streak_bounds_and_span() {
        let s = stats(
            "1/1/23, 8:00 - Alice: start\n\
             1/1/23, 9:00 - Bob: second\n\
             1/2/23, 9:00 - Alice: middle\n\
             1/3/23, 9:00 - Bob: end one\n\
             1/3/23, 22:00 - Alice: end two\n\
             1/10/23, 9:00 - Bob: later",
        );
        assert_eq!(s.max_days_streak, 3);
        assert_eq!(s.streak_start.as_deref(), Some("1/1/23"));
        assert_eq!(s.streak_end.as_deref(), Some("1/3/23"));

        let span = s.streak_span.unwrap();
        assert_eq!(span.first.content, "start");
        assert_eq!(span.last.content, "end two");

        let activity = s.activity_span.unwrap();
        assert_eq!(activity.first.content, "start");
        assert_eq!(activity.last.content, "later");
    }

    #[test]
    fn test_global_totals() {
        let s = stats(
            "1/2/23, 9:00 - Alice: pizza tonight\n\
             1/2/23, 9:01 - Bob: pizza again\n\
             1/3/23, 9:02 - Bob: <Media omitted>\n\
             1/3/23, 9:03 - Alice joined",
        );
        assert_eq!(s.total_messages, 4);
        assert_eq!(s.total_words, 4);
        assert_eq!(s.total_media, 1);
        assert_eq!(s.total_active_days, 2);
        assert!((s.avg_messages_per_day - 1.5).abs() < f64::EPSILON);
        assert_eq!(
            s.most_said_word,
            Some(WordCount {
                word: "pizza".to_string(),
                count: 2
            })
        );
        assert_eq!(s.top_days[0].date, "1/2/23");
    }

    #[test]
    fn test_current_streak_only_for_final_run() {
        let s = stats(
            "1/2/23, 9:00 - Alice: a\n\
             1/2/23, 9:01 - Alice: b\n\
             1/2/23, 9:02 - Bob: c\n\
             1/2/23, 9:03 - Bob: d",
        );
        assert_eq!(s.participants["Alice"].longest_streak, 2);
        assert_eq!(s.participants["Alice"].current_streak, 0);
        assert_eq!(s.participants["Bob"].current_streak, 2);
    }

    #[test]
    fn test_most_active_bar_in_report() {
        let s = stats(
            "1/2/23, 21:00 - Alice: a\n\
             1/2/23, 22:00 - Bob: b\n\
             1/2/23, 23:00 - Bob: c\n\
             1/2/23, 9:00 - Alice: d",
        );
        let bar = s.most_active_bar.unwrap();
        assert_eq!(bar.label, "Evening");
        assert_eq!(bar.top_sender, "Bob");
        assert_eq!(bar.total, 3);
        assert_eq!(s.hourly_histogram[22], 1);
    }

    #[test]
    fn test_day_first_order() {
        let messages = parse_transcript(
            "1/2/23, 9:00 - Alice: a\n\
             2/2/23, 9:00 - Alice: b\n\
             3/2/23, 9:00 - Alice: c",
        );
        let month_first = calculate_deep_stats(&messages).unwrap();
        assert_eq!(month_first.max_days_streak, 1);

        let config = StatsConfig::new().with_date_order(DateOrder::DayFirst);
        let day_first = calculate_deep_stats_with(&messages, &config).unwrap();
        assert_eq!(day_first.max_days_streak, 3);
    }

    #[test]
    fn test_participants_by_activity() {
        let s = stats(
            "1/2/23, 9:00 - Bob: a\n\
             1/2/23, 9:01 - Alice: b\n\
             1/2/23, 9:02 - Alice: c",
        );
        let names: Vec<_> = s.participants_by_activity().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Alice", "Bob"]);
    }

    #[test]
    fn test_analyze() {
        let (messages, report) = analyze("", &StatsConfig::default());
        assert!(messages.is_empty());
        assert!(report.is_none());

        let (messages, report) = analyze("1/2/23, 9:00 - Alice: hi", &StatsConfig::default());
        assert_eq!(messages.len(), 1);
        assert_eq!(report.unwrap().participants.len(), 1);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let s = stats("1/2/23, 9:00 - Alice: hi 😂");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["maxDaysStreak"], 1);
        assert_eq!(json["participants"]["Alice"]["msgCount"], 1);
        assert_eq!(json["participants"]["Alice"]["yapLevel"], "Casual Chatter");
        assert_eq!(json["participants"]["Alice"]["emojiCounts"]["😂"], 1);
        assert_eq!(json["timeOfDayBars"][1]["label"], "Morning");
        assert!(json["participants"]["Alice"].get("wordCounts").is_none());
    }
}
