//! WhatsApp transcript line grammar.
//!
//! ```text
//! <header>      ::= <date> ", " <time> " - "
//! <date>        ::= digits "/" digits "/" digits   (1-2 / 1-2 / 2-4 digits)
//! <time>        ::= digits ":" digits               (1-2 : 2 digits)
//! <authored>    ::= <header> <sender> ": " <text>
//! <system-line> ::= <header> <text>
//! <continuation>::= any line not matching <header>
//! ```
//!
//! Date tokens are ambiguous (`1/2/23` is January 2nd in the US and
//! February 1st almost everywhere else), so every place that needs a
//! calendar date takes an explicit [`DateOrder`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Header pattern: `<date>, <time> - `.
pub const HEADER_PATTERN: &str = r"^([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}),\s([0-9]{1,2}:[0-9]{2})\s-\s";

/// Authored remainder pattern: `<sender>: <text>`.
pub const SENDER_PATTERN: &str = r"^([^:]+):\s(.*)$";

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(HEADER_PATTERN).expect("header pattern is a valid regex"));

static SENDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(SENDER_PATTERN).expect("sender pattern is a valid regex"));

/// The parts of a line that starts with a record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Date token, e.g. `1/2/23`.
    pub date: &'a str,
    /// Time token, e.g. `9:00`.
    pub time: &'a str,
    /// Everything after `" - "`.
    pub rest: &'a str,
}

/// Matches a record header at the start of `line`.
///
/// # Example
///
/// ```rust
/// use chatstats::parsing::match_header;
///
/// let header = match_header("1/2/23, 9:00 - Alice: hi").unwrap();
/// assert_eq!(header.date, "1/2/23");
/// assert_eq!(header.time, "9:00");
/// assert_eq!(header.rest, "Alice: hi");
///
/// assert!(match_header("just a wrapped line").is_none());
/// ```
pub fn match_header(line: &str) -> Option<HeaderMatch<'_>> {
    let caps = HEADER_RE.captures(line)?;
    let full = caps.get(0)?;
    Some(HeaderMatch {
        date: caps.get(1)?.as_str(),
        time: caps.get(2)?.as_str(),
        rest: &line[full.end()..],
    })
}

/// Splits a header remainder into `(sender, text)`.
///
/// Returns `None` for system lines: no colon at all, or a first colon that
/// isn't followed by whitespace.
pub fn split_sender(rest: &str) -> Option<(&str, &str)> {
    let caps = SENDER_RE.captures(rest)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Field order of a `a/b/yy` date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `M/D/YY` (US exports).
    #[default]
    MonthFirst,
    /// `D/M/YY`.
    DayFirst,
}

impl DateOrder {
    /// Returns all supported names.
    pub fn all_names() -> &'static [&'static str] {
        &["month-first", "mdy", "day-first", "dmy"]
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::MonthFirst => write!(f, "M/D/YY"),
            DateOrder::DayFirst => write!(f, "D/M/YY"),
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month-first" | "mdy" | "us" => Ok(DateOrder::MonthFirst),
            "day-first" | "dmy" | "eu" => Ok(DateOrder::DayFirst),
            _ => Err(format!(
                "Unknown date order: '{}'. Expected one of: {}",
                s,
                DateOrder::all_names().join(", ")
            )),
        }
    }
}

/// Interprets a transcript date token as a calendar date.
///
/// Two-digit years map to 2000-2099; longer years are taken literally.
/// Returns `None` for tokens that aren't three `/`-separated numbers or that
/// name an impossible day.
///
/// # Example
///
/// ```rust
/// use chatstats::parsing::{DateOrder, parse_date};
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date("1/10/23", DateOrder::MonthFirst), NaiveDate::from_ymd_opt(2023, 1, 10));
/// assert_eq!(parse_date("1/10/23", DateOrder::DayFirst), NaiveDate::from_ymd_opt(2023, 10, 1));
/// assert_eq!(parse_date("13/13/23", DateOrder::MonthFirst), None);
/// ```
pub fn parse_date(token: &str, order: DateOrder) -> Option<NaiveDate> {
    let mut parts = token.split('/');
    let first = parts.next()?;
    let second = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let first: u32 = first.parse().ok()?;
    let second: u32 = second.parse().ok()?;
    let year_num: i32 = year.parse().ok()?;
    let year_num = if year.len() <= 2 { 2000 + year_num } else { year_num };

    let (month, day) = match order {
        DateOrder::MonthFirst => (first, second),
        DateOrder::DayFirst => (second, first),
    };
    NaiveDate::from_ymd_opt(year_num, month, day)
}

/// Parses the hour of an `H:MM` time token. Hours outside `0..=23` are `None`.
pub fn parse_hour(time: &str) -> Option<u32> {
    let hour: u32 = time.split(':').next()?.parse().ok()?;
    (hour < 24).then_some(hour)
}
