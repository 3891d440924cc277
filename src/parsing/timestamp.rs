//! Timestamp prefix detection and normalisation.
//!
//! WhatsApp starts every message with a date and time whose shape depends on
//! the exporting phone:
//!
//! - Android: `12/1/23, 10:15 AM - Alice: Hello`
//! - iOS: `[12/01/2023, 10:15:30] Alice: Hello`
//!
//! [`PrefixMatcher`] recognises both shapes and splits a line into its date,
//! time and remainder. [`normalize`] turns the date and time into a
//! [`NaiveDateTime`], reading the first two date components in the configured
//! [`DateOrder`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::config::DateOrder;

// D/M/Y with `/`, `.` or `-` separators
const DATE: &str = r"\d{1,2}[./-]\d{1,2}[./-]\d{2,4}";

// H:MM[:SS] with an optional AM/PM marker, possibly after a (narrow) no-break space
const TIME: &str = r"\d{1,2}:\d{2}(?::\d{2})?(?:[\s\x{00A0}\x{202F}]*(?i:[ap]\.?\s?m\.?))?";

/// The pieces of a timestamp-prefixed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixParts<'a> {
    /// Date text, e.g. `12/1/23`
    pub date: &'a str,
    /// Time text, e.g. `10:15 AM`
    pub time: &'a str,
    /// Everything after the prefix delimiter
    pub rest: &'a str,
}

/// Recognises the timestamp prefix that opens a new message.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    regex: Regex,
}

impl PrefixMatcher {
    /// Compiles the prefix pattern.
    pub fn new() -> Self {
        let pattern = format!(
            r"^[\x{{FEFF}}\x{{200E}}\x{{200F}}]*(?:\[(?P<bdate>{DATE}),\s*(?P<btime>{TIME})\]\s*|(?P<date>{DATE}),\s*(?P<time>{TIME})\s*[-\x{{2013}}]\s?)(?P<rest>.*)$"
        );
        Self {
            regex: Regex::new(&pattern).expect("timestamp prefix pattern is valid"),
        }
    }

    /// Returns `true` if `line` starts a new message.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Splits a prefixed line into date, time and remainder.
    pub fn split<'a>(&self, line: &'a str) -> Option<PrefixParts<'a>> {
        let caps = self.regex.captures(line)?;
        let date = caps.name("bdate").or_else(|| caps.name("date"))?;
        let time = caps.name("btime").or_else(|| caps.name("time"))?;
        let rest = caps.name("rest").map_or("", |m| m.as_str());

        Some(PrefixParts {
            date: date.as_str(),
            time: time.as_str(),
            rest,
        })
    }
}

impl Default for PrefixMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a date and a time string into a timestamp.
///
/// - Dates are `D/M/YY` or `D/M/YYYY` (or month first, per `order`); any of
///   `/`, `.`, `-` separates the components. Two-digit years mean `2000 + YY`.
/// - Times are 24-hour `H:MM[:SS]`, or 12-hour with an `AM`/`PM` marker in
///   any case, optionally dotted (`p.m.`).
///
/// Returns `None` for impossible values such as `31/2/23` or `13:00 PM`.
///
/// ```
/// use chatlens::config::DateOrder;
/// use chatlens::parsing::normalize;
///
/// let ts = normalize("12/1/23", "10:15 PM", DateOrder::DayFirst).unwrap();
/// assert_eq!(ts.to_string(), "2023-01-12 22:15:00");
/// ```
pub fn normalize(date: &str, time: &str, order: DateOrder) -> Option<NaiveDateTime> {
    Some(NaiveDateTime::new(
        parse_date(date, order)?,
        parse_time(time)?,
    ))
}

fn parse_date(date: &str, order: DateOrder) -> Option<NaiveDate> {
    let mut parts = date.split(['/', '.', '-']);
    let first: u32 = parts.next()?.parse().ok()?;
    let second: u32 = parts.next()?.parse().ok()?;
    let year_str = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let year: i32 = match year_str.len() {
        2 => 2000 + year_str.parse::<i32>().ok()?,
        4 => year_str.parse().ok()?,
        _ => return None,
    };

    let (day, month) = match order {
        DateOrder::DayFirst => (first, second),
        DateOrder::MonthFirst => (second, first),
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_time(time: &str) -> Option<NaiveTime> {
    let split_at = time
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(time.len());
    let (clock, marker) = time.split_at(split_at);

    let meridiem: String = marker
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut fields = clock.trim().split(':');
    let hour: u32 = fields.next()?.parse().ok()?;
    let minute: u32 = fields.next()?.parse().ok()?;
    let second: u32 = match fields.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if fields.next().is_some() {
        return None;
    }

    let hour = match meridiem.as_str() {
        "" => hour,
        "am" | "pm" => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            let base = hour % 12;
            if meridiem == "pm" { base + 12 } else { base }
        }
        _ => return None,
    };

    NaiveTime::from_hms_opt(hour, minute, second)
}
