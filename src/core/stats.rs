//! The statistics bundle returned by an analysis.
//!
//! Every collection is in report order already: hours 0-23, weekdays Monday
//! to Sunday, months chronologically, rankings by count descending.

use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::filter::SenderFilter;

/// Messages sent during one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u32,
    pub count: usize,
}

/// Messages sent on one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCount {
    pub weekday: Weekday,
    pub count: usize,
}

/// Messages sent in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

impl MonthCount {
    /// `YYYY-MM`
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// A sender's share of the authored messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderShare {
    pub sender: String,
    pub count: usize,
    /// Percent of authored messages, one decimal place
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiCount {
    pub emoji: char,
    pub count: usize,
}

/// One of the longest messages, with its full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongMessage {
    pub sender: String,
    pub timestamp: NaiveDateTime,
    pub body: String,
    pub word_count: usize,
}

/// Aggregate statistics for one scope.
///
/// | Field | Overall view | Sender view |
/// |-------|--------------|-------------|
/// | `total_messages` | authored messages + notices | the sender's messages |
/// | `notice_count` | notices | 0 |
/// | timelines, words, emojis, longest | authored messages | the sender's messages |
/// | `top_senders` | filled | empty |
///
/// An empty scope yields zero counts, zero-filled hour and weekday timelines
/// and empty lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsBundle {
    pub scope: SenderFilter,
    pub total_messages: usize,
    pub total_words: usize,
    pub total_urls: usize,
    pub notice_count: usize,
    pub media_count: usize,
    pub deleted_count: usize,
    pub first_message: Option<NaiveDateTime>,
    pub last_message: Option<NaiveDateTime>,
    /// All 24 hours, zeros included
    pub hourly: Vec<HourCount>,
    /// Monday to Sunday, zeros included
    pub weekday: Vec<WeekdayCount>,
    /// Only months with activity
    pub monthly: Vec<MonthCount>,
    pub top_senders: Vec<SenderShare>,
    pub top_words: Vec<WordCount>,
    pub top_emojis: Vec<EmojiCount>,
    pub longest_messages: Vec<LongMessage>,
}

impl StatsBundle {
    /// A bundle with every count at zero.
    pub fn empty(scope: SenderFilter) -> Self {
        Self {
            scope,
            total_messages: 0,
            total_words: 0,
            total_urls: 0,
            notice_count: 0,
            media_count: 0,
            deleted_count: 0,
            first_message: None,
            last_message: None,
            hourly: (0..24).map(|hour| HourCount { hour, count: 0 }).collect(),
            weekday: WEEK
                .iter()
                .map(|&weekday| WeekdayCount { weekday, count: 0 })
                .collect(),
            monthly: Vec::new(),
            top_senders: Vec::new(),
            top_words: Vec::new(),
            top_emojis: Vec::new(),
            longest_messages: Vec::new(),
        }
    }

    /// Returns `true` if the scope contained no messages.
    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }

    /// Messages written by participants (total minus notices).
    pub fn authored_messages(&self) -> usize {
        self.total_messages - self.notice_count
    }

    /// The busiest hour, earliest on ties.
    pub fn busiest_hour(&self) -> Option<HourCount> {
        busiest(&self.hourly, |h| h.count)
    }

    /// The busiest weekday, earliest in the week on ties.
    pub fn busiest_weekday(&self) -> Option<WeekdayCount> {
        busiest(&self.weekday, |w| w.count)
    }

    /// The busiest month, earliest on ties.
    pub fn busiest_month(&self) -> Option<MonthCount> {
        busiest(&self.monthly, |m| m.count)
    }
}

pub(crate) const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn busiest<T: Copy>(items: &[T], count: impl Fn(&T) -> usize) -> Option<T> {
    let mut best: Option<T> = None;
    for item in items {
        let n = count(item);
        if n > 0 && best.as_ref().is_none_or(|b| n > count(b)) {
            best = Some(*item);
        }
    }
    best
}
