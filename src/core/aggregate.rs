//! The aggregation engine.
//!
//! [`aggregate`] makes one pass over the records of a scope and fills a
//! [`StatsBundle`]. It never fails: an empty scope produces the zero bundle.
//!
//! # Notices
//!
//! System notices (records without a sender) only count towards
//! `total_messages` and `notice_count` of the overall view. Timelines,
//! word/URL/emoji statistics, the longest messages and the sender ranking are
//! computed from authored messages.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::filter::SenderFilter;
use super::frequency::RankedCounter;
use super::stats::{
    EmojiCount, LongMessage, MonthCount, SenderShare, StatsBundle, WordCount,
};
use crate::config::AnalysisConfig;
use crate::lexicon::Lexicon;
use crate::message::{Message, MessageKind};

/// Computes the statistics of `scope` over `records`.
///
/// Records outside the scope are skipped, so the full record set can be
/// passed directly.
///
/// ```
/// use chatlens::config::AnalysisConfig;
/// use chatlens::core::{SenderFilter, aggregate};
/// use chatlens::RecordSet;
///
/// let records = RecordSet::parse("12/1/23, 10:15 AM - Alice: Hello world");
/// let stats = aggregate(records.iter(), &SenderFilter::Overall, &AnalysisConfig::default());
///
/// assert_eq!(stats.total_messages, 1);
/// assert_eq!(stats.total_words, 2);
/// assert_eq!(stats.top_senders[0].percentage, 100.0);
/// ```
pub fn aggregate<'a, I>(records: I, scope: &SenderFilter, config: &AnalysisConfig) -> StatsBundle
where
    I: IntoIterator<Item = &'a Message>,
{
    let lexicon = lexicon_for(config);
    let mut stats = StatsBundle::empty(scope.clone());

    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    let mut senders: RankedCounter<&'a str> = RankedCounter::new();
    let mut words: RankedCounter<String> = RankedCounter::new();
    let mut emojis: RankedCounter<char> = RankedCounter::new();
    let mut authored: Vec<&'a Message> = Vec::new();

    for msg in records.into_iter().filter(|m| scope.matches(m)) {
        stats.total_messages += 1;
        let ts = msg.timestamp;
        stats.first_message = Some(stats.first_message.map_or(ts, |t| t.min(ts)));
        stats.last_message = Some(stats.last_message.map_or(ts, |t| t.max(ts)));

        let Some(sender) = msg.sender() else {
            stats.notice_count += 1;
            continue;
        };

        match msg.kind {
            MessageKind::Media => stats.media_count += 1,
            MessageKind::Deleted => stats.deleted_count += 1,
            MessageKind::Text | MessageKind::Notice => {}
        }

        stats.total_words += msg.word_count;
        stats.total_urls += msg.url_count;

        stats.hourly[msg.hour() as usize].count += 1;
        stats.weekday[msg.weekday().num_days_from_monday() as usize].count += 1;
        *months.entry(msg.year_month()).or_default() += 1;

        senders.add(sender);
        emojis.extend(msg.emojis.iter().copied());

        if !msg.is_placeholder() {
            words.extend(
                lexicon
                    .tokenize(&msg.body)
                    .into_iter()
                    .filter(|w| w.chars().count() >= config.min_word_len && !lexicon.is_stopword(w)),
            );
        }

        authored.push(msg);
    }

    stats.monthly = months
        .into_iter()
        .map(|((year, month), count)| MonthCount { year, month, count })
        .collect();

    if scope.is_overall() {
        stats.top_senders = rank_senders(&senders, config.top_senders);
    }

    stats.top_words = words
        .top(config.top_words)
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();

    stats.top_emojis = emojis
        .top(config.top_emojis)
        .into_iter()
        .map(|(emoji, count)| EmojiCount { emoji, count })
        .collect();

    stats.longest_messages = longest(authored, config.longest_messages);

    tracing::debug!(
        scope = %stats.scope,
        messages = stats.total_messages,
        words = stats.total_words,
        "aggregated"
    );

    stats
}

fn lexicon_for(config: &AnalysisConfig) -> Cow<'static, Lexicon> {
    if config.extra_stopwords.is_empty() {
        Cow::Borrowed(Lexicon::shared())
    } else {
        Cow::Owned(Lexicon::with_extra_stopwords(&config.extra_stopwords))
    }
}

fn rank_senders(senders: &RankedCounter<&str>, n: usize) -> Vec<SenderShare> {
    let total = senders.total();
    senders
        .top(n)
        .into_iter()
        .map(|(sender, count)| SenderShare {
            sender: sender.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

// one decimal place
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

fn longest(mut authored: Vec<&Message>, n: usize) -> Vec<LongMessage> {
    // stable sort, so equal lengths stay in input order
    authored.sort_by(|a, b| {
        b.word_count
            .cmp(&a.word_count)
            .then_with(|| a.timestamp.cmp(&b.timestamp))
    });

    authored
        .into_iter()
        .take(n)
        .map(|msg| LongMessage {
            sender: msg.sender().unwrap_or_default().to_string(),
            timestamp: msg.timestamp,
            body: msg.body.clone(),
            word_count: msg.word_count,
        })
        .collect()
}
