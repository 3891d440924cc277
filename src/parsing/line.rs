//! Turning one logical unit into timestamp, sender and body.
//!
//! The remainder after the timestamp prefix is split on the first `": "`.
//! Without that separator the unit is a system notice such as
//! `Alice added Bob` and has no sender.

use chrono::NaiveDateTime;

use super::segment::LogicalUnit;
use super::timestamp::{PrefixMatcher, normalize};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::lexicon;

/// A unit split into its parts, before features are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Normalised timestamp
    pub timestamp: NaiveDateTime,
    /// Author, `None` for system notices
    pub sender: Option<String>,
    /// Cleaned message text
    pub body: String,
}

/// Parses logical units produced by the segmenter.
#[derive(Debug, Clone)]
pub struct LineParser {
    matcher: PrefixMatcher,
    config: ParserConfig,
}

impl LineParser {
    pub fn new(config: ParserConfig) -> Self {
        Self::with_matcher(PrefixMatcher::new(), config)
    }

    /// Reuses an already compiled prefix matcher.
    pub fn with_matcher(matcher: PrefixMatcher, config: ParserConfig) -> Self {
        Self { matcher, config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn matcher(&self) -> &PrefixMatcher {
        &self.matcher
    }

    /// Extracts timestamp, sender and body from `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedTimestamp`] if the first line has no
    /// timestamp prefix or the prefix names an impossible date or time.
    pub fn parse_unit(&self, unit: &LogicalUnit) -> Result<ParsedLine, ParseError> {
        let first = unit.first_line();
        let parts = self
            .matcher
            .split(first)
            .ok_or_else(|| ParseError::malformed(unit.line_number(), head(first)))?;

        let timestamp = normalize(parts.date, parts.time, self.config.date_order).ok_or_else(
            || ParseError::malformed(unit.line_number(), format!("{}, {}", parts.date, parts.time)),
        )?;

        let (sender, first_body) = self.split_sender(parts.rest);

        let body = if unit.continuation().is_empty() {
            lexicon::clean_text(first_body)
        } else {
            let mut joined = String::from(first_body);
            for line in unit.continuation() {
                joined.push('\n');
                joined.push_str(line);
            }
            lexicon::clean_text(&joined)
        };

        Ok(ParsedLine {
            timestamp,
            sender,
            body,
        })
    }

    fn split_sender<'a>(&self, rest: &'a str) -> (Option<String>, &'a str) {
        let split = rest
            .split_once(": ")
            .or_else(|| rest.strip_suffix(':').map(|name| (name, "")));

        let Some((name, body)) = split else {
            return (None, rest);
        };

        let sender = lexicon::clean_text(name);
        if sender.is_empty() {
            return (None, rest);
        }

        if self.config.detect_system_bodies
            && (lexicon::is_system_phrase(&sender) || lexicon::is_system_body(body))
        {
            tracing::debug!(sender = %sender, "reclassified system phrase as notice");
            return (None, rest);
        }

        (Some(sender), body)
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

// first few characters of a line, for error messages
fn head(line: &str) -> String {
    line.chars().take(40).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateOrder;
    use crate::parsing::Segments;
    use chrono::NaiveDate;

    fn parse(text: &str) -> Vec<Result<ParsedLine, ParseError>> {
        parse_with(text, ParserConfig::default())
    }

    fn parse_with(text: &str, config: ParserConfig) -> Vec<Result<ParsedLine, ParseError>> {
        let parser = LineParser::new(config);
        Segments::new(text.lines(), PrefixMatcher::new())
            .map(|unit| parser.parse_unit(&unit))
            .collect()
    }

    #[test]
    fn test_sender_and_body() {
        let parsed = parse("12/1/23, 10:15 AM - Alice: Hello world");
        let line = parsed[0].as_ref().unwrap();
        assert_eq!(
            line.timestamp,
            NaiveDate::from_ymd_opt(2023, 1, 12)
                .unwrap()
                .and_hms_opt(10, 15, 0)
                .unwrap()
        );
        assert_eq!(line.sender.as_deref(), Some("Alice"));
        assert_eq!(line.body, "Hello world");
    }

    #[test]
    fn test_split_on_first_colon_space() {
        let parsed = parse("12/1/23, 10:15 - Alice: note: bring snacks");
        let line = parsed[0].as_ref().unwrap();
        assert_eq!(line.sender.as_deref(), Some("Alice"));
        assert_eq!(line.body, "note: bring snacks");
    }

    #[test]
    fn test_notice_has_no_sender() {
        let parsed = parse("12/1/23, 10:15 - Alice added Bob");
        let line = parsed[0].as_ref().unwrap();
        assert_eq!(line.sender, None);
        assert_eq!(line.body, "Alice added Bob");
    }

    #[test]
    fn test_empty_body_after_colon() {
        let parsed = parse("12/1/23, 10:15 - Alice:");
        let line = parsed[0].as_ref().unwrap();
        assert_eq!(line.sender.as_deref(), Some("Alice"));
        assert_eq!(line.body, "");
    }

    #[test]
    fn test_multiline_body() {
        let parsed = parse("12/1/23, 10:15 - Alice: first\nsecond\nthird");
        let line = parsed[0].as_ref().unwrap();
        assert_eq!(line.body, "first\nsecond\nthird");
    }

    #[test]
    fn test_invisible_marks_are_stripped() {
        let parsed = parse("[1/2/24, 09:00:00] \u{202A}+1 555 0100\u{202C}: \u{200E}image omitted");
        let line = parsed[0].as_ref().unwrap();
        assert_eq!(line.sender.as_deref(), Some("+1 555 0100"));
        assert_eq!(line.body, "image omitted");
    }

    #[test]
    fn test_system_body_becomes_notice() {
        let text = "[1/2/24, 09:00:00] Family: Messages and calls are end-to-end encrypted. No one outside of this chat can read them.";
        let parsed = parse(text);
        assert_eq!(parsed[0].as_ref().unwrap().sender, None);

        let parsed = parse_with(text, ParserConfig::new().with_detect_system_bodies(false));
        assert_eq!(parsed[0].as_ref().unwrap().sender.as_deref(), Some("Family"));
    }

    #[test]
    fn test_system_phrase_inside_authored_body_keeps_sender() {
        let text = "\
12/1/23, 10:15 - Alice: I created group chats for both teams yesterday
12/1/23, 10:16 - Bob: ok I changed the subject line of the email
12/1/23, 10:17 - Carol: did you see security code changed for Dan?";
        let parsed = parse(text);
        let senders: Vec<_> = parsed
            .iter()
            .map(|p| p.as_ref().unwrap().sender.as_deref())
            .collect();
        assert_eq!(senders, vec![Some("Alice"), Some("Bob"), Some("Carol")]);
        assert_eq!(
            parsed[1].as_ref().unwrap().body,
            "ok I changed the subject line of the email"
        );
    }

    #[test]
    fn test_marked_ios_group_event_becomes_notice() {
        let parsed = parse("[1/2/24, 09:00:00] Trip: \u{200E}Alice created group \u{201C}Trip\u{201D}");
        let line = parsed[0].as_ref().unwrap();
        assert_eq!(line.sender, None);
        assert!(line.body.starts_with("Trip: Alice created group"));
    }

    #[test]
    fn test_system_phrase_in_sender_region() {
        let parsed = parse("12/1/23, 10:15 - Alice changed the subject to \"Plans: 2024\"");
        let line = parsed[0].as_ref().unwrap();
        assert_eq!(line.sender, None);
        assert!(line.body.starts_with("Alice changed the subject"));
    }

    #[test]
    fn test_impossible_date_is_malformed() {
        let parsed = parse("31/2/23, 10:15 - Alice: Hello");
        let err = parsed[0].as_ref().unwrap_err();
        assert_eq!(err.line(), 1);
        assert!(err.to_string().contains("31/2/23, 10:15"));
    }

    #[test]
    fn test_month_first() {
        let parsed = parse_with(
            "1/13/23, 10:15 - Alice: Hello",
            ParserConfig::new().with_date_order(DateOrder::MonthFirst),
        );
        let line = parsed[0].as_ref().unwrap();
        assert_eq!(line.timestamp.date(), NaiveDate::from_ymd_opt(2023, 1, 13).unwrap());
    }
}
