//! Splitting raw transcript lines into logical message units.
//!
//! A line that starts with a timestamp prefix opens a new unit; any other line
//! continues the unit that is currently open. Lines seen before the first
//! prefixed line belong to no message and are discarded.
//!
//! [`Segmenter`] is a push-based state machine so the same code serves the
//! in-memory path ([`Segments`], an iterator adapter over `str::lines`) and the
//! streaming path (fed from a `BufRead`).

use super::timestamp::PrefixMatcher;

/// One reconstructed message, possibly spanning several raw lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalUnit {
    line: usize,
    lines: Vec<String>,
}

impl LogicalUnit {
    fn open(line: usize, first: &str) -> Self {
        Self {
            line,
            lines: vec![first.to_string()],
        }
    }

    /// 1-based line number of the prefixed line that opened this unit.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// The prefixed line.
    pub fn first_line(&self) -> &str {
        &self.lines[0]
    }

    /// Lines that followed the prefixed line, in order.
    pub fn continuation(&self) -> &[String] {
        &self.lines[1..]
    }

    /// Number of raw lines in the unit.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All raw lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Push-based segmenter.
///
/// Feed lines with [`push_line`](Segmenter::push_line); a completed unit is
/// returned when the next prefixed line arrives. Call
/// [`finish`](Segmenter::finish) at end of input to flush the last unit.
#[derive(Debug, Clone)]
pub struct Segmenter {
    matcher: PrefixMatcher,
    current: Option<LogicalUnit>,
    lines_seen: usize,
    orphan_lines: usize,
}

impl Segmenter {
    pub fn new(matcher: PrefixMatcher) -> Self {
        Self {
            matcher,
            current: None,
            lines_seen: 0,
            orphan_lines: 0,
        }
    }

    /// Consumes one raw line. Returns the previous unit if this line opens a new one.
    pub fn push_line(&mut self, line: &str) -> Option<LogicalUnit> {
        self.lines_seen += 1;
        let line = line.strip_suffix('\r').unwrap_or(line);

        if self.matcher.is_match(line) {
            return self
                .current
                .replace(LogicalUnit::open(self.lines_seen, line));
        }

        match self.current.as_mut() {
            Some(unit) => unit.lines.push(line.to_string()),
            None => self.orphan_lines += 1,
        }
        None
    }

    /// Flushes the unit still open at end of input.
    pub fn finish(&mut self) -> Option<LogicalUnit> {
        self.current.take()
    }

    /// Raw lines consumed so far.
    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    /// Lines discarded because no message had started yet.
    pub fn orphan_lines(&self) -> usize {
        self.orphan_lines
    }
}

/// Lazy, single-pass iterator of [`LogicalUnit`]s over a line source.
///
/// ```
/// use chatlens::parsing::{PrefixMatcher, Segments};
///
/// let text = "1/2/23, 10:00 - Alice: first line\nsecond line\n1/2/23, 10:01 - Bob: hi";
/// let units: Vec<_> = Segments::new(text.lines(), PrefixMatcher::new()).collect();
///
/// assert_eq!(units.len(), 2);
/// assert_eq!(units[0].continuation(), ["second line"]);
/// ```
#[derive(Debug)]
pub struct Segments<I> {
    lines: I,
    segmenter: Segmenter,
    exhausted: bool,
}

impl<I> Segments<I> {
    pub fn new(lines: I, matcher: PrefixMatcher) -> Self {
        Self {
            lines,
            segmenter: Segmenter::new(matcher),
            exhausted: false,
        }
    }

    /// Raw lines consumed so far.
    pub fn lines_seen(&self) -> usize {
        self.segmenter.lines_seen()
    }

    /// Lines discarded because no message had started yet.
    pub fn orphan_lines(&self) -> usize {
        self.segmenter.orphan_lines()
    }
}

impl<I, S> Iterator for Segments<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = LogicalUnit;

    fn next(&mut self) -> Option<LogicalUnit> {
        if self.exhausted {
            return None;
        }

        for line in self.lines.by_ref() {
            if let Some(unit) = self.segmenter.push_line(line.as_ref()) {
                return Some(unit);
            }
        }

        self.exhausted = true;
        self.segmenter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Vec<LogicalUnit> {
        Segments::new(text.lines(), PrefixMatcher::new()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_one_unit_per_prefixed_line() {
        let units = segment(
            "12/1/23, 10:15 AM - Alice: Hello\n12/1/23, 10:16 AM - Bob: Hi\n12/1/23, 10:17 AM - Alice: Bye",
        );
        assert_eq!(units.len(), 3);
        assert_eq!(units[1].first_line(), "12/1/23, 10:16 AM - Bob: Hi");
        assert_eq!(units[2].line_number(), 3);
    }

    #[test]
    fn test_continuation_lines_attach_to_open_unit() {
        let units = segment("12/1/23, 10:15 - Alice: line one\nline two\n\nline four");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].line_count(), 4);
        assert_eq!(units[0].continuation(), ["line two", "", "line four"]);
        assert_eq!(
            units[0].text(),
            "12/1/23, 10:15 - Alice: line one\nline two\n\nline four"
        );
    }

    #[test]
    fn test_leading_orphans_are_discarded() {
        let mut segments = Segments::new(
            "header junk\nmore junk\n12/1/23, 10:15 - Alice: Hello".lines(),
            PrefixMatcher::new(),
        );
        let units: Vec<_> = segments.by_ref().collect();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].line_number(), 3);
        assert_eq!(segments.orphan_lines(), 2);
        assert_eq!(segments.lines_seen(), 3);
    }

    #[test]
    fn test_crlf_is_stripped() {
        let mut segmenter = Segmenter::new(PrefixMatcher::new());
        assert!(segmenter.push_line("12/1/23, 10:15 - Alice: Hello\r").is_none());
        assert!(segmenter.push_line("world\r").is_none());
        let unit = segmenter.finish().unwrap();
        assert_eq!(unit.text(), "12/1/23, 10:15 - Alice: Hello\nworld");
        assert!(segmenter.finish().is_none());
    }

    #[test]
    fn test_iterator_is_fused_after_exhaustion() {
        let mut segments = Segments::new(
            "12/1/23, 10:15 - Alice: Hello".lines(),
            PrefixMatcher::new(),
        );
        assert!(segments.next().is_some());
        assert!(segments.next().is_none());
        assert!(segments.next().is_none());
    }
}
