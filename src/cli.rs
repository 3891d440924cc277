//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`render_report`] - the human-readable statistics report
//!
//! Both live in the library so the report can be rendered from other front
//! ends and tested without spawning the binary.

use std::fmt::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{ChatlensConfig, DateOrder};
use crate::core::{SenderFilter, StatsBundle};
use crate::error::Result;
use crate::format::OutputFormat;

/// Activity statistics for exported WhatsApp chats.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens \"WhatsApp Chat with Family.txt\"
    chatlens chat.txt --user Alice
    chatlens chat.txt --json > stats.json
    chatlens chat.txt --export records.csv
    chatlens chat.txt --month-first --list-senders")]
pub struct Args {
    /// Path to the exported transcript (.txt)
    pub input: PathBuf,

    /// Restrict statistics to one sender ("Overall" for everyone)
    #[arg(short, long, value_name = "NAME", default_value = "Overall")]
    pub user: String,

    /// Print the statistics bundle as JSON instead of a text report
    #[arg(long)]
    pub json: bool,

    /// Also write the parsed records to this file
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Export format (default: from the export file extension)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Read dates as month/day/year
    #[arg(long)]
    pub month_first: bool,

    /// Keep authored lines that look like system messages as regular messages
    #[arg(long)]
    pub keep_system_bodies: bool,

    /// Number of top words to report
    #[arg(long, value_name = "N")]
    pub top_words: Option<usize>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the senders found in the transcript and exit
    #[arg(long)]
    pub list_senders: bool,

    /// Read the transcript line by line instead of loading it whole
    #[arg(long)]
    pub streaming: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The scope requested with `--user`.
    pub fn scope(&self) -> SenderFilter {
        SenderFilter::from(self.user.as_str())
    }

    /// Export format: `--format`, else the export path's extension.
    pub fn export_format(&self) -> Option<Result<OutputFormat>> {
        let path = self.export.as_ref()?;
        Some(match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_path(path),
        })
    }

    /// Log level implied by `-v` flags.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, mut config: ChatlensConfig) -> ChatlensConfig {
        if self.month_first {
            config.parser.date_order = DateOrder::MonthFirst;
        }
        if self.keep_system_bodies {
            config.parser.detect_system_bodies = false;
        }
        if let Some(n) = self.top_words {
            config.analysis.top_words = n;
        }
        config
    }
}

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const BAR_WIDTH: usize = 30;

/// Renders a statistics bundle as a plain-text report.
pub fn render_report(stats: &StatsBundle) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, stats);
    out
}

fn write_report(out: &mut String, stats: &StatsBundle) -> std::fmt::Result {
    writeln!(out, "📊 Chat statistics: {}", stats.scope)?;
    writeln!(out, "{RULE}")?;

    if stats.is_empty() {
        writeln!(out, "No messages in this scope.")?;
        return Ok(());
    }

    writeln!(out, "💬 Messages:  {}", stats.total_messages)?;
    writeln!(out, "📝 Words:     {}", stats.total_words)?;
    writeln!(out, "🔗 Links:     {}", stats.total_urls)?;
    writeln!(out, "🖼️  Media:     {}", stats.media_count)?;
    writeln!(out, "🗑️  Deleted:   {}", stats.deleted_count)?;
    if stats.scope.is_overall() {
        writeln!(out, "ℹ️  Notices:   {}", stats.notice_count)?;
    }
    if let (Some(first), Some(last)) = (stats.first_message, stats.last_message) {
        writeln!(
            out,
            "📅 Period:    {} to {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        )?;
    }

    if !stats.top_senders.is_empty() {
        writeln!(out)?;
        writeln!(out, "👥 Top senders:")?;
        for share in &stats.top_senders {
            writeln!(
                out,
                "   {:<20} {:>6}  ({:.1}%)",
                share.sender, share.count, share.percentage
            )?;
        }
    }

    let hour_max = stats.hourly.iter().map(|h| h.count).max().unwrap_or(0);
    writeln!(out)?;
    writeln!(out, "🕐 By hour:")?;
    for h in stats.hourly.iter().filter(|h| h.count > 0) {
        writeln!(out, "   {:02}:00  {:>6}  {}", h.hour, h.count, bar(h.count, hour_max))?;
    }

    let day_max = stats.weekday.iter().map(|d| d.count).max().unwrap_or(0);
    writeln!(out)?;
    writeln!(out, "📆 By weekday:")?;
    for d in &stats.weekday {
        writeln!(out, "   {}  {:>6}  {}", d.weekday, d.count, bar(d.count, day_max))?;
    }

    let month_max = stats.monthly.iter().map(|m| m.count).max().unwrap_or(0);
    writeln!(out)?;
    writeln!(out, "🗓️  By month:")?;
    for m in &stats.monthly {
        writeln!(out, "   {}  {:>6}  {}", m.label(), m.count, bar(m.count, month_max))?;
    }

    if !stats.top_words.is_empty() {
        writeln!(out)?;
        writeln!(out, "🔤 Top words:")?;
        for w in &stats.top_words {
            writeln!(out, "   {:<20} {:>6}", w.word, w.count)?;
        }
    }

    if !stats.top_emojis.is_empty() {
        writeln!(out)?;
        writeln!(out, "😀 Top emojis:")?;
        for e in &stats.top_emojis {
            writeln!(out, "   {}  {:>6}", e.emoji, e.count)?;
        }
    }

    if !stats.longest_messages.is_empty() {
        writeln!(out)?;
        writeln!(out, "📜 Longest messages:")?;
        for (i, m) in stats.longest_messages.iter().enumerate() {
            writeln!(
                out,
                "   {}. {} ({} words, {})",
                i + 1,
                m.sender,
                m.word_count,
                m.timestamp.format("%Y-%m-%d %H:%M")
            )?;
            for line in m.body.lines() {
                writeln!(out, "      {line}")?;
            }
        }
    }

    Ok(())
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["chatlens", "chat.txt"]).unwrap();
        assert_eq!(args.input, PathBuf::from("chat.txt"));
        assert!(args.scope().is_overall());
        assert!(args.export_format().is_none());
        assert_eq!(args.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_args_user_and_verbosity() {
        let args = Args::try_parse_from(["chatlens", "chat.txt", "-u", "Alice", "-vv"]).unwrap();
        assert_eq!(args.scope().sender_name(), Some("Alice"));
        assert_eq!(args.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_export_format_from_extension_or_flag() {
        let args = Args::try_parse_from(["chatlens", "c.txt", "-e", "out.jsonl"]).unwrap();
        assert_eq!(args.export_format().unwrap().unwrap(), OutputFormat::Jsonl);

        let args =
            Args::try_parse_from(["chatlens", "c.txt", "-e", "out.dat", "-f", "csv"]).unwrap();
        assert_eq!(args.export_format().unwrap().unwrap(), OutputFormat::Csv);

        let args = Args::try_parse_from(["chatlens", "c.txt", "-e", "out.dat"]).unwrap();
        assert!(args.export_format().unwrap().is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["chatlens", "c.txt", "-f", "xml"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "chatlens",
            "c.txt",
            "--month-first",
            "--keep-system-bodies",
            "--top-words",
            "3",
        ])
        .unwrap();
        let config = args.apply_overrides(ChatlensConfig::default());
        assert_eq!(config.parser.date_order, DateOrder::MonthFirst);
        assert!(!config.parser.detect_system_bodies);
        assert_eq!(config.analysis.top_words, 3);
    }

    #[test]
    fn test_render_report_sections() {
        let stats = analyze(
            "12/1/23, 10:15 AM - Alice: Hello world 😀\n12/1/23, 11:00 AM - Bob: Hi Alice",
            &SenderFilter::Overall,
        )
        .unwrap();
        let report = render_report(&stats);

        assert!(report.contains("Chat statistics: Overall"));
        assert!(report.contains("Messages:  2"));
        assert!(report.contains("Top senders"));
        assert!(report.contains("10:00"));
        assert!(report.contains("2023-01"));
        assert!(report.contains("😀"));
        assert!(report.contains("Longest messages"));
    }

    #[test]
    fn test_render_empty_report() {
        let stats = analyze("", &SenderFilter::Overall).unwrap();
        assert!(render_report(&stats).contains("No messages in this scope."));
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 0), "");
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(bar(1, 10).chars().count(), 3);
    }
}
