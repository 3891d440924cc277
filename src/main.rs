//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatlens::cli::{Args, render_report};
use chatlens::config::ChatlensConfig;
use chatlens::core::stats_to_json;
use chatlens::format::write_records;
use chatlens::streaming::{MessageStream, StreamingConfig};
use chatlens::{Analyzer, ChatlensError, RecordSet};

fn main() {
    let args = <Args as ClapParser>::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(args.log_level().into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let config = match &args.config {
        Some(path) => ChatlensConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ChatlensConfig::default(),
    };
    let config = args.apply_overrides(config);
    config.analysis.validate()?;

    // Resolve the export format before doing any work
    let export = match (&args.export, args.export_format()) {
        (Some(path), Some(format)) => Some((path, format?)),
        _ => None,
    };

    let start = Instant::now();
    let records = if args.streaming {
        let streaming = StreamingConfig::new().with_parser_config(config.parser.clone());
        MessageStream::open_with(&args.input, &streaming)?.into_record_set()?
    } else {
        let bytes = std::fs::read(&args.input)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| ChatlensError::utf8(args.input.display().to_string(), e))?;
        RecordSet::parse_with(&text, &config.parser)
    };
    let report = records.parse_report();
    tracing::info!(
        messages = report.messages,
        dropped = report.dropped,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "parsed {}",
        args.input.display()
    );

    if args.list_senders {
        for sender in records.senders() {
            println!("{sender}");
        }
        return Ok(());
    }

    let analyzer = Analyzer::from_config(config);
    let stats = analyzer.analyze(&records, &args.scope())?;

    if let Some((path, format)) = export {
        write_records(records.messages(), path, format)?;
        eprintln!("💾 Exported {} records to {} ({})", records.len(), path.display(), format);
    }

    if args.json {
        println!("{}", stats_to_json(&stats)?);
    } else {
        print!("{}", render_report(&stats));
        if report.dropped > 0 {
            println!();
            println!("⚠️  Skipped {} lines with unreadable timestamps", report.dropped);
        }
    }

    Ok(())
}
