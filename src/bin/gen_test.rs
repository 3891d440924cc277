//! Synthetic WhatsApp transcript generator for stress testing chatlens.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [android|ios]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_chat.txt ios
//!
//! Timestamps are written day-first and move forward by a random gap, so the
//! output parses with the default configuration. Every few thousand messages a
//! garbage line or an impossible date is inserted to exercise recovery.

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::Rng;
use rand::seq::SliceRandom;

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Carol",
    "Dev Patel",
    "Иван",
    "村上",
    "محمد",
    "🔥FireUser🔥",
    "+91 98765 43210",
];

const EMOJIS: &[char] = &['😀', '😂', '🤣', '😍', '🥰', '🤔', '🙄', '🔥', '👍', '❤', '🎉', '🙏'];

const WORDS: &[&str] = &[
    "hello", "dinner", "tonight", "meeting", "train", "late", "weekend", "movie", "photos",
    "birthday", "cake", "office", "traffic", "coffee", "match", "tickets", "plan", "call",
    "kal", "acha", "theek", "hai", "bhai", "yaar",
];

const NOTICES: &[&str] = &[
    "Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them.",
    "Alice added Bob",
    "Carol left",
    "Bob changed the subject to \"Weekend plans\"",
    "Dev Patel joined using this group's invite link",
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Shape {
    Android,
    Ios,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_chat.txt");
    let shape = match args.get(3).map(|s| s.as_str()).unwrap_or("android") {
        "android" => Shape::Android,
        "ios" => Shape::Ios,
        other => {
            eprintln!("Unknown shape: {}. Use 'android' or 'ios'", other);
            std::process::exit(1);
        }
    };

    println!("🧪 Transcript Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Shape:    {}", if shape == Shape::Ios { "ios" } else { "android" });
    println!();

    generate(count, output, shape)
}

fn generate(count: usize, output: &str, shape: Shape) -> io::Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();
    let mut bytes_written: usize = 0;

    let mut ts = NaiveDate::from_ymd_opt(2022, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default();

    for i in 0..count {
        ts += Duration::seconds(rng.gen_range(5..3 * 3600));

        let line = if i % 50 == 0 {
            format!("{}{}\n", prefix(ts, shape), NOTICES[(i / 50) % NOTICES.len()])
        } else {
            let sender = SENDERS.choose(&mut rng).unwrap_or(&"Alice");
            format!("{}{}: {}\n", prefix(ts, shape), sender, body(&mut rng, i))
        };
        bytes_written += line.len();
        writer.write_all(line.as_bytes())?;

        // Occasionally insert lines the parser has to recover from
        if i % 5000 == 2500 {
            let garbage = garbage_line(&mut rng, shape);
            bytes_written += garbage.len();
            writer.write_all(garbage.as_bytes())?;
        }

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let mps = (i + 1) as f64 / elapsed;
            let mb = bytes_written as f64 / 1_000_000.0;
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                mb,
                mps
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} msg/s",
        count as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}

fn prefix(ts: NaiveDateTime, shape: Shape) -> String {
    let date = ts.format("%-d/%-m/%y");
    let (pm, hour12) = ts.hour12();
    let meridiem = if pm { "PM" } else { "AM" };
    match shape {
        Shape::Android => format!("{}, {}:{:02} {} - ", date, hour12, ts.minute(), meridiem),
        Shape::Ios => format!(
            "[{}, {}:{:02}:{:02}\u{202F}{}] ",
            date,
            hour12,
            ts.minute(),
            ts.second(),
            meridiem
        ),
    }
}

fn body(rng: &mut impl Rng, index: usize) -> String {
    match index % 20 {
        0..=9 => sentence(rng, 3..15),
        10 => format!("{} {}", sentence(rng, 2..6), emojis(rng, 1..4)),
        11 => emojis(rng, 5..30),
        12 => format!("look at this https://example.com/p/{} {}", index, sentence(rng, 1..4)),
        13 => "<Media omitted>".to_string(),
        14 => "This message was deleted".to_string(),
        // Multi-line message, including an empty line
        15 => format!("{}\n\n{}", sentence(rng, 2..8), sentence(rng, 2..8)),
        16 => format!("{}\n{}\n{}", sentence(rng, 1..4), sentence(rng, 1..4), sentence(rng, 1..4)),
        // Long message
        17 => sentence(rng, 200..400),
        18 => format!("Кириллица: Привет мир! #{}", index),
        _ => format!("Mixed: Hello नमस्ते 你好 🌍 #{}", index),
    }
}

fn sentence(rng: &mut impl Rng, words: std::ops::Range<usize>) -> String {
    let n = rng.gen_range(words);
    (0..n)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn emojis(rng: &mut impl Rng, count: std::ops::Range<usize>) -> String {
    let n = rng.gen_range(count);
    (0..n).filter_map(|_| EMOJIS.choose(rng).copied()).collect()
}

fn garbage_line(rng: &mut impl Rng, shape: Shape) -> String {
    match rng.gen_range(0..4) {
        // Impossible date, dropped by the parser
        0 if shape == Shape::Ios => "[31/2/23, 10:00:00 AM] Bob: this date does not exist\n".to_string(),
        0 => "31/2/23, 10:00 AM - Bob: this date does not exist\n".to_string(),
        1 => "[Invalid date format here] - : message\n".to_string(),
        2 => "-------------------------------------------\n".to_string(),
        _ => "\n".to_string(),
    }
}
