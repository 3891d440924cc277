//! Static reference data: stop words, emoji table, URL pattern and the
//! placeholder/system phrases WhatsApp writes into exports.
//!
//! Everything here is read-only. [`Lexicon::shared`] is built once on first use
//! and handed out as a `&'static` reference; a lexicon with extra stop words is
//! an independent value built with [`Lexicon::with_extra_stopwords`].

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Common English stop words.
const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "com", "could", "couldn", "did", "didn", "do", "does",
    "doesn", "doing", "don", "down", "during", "each", "else", "ever", "few", "for", "from",
    "further", "get", "had", "hadn", "has", "hasn", "have", "haven", "having", "he", "hence",
    "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "http", "https",
    "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "k", "let", "like", "ll",
    "me", "more", "most", "mustn", "my", "myself", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "r", "re", "same", "shall", "shan", "she", "should", "shouldn", "since", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "therefore",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve", "very",
    "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "won", "would", "wouldn", "www", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Chat filler and transliterated Hindi ("Hinglish") tokens.
const CHAT_STOPWORDS: &[&str] = &[
    "media", "omitted", "message", "messages", "deleted", "pm", "hai", "kya", "bhai", "bhi", "hum",
    "aur", "sir", "guys", "apni", "apne", "sath", "jo", "woh", "yeh", "kon", "kar", "karke",
    "kiya", "liye", "ko", "per", "pe", "nahi", "par", "one", "may", "must", "ask", "plz", "please",
    "aap", "mam", "b", "c", "msg", "whatsapp", "call",
];

/// Bodies WhatsApp writes in place of an attachment (matched on the whole lower-cased body).
const MEDIA_BODIES: &[&str] = &[
    "<media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "gif omitted",
    "document omitted",
    "contact card omitted",
];

const DELETED_BODIES: &[&str] = &[
    "this message was deleted",
    "you deleted this message",
];

/// Phrases that only ever appear in notices generated by WhatsApp itself.
const SYSTEM_PHRASES: &[&str] = &[
    "messages and calls are end-to-end encrypted",
    "created group",
    "created this group",
    "changed the subject",
    "changed the group name",
    "changed this group's icon",
    "changed the group description",
    "deleted this group's icon",
    "changed their phone number",
    "joined using this group's invite link",
    "security code changed",
    "your security code with",
    "turned on disappearing messages",
    "turned off disappearing messages",
    "you're now an admin",
];

/// Code point ranges treated as emoji, sorted and non-overlapping.
///
/// Skin tone modifiers (U+1F3FB..U+1F3FF), regional indicators, ZWJ and
/// variation selectors are left out: they decorate an emoji rather than
/// being one.
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x203C, 0x203C),
    (0x2049, 0x2049),
    (0x2194, 0x2199),
    (0x21A9, 0x21AA),
    (0x231A, 0x231B),
    (0x2328, 0x2328),
    (0x23CF, 0x23CF),
    (0x23E9, 0x23F3),
    (0x23F8, 0x23FA),
    (0x24C2, 0x24C2),
    (0x25AA, 0x25AB),
    (0x25B6, 0x25B6),
    (0x25C0, 0x25C0),
    (0x25FB, 0x25FE),
    (0x2600, 0x27BF),
    (0x2934, 0x2935),
    (0x2B05, 0x2B07),
    (0x2B1B, 0x2B1C),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
    (0x3030, 0x3030),
    (0x303D, 0x303D),
    (0x3297, 0x3297),
    (0x3299, 0x3299),
    (0x1F004, 0x1F004),
    (0x1F0CF, 0x1F0CF),
    (0x1F170, 0x1F1E5),
    (0x1F200, 0x1F251),
    (0x1F300, 0x1F3FA),
    (0x1F400, 0x1F64F),
    (0x1F680, 0x1F6FF),
    (0x1F7E0, 0x1F7F0),
    (0x1F900, 0x1F9FF),
    (0x1FA70, 0x1FAFF),
];

// http(s) and www links, plus lower-case bare domains that start a word.
// TLDs that double as English words only count when followed by a path.
const URL_PATTERN: &str = r"(?i:\bhttps?://\S+|\bwww\.\S+)|(?:^|\s)[a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)*\.(?:(?:com|org|net|io|edu|gov|dev|app|uk|info|biz)\b(?:/\S*)?|(?:in|co|me|ly|gl|be|us)/\S*)";

// iOS document attachments: `report.pdf • 3 pages document omitted` or `notes.txt document omitted`
const DOCUMENT_PATTERN: &str = r"^(?:.+ • \d+ pages?|\S+\.\w+) document omitted$";

const WORD_PATTERN: &str = r"\w+";

static SHARED: LazyLock<Lexicon> = LazyLock::new(Lexicon::new);

static DOCUMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DOCUMENT_PATTERN).expect("document pattern is valid"));

/// Stop words plus the compiled URL and word patterns.
#[derive(Debug, Clone)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    url: Regex,
    word: Regex,
}

impl Lexicon {
    /// Builds the default lexicon.
    ///
    /// Prefer [`Lexicon::shared`] unless you need a private copy.
    pub fn new() -> Self {
        let stopwords = ENGLISH_STOPWORDS
            .iter()
            .chain(CHAT_STOPWORDS)
            .map(|w| (*w).to_string())
            .collect();

        Self {
            stopwords,
            url: Regex::new(URL_PATTERN).expect("URL pattern is valid"),
            word: Regex::new(WORD_PATTERN).expect("word pattern is valid"),
        }
    }

    /// Returns the process-wide default lexicon.
    pub fn shared() -> &'static Lexicon {
        &SHARED
    }

    /// Returns a copy of the default lexicon with additional stop words.
    ///
    /// Extra words are lower-cased before insertion.
    pub fn with_extra_stopwords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::shared().clone();
        lexicon
            .stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        lexicon
    }

    /// Returns `true` if `word` (already lower-cased) is a stop word.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Number of stop words in the lexicon.
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Counts URL-like substrings in `text`.
    pub fn count_urls(&self, text: &str) -> usize {
        self.url.find_iter(text).count()
    }

    /// Lower-cases `text`, removes URLs and splits it into word tokens.
    ///
    /// Punctuation never survives: a token is a maximal run of word
    /// characters. Stop words are *not* removed here.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let without_urls = self.url.replace_all(text, " ");
        self.word
            .find_iter(&without_urls)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `true` if `c` is in the emoji table.
pub fn is_emoji(c: char) -> bool {
    let cp = u32::from(c);
    EMOJI_RANGES
        .binary_search_by(|&(start, end)| {
            if end < cp {
                std::cmp::Ordering::Less
            } else if start > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Emoji code points of `text` in order, duplicates preserved.
pub fn extract_emojis(text: &str) -> Vec<char> {
    text.chars().filter(|&c| is_emoji(c)).collect()
}

/// Returns `true` for the invisible direction and formatting marks WhatsApp
/// wraps around names and system lines.
pub fn is_invisible_mark(c: char) -> bool {
    matches!(
        c,
        '\u{200E}'
            | '\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
    )
}

/// Removes invisible marks and trims surrounding whitespace.
pub fn clean_text(text: &str) -> String {
    let stripped: String = text.chars().filter(|&c| !is_invisible_mark(c)).collect();
    stripped.trim().to_string()
}

fn normalize_phrase(body: &str) -> String {
    clean_text(body)
        .trim_end_matches('.')
        .replace('\u{2019}', "'")
        .to_lowercase()
}

/// Returns `true` if `body` is nothing but an attachment placeholder.
pub fn is_media_placeholder(body: &str) -> bool {
    let normalized = normalize_phrase(body);
    (normalized.starts_with("<attached:") && normalized.ends_with('>'))
        || MEDIA_BODIES.iter().any(|m| normalized == *m)
        || DOCUMENT.is_match(&normalized)
}

/// Returns `true` if `body` is a deleted-message placeholder.
pub fn is_deleted_placeholder(body: &str) -> bool {
    let normalized = normalize_phrase(body);
    DELETED_BODIES.iter().any(|d| normalized == *d)
}

/// Returns `true` if `text` contains a phrase only WhatsApp itself writes.
///
/// Meant for the sender region of a line, where a name never holds one of
/// these phrases. Use [`is_system_body`] for message bodies.
pub fn is_system_phrase(text: &str) -> bool {
    let normalized = normalize_phrase(text);
    SYSTEM_PHRASES.iter().any(|p| normalized.contains(p))
}

/// Returns `true` if an authored-looking body is really a system notice.
///
/// The body must open with a system phrase, unless it opens with the
/// left-to-right mark iOS puts in front of generated lines
/// (`Trip: \u{200E}Alice created group "Trip"`), in which case the phrase
/// may appear anywhere.
pub fn is_system_body(body: &str) -> bool {
    let marked = body.trim_start().starts_with('\u{200E}');
    let normalized = normalize_phrase(body);
    SYSTEM_PHRASES
        .iter()
        .any(|p| normalized.starts_with(p) || (marked && normalized.contains(p)))
}
