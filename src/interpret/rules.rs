//! Ordered intent rules. The first rule whose matcher returns entities wins.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;

use super::content::{note_content, reminder_content};
use super::time::extract_time;
use super::{Entities, Intent, USER_NAME_KEY};

/// An utterance with everything a matcher may look at.
pub(crate) struct Utterance<'a> {
    pub text: &'a str,
    /// ASCII-lowercased copy; byte offsets line up with `text`.
    pub lower: String,
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl<'a> Utterance<'a> {
    pub(crate) fn new(text: &'a str, now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { text, lower: text.to_ascii_lowercase(), now, offset }
    }
}

pub(crate) struct Rule {
    pub intent: Intent,
    pub matcher: fn(&Utterance<'_>) -> Option<Entities>,
}

pub(crate) const RULES: &[Rule] = &[
    Rule { intent: Intent::SetReminder, matcher: set_reminder },
    Rule { intent: Intent::AddNote, matcher: add_note },
    Rule { intent: Intent::StoreFact, matcher: store_fact },
    Rule { intent: Intent::QueryFact, matcher: query_fact },
    Rule { intent: Intent::Calculate, matcher: calculate },
    Rule { intent: Intent::GetTime, matcher: get_time },
    Rule { intent: Intent::OpenUrl, matcher: open_url },
];

static REMINDER_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:remind|reminder|alert|alarm)\b").expect("reminder keywords")
});
static NOTE_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:note|write|jot)\b").expect("note keywords"));
static NAME_IS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmy\s+name\s+is\b").expect("name statement"));
static NAME_QUERY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:what\s+is\s+my\s+name|what's\s+my\s+name|who\s+am\s+i)\b").expect("name query")
});
static ARITHMETIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s*[-+*/]\s*\d+").expect("arithmetic"));
static TIME_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:time|date)\b").expect("time keywords"));
static OPEN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bopen\s+(https?://\S+)").expect("open link"));
static OPEN_SEARCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bopen\s+(?:google|browser)\b").expect("open search"));

/// Page opened for `open google` / `open browser`.
pub(crate) const SEARCH_URL: &str = "https://google.com";

fn set_reminder(u: &Utterance<'_>) -> Option<Entities> {
    REMINDER_WORDS.is_match(u.text).then(|| Entities {
        content: Some(reminder_content(u.text)),
        time: extract_time(u.text, u.now, u.offset),
        ..Entities::default()
    })
}

fn add_note(u: &Utterance<'_>) -> Option<Entities> {
    NOTE_WORDS
        .is_match(u.text)
        .then(|| Entities { content: Some(note_content(u.text)), ..Entities::default() })
}

fn store_fact(u: &Utterance<'_>) -> Option<Entities> {
    let found = NAME_IS.find(&u.lower)?;
    let value = u.text[found.end()..]
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?'))
        .trim();
    if value.is_empty() {
        return None;
    }
    Some(Entities {
        key: Some(USER_NAME_KEY.to_string()),
        value: Some(value.to_string()),
        ..Entities::default()
    })
}

fn query_fact(u: &Utterance<'_>) -> Option<Entities> {
    NAME_QUERY
        .is_match(&u.lower)
        .then(|| Entities { key: Some(USER_NAME_KEY.to_string()), ..Entities::default() })
}

fn calculate(u: &Utterance<'_>) -> Option<Entities> {
    let found = ARITHMETIC.find(u.text)?;
    Some(Entities { expression: Some(found.as_str().to_string()), ..Entities::default() })
}

fn get_time(u: &Utterance<'_>) -> Option<Entities> {
    TIME_WORDS.is_match(u.text).then(Entities::default)
}

fn open_url(u: &Utterance<'_>) -> Option<Entities> {
    let url = if let Some(caps) = OPEN_LINK.captures(u.text) {
        caps[1].trim_end_matches(|c: char| matches!(c, '.' | ',' | '!' | '?')).to_string()
    } else if OPEN_SEARCH.is_match(u.text) {
        SEARCH_URL.to_string()
    } else {
        return None;
    };
    Some(Entities { url: Some(url), ..Entities::default() })
}
