//! Content extraction: what remains of an utterance once the trigger words
//! and time phrases are removed.

use std::sync::LazyLock;

use regex::Regex;

static REMINDER_TRIGGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:please\s+)?(?:remind\s+me|alert\s+me|set\s+(?:an?\s+)?(?:reminder|alarm|alert))(?:\s+(?:to|that|about|for))?\b",
    )
    .expect("reminder trigger pattern")
});

static NOTE_TRIGGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:please\s+)?(?:(?:make|take)\s+a\s+note|note\s+down|note|jot\s+down|jot|write\s+down|write)(?:\s+(?:to|that))?\b\s*:?",
    )
    .expect("note trigger pattern")
});

static LEADING_CONNECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:to|that|about)\b").expect("connective pattern")
});

static TIME_PHRASES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(
            r"(?i)\bin\s+(?:\d+|an?|one)\s+(?:seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|weeks?)\b",
        )
        .expect("relative phrase pattern"),
        Regex::new(r"(?i)\bat\s+(?:noon|midnight|\d{1,2}(?::\d{2})?(?:\s*(?:am|pm))?)\b")
            .expect("clock phrase pattern"),
        Regex::new(
            r"(?i)\b(?:today|tonight|tomorrow|(?:(?:next|on|this)\s+)?(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b",
        )
        .expect("day phrase pattern"),
    ]
});

/// Title of a reminder: the input minus its trigger and any time phrase.
#[must_use]
pub fn reminder_content(text: &str) -> String {
    let mut residual = REMINDER_TRIGGER.replace_all(text, " ").into_owned();
    for phrase in TIME_PHRASES.iter() {
        residual = phrase.replace_all(&residual, " ").into_owned();
    }
    // "remind me tomorrow at 3pm to file taxes" leaves a dangling "to".
    finish(&LEADING_CONNECTIVE.replace(&residual, " "), text)
}

/// Body of a note: the input minus a leading note trigger.
#[must_use]
pub fn note_content(text: &str) -> String {
    finish(&NOTE_TRIGGER.replace(text, " "), text)
}

/// Collapses whitespace and trims; falls back to `original` if nothing is left.
fn finish(residual: &str, original: &str) -> String {
    let collapsed = residual.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '!' | '?' | ':'));
    if trimmed.is_empty() {
        original.to_string()
    } else {
        trimmed.to_string()
    }
}
