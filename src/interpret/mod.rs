//! Command interpreter: raw text to an intent plus its entities.
//!
//! Interpretation is pure. The current time is an argument and the only
//! configuration is the UTC offset used to read clock times such as
//! `at 5:00 pm`. Classification walks a fixed rule table in priority order
//! (reminder, note, name statement, name query, arithmetic, time/date,
//! open) and falls through to [`Intent::Unknown`].

mod content;
mod rules;
pub mod time;

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

pub use content::{note_content, reminder_content};

/// Fact key used for the user's name.
pub const USER_NAME_KEY: &str = "user_name";

/// Closed set of things an utterance can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Create a task, usually with a due time.
    SetReminder,
    /// Append a note.
    AddNote,
    /// Store a fact about the user.
    StoreFact,
    /// Read back a stored fact.
    QueryFact,
    /// Report the current time and date.
    GetTime,
    /// Evaluate a two-operand expression.
    Calculate,
    /// Open a web page.
    OpenUrl,
    /// Nothing matched.
    Unknown,
}

impl Intent {
    /// Wire name, e.g. `SET_REMINDER`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SetReminder => "SET_REMINDER",
            Self::AddNote => "ADD_NOTE",
            Self::StoreFact => "STORE_FACT",
            Self::QueryFact => "QUERY_FACT",
            Self::GetTime => "GET_TIME",
            Self::Calculate => "CALCULATE",
            Self::OpenUrl => "OPEN_URL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values pulled out of an utterance. Only the fields the intent uses are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    /// Reminder title or note body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Absolute reminder time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    /// Fact key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Fact value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Arithmetic expression, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Page to open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Result of [`Interpreter::interpret`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// Classified intent.
    pub intent: Intent,
    /// Extracted entities.
    pub entities: Entities,
    /// The input exactly as given.
    pub original: String,
}

/// Stateless interpreter bound to a UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter {
    offset: FixedOffset,
}

impl Interpreter {
    /// Interpreter that reads clock times in `offset`.
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Offset clock times are read in.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Classifies `text` relative to `now`. Never fails; unrecognized input
    /// yields [`Intent::Unknown`] with empty entities.
    #[must_use]
    pub fn interpret(&self, text: &str, now: DateTime<Utc>) -> ParsedCommand {
        let utterance = rules::Utterance::new(text, now, self.offset);
        let (intent, entities) = rules::RULES
            .iter()
            .find_map(|rule| (rule.matcher)(&utterance).map(|entities| (rule.intent, entities)))
            .unwrap_or((Intent::Unknown, Entities::default()));
        ParsedCommand { intent, entities, original: text.to_string() }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

/// [`Interpreter::interpret`] with clock times read in UTC.
#[must_use]
pub fn interpret(text: &str, now: DateTime<Utc>) -> ParsedCommand {
    Interpreter::default().interpret(text, now)
}
