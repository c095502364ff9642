//! Notebook port for free-form notes and remembered facts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A free-form note captured by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Opaque identifier assigned by the notebook.
    pub id: String,
    /// The note text.
    pub content: String,
    /// When the note was captured.
    pub created_at: DateTime<Utc>,
}

/// Stores notes and key/value facts about the user.
pub trait Notebook: Send + Sync {
    /// Appends a note and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the note cannot be stored.
    fn add_note(&self, content: &str) -> Result<Note, Box<dyn std::error::Error + Send + Sync>>;

    /// Lists notes, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the notebook cannot be read.
    fn list_notes(&self) -> Result<Vec<Note>, Box<dyn std::error::Error + Send + Sync>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the fact cannot be stored.
    fn remember(&self, key: &str, value: &str)
        -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Looks up the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the notebook cannot be read.
    fn recall(&self, key: &str) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;
}
