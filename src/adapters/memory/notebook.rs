//! In-memory notebook.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::ports::{Clock, Note, Notebook};

#[derive(Default)]
struct Pages {
    notes: Vec<Note>,
    facts: HashMap<String, String>,
}

/// Notebook kept in process memory.
pub struct MemoryNotebook {
    clock: Arc<dyn Clock>,
    pages: Mutex<Pages>,
}

impl MemoryNotebook {
    /// Creates an empty notebook stamping notes from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock, pages: Mutex::new(Pages::default()) }
    }
}

impl Notebook for MemoryNotebook {
    fn add_note(&self, content: &str) -> Result<Note, Box<dyn std::error::Error + Send + Sync>> {
        let mut pages = self.pages.lock().map_err(|e| format!("notebook lock poisoned: {e}"))?;
        let note = Note {
            id: format!("note-{}", pages.notes.len() + 1),
            content: content.trim().to_string(),
            created_at: self.clock.now(),
        };
        pages.notes.push(note.clone());
        Ok(note)
    }

    fn list_notes(&self) -> Result<Vec<Note>, Box<dyn std::error::Error + Send + Sync>> {
        let pages = self.pages.lock().map_err(|e| format!("notebook lock poisoned: {e}"))?;
        Ok(pages.notes.clone())
    }

    fn remember(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut pages = self.pages.lock().map_err(|e| format!("notebook lock poisoned: {e}"))?;
        pages.facts.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn recall(&self, key: &str) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let pages = self.pages.lock().map_err(|e| format!("notebook lock poisoned: {e}"))?;
        Ok(pages.facts.get(key).cloned())
    }
}
