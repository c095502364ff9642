//! Notebook persisted as `<root>/notebook.yaml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::ports::{unique_id, Clock, FileSystem, IdGenerator, Note, Notebook};

type StoreResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Default, Serialize, Deserialize)]
struct NotebookFile {
    #[serde(default)]
    notes: Vec<Note>,
    #[serde(default)]
    facts: BTreeMap<String, String>,
}

/// YAML-backed notebook. Mutations hold the filesystem lock on `notebook.yaml`.
pub struct FileNotebook {
    fs: Arc<dyn FileSystem>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileNotebook {
    /// Creates a notebook rooted at `root`.
    #[must_use]
    pub fn new(
        fs: Arc<dyn FileSystem>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        root: &Path,
    ) -> Self {
        Self { fs, ids, clock, path: root.join("notebook.yaml"), guard: Mutex::new(()) }
    }

    fn load(&self) -> StoreResult<NotebookFile> {
        if !self.fs.exists(&self.path) {
            return Ok(NotebookFile::default());
        }
        let contents = self.fs.read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(NotebookFile::default());
        }
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {e}", self.path.display()).into())
    }

    fn modify<T>(&self, change: impl FnOnce(&mut NotebookFile) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.guard.lock().map_err(|e| format!("notebook lock poisoned: {e}"))?;
        let _lock = self.fs.lock(&self.path)?;
        let mut file = self.load()?;
        let out = change(&mut file)?;
        let yaml = serde_yaml::to_string(&file)?;
        self.fs.write(&self.path, &yaml)?;
        Ok(out)
    }
}

impl Notebook for FileNotebook {
    fn add_note(&self, content: &str) -> StoreResult<Note> {
        self.modify(|file| {
            let id = unique_id(self.ids.as_ref(), |id| file.notes.iter().any(|n| n.id == id))?;
            let note = Note { id, content: content.trim().to_string(), created_at: self.clock.now() };
            file.notes.push(note.clone());
            Ok(note)
        })
    }

    fn list_notes(&self) -> StoreResult<Vec<Note>> {
        let _guard = self.guard.lock().map_err(|e| format!("notebook lock poisoned: {e}"))?;
        Ok(self.load()?.notes)
    }

    fn remember(&self, key: &str, value: &str) -> StoreResult<()> {
        self.modify(|file| {
            file.facts.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn recall(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self.guard.lock().map_err(|e| format!("notebook lock poisoned: {e}"))?;
        Ok(self.load()?.facts.remove(key))
    }
}
