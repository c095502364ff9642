//! Task store that degrades to a secondary store when the primary fails.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::ports::tasks::sort_for_display;
use crate::ports::{Task, TaskStore};

type StoreResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Pairs a primary store with a secondary used while the primary fails.
///
/// Creates go to the primary and fall back to the secondary on error.
/// Reads merge both stores, so tasks written during an outage stay visible
/// (and keep firing) after the primary recovers. Updates by id try the
/// primary first and the secondary when the primary errors or has no such
/// task.
pub struct FallbackTaskStore {
    primary: Arc<dyn TaskStore>,
    secondary: Arc<dyn TaskStore>,
}

impl FallbackTaskStore {
    /// Pairs a primary store with the store used while it is unreachable.
    #[must_use]
    pub fn new(primary: Arc<dyn TaskStore>, secondary: Arc<dyn TaskStore>) -> Self {
        Self { primary, secondary }
    }

    fn gather(
        &self,
        operation: &str,
        call: impl Fn(&dyn TaskStore) -> StoreResult<Vec<Task>>,
    ) -> StoreResult<Vec<Task>> {
        match (call(self.primary.as_ref()), call(self.secondary.as_ref())) {
            (Ok(mut tasks), Ok(extra)) => {
                tasks.extend(extra);
                Ok(tasks)
            }
            (Ok(tasks), Err(e)) => {
                debug!("Fallback task store failed during {operation}: {e}");
                Ok(tasks)
            }
            (Err(e), Ok(tasks)) => {
                warn!("Primary task store failed during {operation}: {e}; using fallback store");
                Ok(tasks)
            }
            (Err(e), Err(_)) => Err(e),
        }
    }

    fn by_id(
        &self,
        operation: &str,
        call: impl Fn(&dyn TaskStore) -> StoreResult<bool>,
    ) -> StoreResult<bool> {
        match call(self.primary.as_ref()) {
            Ok(true) => Ok(true),
            Ok(false) => call(self.secondary.as_ref()).or_else(|e| {
                debug!("Fallback task store failed during {operation}: {e}");
                Ok(false)
            }),
            Err(e) => {
                warn!("Primary task store failed during {operation}: {e}; using fallback store");
                call(self.secondary.as_ref())
            }
        }
    }
}

impl TaskStore for FallbackTaskStore {
    fn list_pending(&self) -> StoreResult<Vec<Task>> {
        self.gather("list_pending", |s| s.list_pending())
    }

    fn list_all(&self) -> StoreResult<Vec<Task>> {
        let mut tasks = self.gather("list_all", |s| s.list_all())?;
        sort_for_display(&mut tasks);
        Ok(tasks)
    }

    fn create(&self, title: &str, due_at: Option<DateTime<Utc>>) -> StoreResult<Task> {
        match self.primary.create(title, due_at) {
            Ok(task) => Ok(task),
            Err(e) => {
                warn!("Primary task store failed during create: {e}; using fallback store");
                self.secondary.create(title, due_at)
            }
        }
    }

    fn set_done(&self, id: &str, done: bool) -> StoreResult<bool> {
        self.by_id("set_done", |s| s.set_done(id, done))
    }

    fn set_notified(&self, id: &str) -> StoreResult<bool> {
        self.by_id("set_notified", |s| s.set_notified(id))
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        self.by_id("delete", |s| s.delete(id))
    }
}
