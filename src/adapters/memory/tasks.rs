//! In-memory task store.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::ports::tasks::{normalize_title, sort_for_display};
use crate::ports::{Clock, Task, TaskStore};

/// Task store held in a `Mutex<Vec<Task>>`.
///
/// IDs are sequential (`task-1`, `task-2`, ...). The store can be taken
/// offline, after which every call fails, to exercise fallback and retry
/// paths.
pub struct MemoryTaskStore {
    clock: Arc<dyn Clock>,
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicU64,
    offline: AtomicBool,
}

type StoreResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

impl MemoryTaskStore {
    /// Creates an empty store stamping `created_at` from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            tasks: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            offline: AtomicBool::new(false),
        }
    }

    /// Makes every later call fail (`true`) or succeed again (`false`).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Vec<Task>>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err("memory task store is offline".into());
        }
        self.tasks.lock().map_err(|e| format!("task store lock poisoned: {e}").into())
    }
}

impl TaskStore for MemoryTaskStore {
    fn list_pending(&self) -> StoreResult<Vec<Task>> {
        let tasks = self.lock()?;
        Ok(tasks.iter().filter(|t| t.is_pending_reminder()).cloned().collect())
    }

    fn list_all(&self) -> StoreResult<Vec<Task>> {
        let mut tasks = self.lock()?.clone();
        sort_for_display(&mut tasks);
        Ok(tasks)
    }

    fn create(&self, title: &str, due_at: Option<DateTime<Utc>>) -> StoreResult<Task> {
        let title = normalize_title(title)?;
        let mut tasks = self.lock()?;
        let task = Task {
            id: format!("task-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            title,
            due_at,
            done: false,
            notified: false,
            created_at: self.clock.now(),
        };
        tasks.push(task.clone());
        Ok(task)
    }

    fn set_done(&self, id: &str, done: bool) -> StoreResult<bool> {
        let mut tasks = self.lock()?;
        Ok(tasks.iter_mut().find(|t| t.id == id).map(|t| t.done = done).is_some())
    }

    fn set_notified(&self, id: &str) -> StoreResult<bool> {
        let mut tasks = self.lock()?;
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) if !task.notified => {
                task.notified = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut tasks = self.lock()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::ManualClock;
    use chrono::{Duration, TimeZone};

    fn store() -> MemoryTaskStore {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap());
        MemoryTaskStore::new(Arc::new(clock))
    }

    #[test]
    fn create_assigns_sequential_ids_and_trims_title() {
        let store = store();
        let a = store.create("  buy milk ", None).unwrap();
        let b = store.create("call mom", None).unwrap();
        assert_eq!(a.id, "task-1");
        assert_eq!(b.id, "task-2");
        assert_eq!(a.title, "buy milk");
        assert!(!a.done && !a.notified);
    }

    #[test]
    fn create_rejects_blank_title() {
        assert!(store().create("  ", None).is_err());
    }

    #[test]
    fn pending_excludes_undated_done_and_notified() {
        let store = store();
        let due = Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap();
        let dated = store.create("dated", Some(due)).unwrap();
        store.create("undated", None).unwrap();
        let done = store.create("done", Some(due)).unwrap();
        let notified = store.create("notified", Some(due + Duration::hours(1))).unwrap();
        store.set_done(&done.id, true).unwrap();
        store.set_notified(&notified.id).unwrap();

        let pending = store.list_pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, dated.id);
    }

    #[test]
    fn set_notified_reports_only_the_first_transition() {
        let store = store();
        let task = store.create("x", Some(Utc::now())).unwrap();
        assert!(store.set_notified(&task.id).unwrap());
        assert!(!store.set_notified(&task.id).unwrap());
        assert!(!store.set_notified("missing").unwrap());
    }

    #[test]
    fn done_and_notified_are_independent() {
        let store = store();
        let task = store.create("x", Some(Utc::now())).unwrap();
        store.set_done(&task.id, true).unwrap();
        store.set_done(&task.id, false).unwrap();
        assert!(store.set_notified(&task.id).unwrap());
        store.set_done(&task.id, true).unwrap();

        let all = store.list_all().unwrap();
        assert!(all[0].done);
        assert!(all[0].notified);
    }

    #[test]
    fn delete_and_missing_ids() {
        let store = store();
        let task = store.create("x", None).unwrap();
        assert!(!store.set_done("missing", true).unwrap());
        assert!(store.delete(&task.id).unwrap());
        assert!(!store.delete(&task.id).unwrap());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn offline_store_fails_every_call() {
        let store = store();
        store.set_offline(true);
        assert!(store.list_pending().is_err());
        assert!(store.create("x", None).is_err());
        store.set_offline(false);
        assert!(store.create("x", None).is_ok());
    }
}
