//! Task store port.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored task, optionally carrying a reminder time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// Human-readable description. Never empty.
    pub title: String,
    /// When the reminder is due. `None` means the task has no reminder.
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    /// Completion flag, owned by the user.
    #[serde(default)]
    pub done: bool,
    /// Set once by the scheduler when the reminder fires. Never reverts.
    #[serde(default)]
    pub notified: bool,
    /// When the store created the task.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Returns `true` if the scheduler should consider this task.
    #[must_use]
    pub fn is_pending_reminder(&self) -> bool {
        !self.done && !self.notified && self.due_at.is_some()
    }
}

/// Persists tasks.
///
/// `set_notified` is the scheduler's commit point and must be atomic and
/// idempotent: only the call that flips the flag reports `true`.
pub trait TaskStore: Send + Sync {
    /// Lists tasks with `done = false`, `notified = false` and a due time.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_pending(&self) -> Result<Vec<Task>, Box<dyn std::error::Error + Send + Sync>>;

    /// Lists every task, open ones first, newest first within each group.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_all(&self) -> Result<Vec<Task>, Box<dyn std::error::Error + Send + Sync>>;

    /// Creates a task and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if `title` is blank or the task cannot be stored.
    fn create(
        &self,
        title: &str,
        due_at: Option<DateTime<Utc>>,
    ) -> Result<Task, Box<dyn std::error::Error + Send + Sync>>;

    /// Sets the completion flag. Returns `false` if no such task exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be updated.
    fn set_done(
        &self,
        id: &str,
        done: bool,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// Marks a task notified.
    ///
    /// Returns `true` only if this call changed the flag from `false` to
    /// `true`; an already-notified or missing task yields `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be updated.
    fn set_notified(&self, id: &str) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// Deletes a task. Returns `false` if no such task exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be updated.
    fn delete(&self, id: &str) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}

/// Trims a task title, rejecting blank ones.
pub(crate) fn normalize_title(
    title: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Title is required".into());
    }
    Ok(trimmed.to_string())
}

/// Orders tasks for display: open before done, then newest first.
pub(crate) fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| a.done.cmp(&b.done).then(b.created_at.cmp(&a.created_at)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(id: &str, done: bool, notified: bool, due: bool) -> Task {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        Task {
            id: id.into(),
            title: format!("task {id}"),
            due_at: due.then_some(at),
            done,
            notified,
            created_at: at,
        }
    }

    #[test]
    fn pending_reminder_requires_due_time_and_both_flags_clear() {
        assert!(task("a", false, false, true).is_pending_reminder());
        assert!(!task("b", false, false, false).is_pending_reminder());
        assert!(!task("c", true, false, true).is_pending_reminder());
        assert!(!task("d", false, true, true).is_pending_reminder());
    }

    #[test]
    fn display_order_puts_open_tasks_first() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut tasks = vec![
            Task { created_at: base, ..task("old-open", false, false, false) },
            Task { created_at: base + chrono::Duration::hours(2), ..task("done", true, false, false) },
            Task { created_at: base + chrono::Duration::hours(1), ..task("new-open", false, false, false) },
        ];
        sort_for_display(&mut tasks);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["new-open", "old-open", "done"]);
    }

    #[test]
    fn blank_titles_are_rejected() {
        assert!(normalize_title("   ").is_err());
        assert_eq!(normalize_title("  call mom ").unwrap(), "call mom");
    }

    #[test]
    fn deserializes_without_optional_flags() {
        let yaml = "id: t1\ntitle: call mom\ncreated_at: 2025-01-01T00:00:00Z\n";
        let task: Task = serde_yaml::from_str(yaml).unwrap();
        assert!(task.due_at.is_none());
        assert!(!task.done);
        assert!(!task.notified);
    }
}
