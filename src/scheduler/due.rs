//! Where a task stands relative to its reminder window.

use chrono::{DateTime, Duration, Utc};

use crate::ports::Task;

/// Classification of a pending task at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueState {
    /// The task has no reminder time.
    NoDueDate,
    /// The reminder time is still ahead.
    NotYetDue,
    /// `0 <= now - due_at <= grace`: the reminder should fire.
    Due,
    /// More than `grace` has passed since the reminder time.
    Missed,
}

/// Classifies `task` at `now`. Both ends of the window are inclusive.
#[must_use]
pub fn check_due(task: &Task, now: DateTime<Utc>, grace: Duration) -> DueState {
    let Some(due_at) = task.due_at else {
        return DueState::NoDueDate;
    };
    let elapsed = now - due_at;
    if elapsed < Duration::zero() {
        DueState::NotYetDue
    } else if elapsed <= grace {
        DueState::Due
    } else {
        DueState::Missed
    }
}
