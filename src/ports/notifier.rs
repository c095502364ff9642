//! Notification sink port.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`Notifier`] to keep the trait dyn-compatible.
pub type NotifyFuture<'a> =
    Pin<Box<dyn Future<Output = Result<(), Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// A reminder alert handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The spoken/displayed message, e.g. `Reminder: call mom`.
    pub message: String,
    /// ID of the task that fired.
    pub task_id: String,
    /// Title of the task that fired.
    pub title: String,
    /// The task's due time.
    pub due_at: DateTime<Utc>,
}

/// Delivers reminder alerts (audio, popup, terminal, ...).
///
/// Delivery is best-effort: the scheduler logs and discards errors.
pub trait Notifier: Send + Sync {
    /// Delivers one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be delivered.
    fn notify<'a>(&'a self, notification: &'a Notification) -> NotifyFuture<'a>;
}
