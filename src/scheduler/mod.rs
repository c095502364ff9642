//! Reminder scheduler.
//!
//! Polls the task store at a fixed interval and fires each due reminder at
//! most once. The store's `set_notified` is the commit point: a task fires
//! only when that call reports the false-to-true transition, and the sink is
//! invoked after the commit. Sink failures are logged and never retried.
//!
//! The scheduler also remembers what it fired while the due time is inside
//! the grace window, so a store that loses the `notified` write cannot make
//! the same reminder fire twice in one process.

mod due;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::ports::{Clock, Notification, Notifier, TaskStore};

pub use due::{check_due, DueState};

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Default grace window.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(300);
/// Default limit on a single sink delivery.
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Scheduler timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Time between polls.
    pub poll_interval: Duration,
    /// How long after its due time a reminder may still fire.
    pub grace: Duration,
    /// Upper bound on one sink delivery.
    pub notify_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            grace: DEFAULT_GRACE,
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }
}

/// What one poll did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    /// IDs of tasks that fired, in store order.
    pub fired: Vec<String>,
    /// Pending tasks whose time has not come.
    pub not_yet_due: usize,
    /// Pending tasks past the grace window. They are left untouched.
    pub missed: usize,
    /// Due tasks whose `set_notified` call failed; retried next poll.
    pub failed_commits: usize,
    /// Due tasks skipped because they were already notified or already fired.
    pub skipped: usize,
}

/// Fires due reminders from a [`TaskStore`] through a [`Notifier`].
pub struct ReminderScheduler {
    tasks: Arc<dyn TaskStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    /// Task ID to due time for everything fired by this instance.
    fired: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl ReminderScheduler {
    /// Creates a scheduler over the given ports.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: SchedulerConfig,
    ) -> Self {
        Self { tasks, notifier, clock, config, fired: Mutex::new(HashMap::new()) }
    }

    /// Timing in effect.
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    fn grace(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.config.grace).unwrap_or(chrono::Duration::MAX)
    }

    fn fired(&self) -> Result<MutexGuard<'_, HashMap<String, DateTime<Utc>>>, String> {
        self.fired.lock().map_err(|e| format!("scheduler state lock poisoned: {e}"))
    }

    /// Runs one poll: list pending tasks, commit and fire those that are due.
    ///
    /// # Errors
    ///
    /// Returns an error if the pending tasks cannot be listed. Failures on
    /// individual tasks are logged and counted in the report instead.
    pub async fn poll_once(&self) -> Result<PollReport, Box<dyn std::error::Error + Send + Sync>> {
        let pending = self.tasks.list_pending()?;
        let now = self.clock.now();
        let grace = self.grace();

        self.fired()?.retain(|_, due_at| now - *due_at <= grace);

        let mut report = PollReport::default();
        let mut seen = HashSet::new();
        for task in pending {
            if !seen.insert(task.id.clone()) {
                debug!("Task {} listed twice in one poll; ignoring the repeat", task.id);
                continue;
            }
            let due_at = match (check_due(&task, now, grace), task.due_at) {
                (DueState::Due, Some(due_at)) => due_at,
                (DueState::NotYetDue, _) => {
                    report.not_yet_due += 1;
                    continue;
                }
                (DueState::Missed, _) => {
                    debug!("Task {} missed its window (due {:?})", task.id, task.due_at);
                    report.missed += 1;
                    continue;
                }
                _ => continue,
            };

            let already_fired = self.fired()?.contains_key(&task.id);
            if already_fired {
                warn!(
                    "Task {} is still pending after firing; the store did not keep the notified flag",
                    task.id
                );
                report.skipped += 1;
                continue;
            }

            match self.tasks.set_notified(&task.id) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("Task {} was already notified", task.id);
                    report.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!("Could not mark task {} notified, will retry: {e}", task.id);
                    report.failed_commits += 1;
                    continue;
                }
            }
            self.fired()?.insert(task.id.clone(), due_at);

            info!("Firing reminder {} ({})", task.id, task.title);
            let notification = Notification {
                message: format!("Reminder: {}", task.title),
                task_id: task.id.clone(),
                title: task.title,
                due_at,
            };
            self.deliver(&notification).await;
            report.fired.push(task.id);
        }
        Ok(report)
    }

    async fn deliver(&self, notification: &Notification) {
        let timeout = self.config.notify_timeout;
        match tokio::time::timeout(timeout, self.notifier.notify(notification)).await {
            Ok(Ok(())) => debug!("Delivered reminder for task {}", notification.task_id),
            Ok(Err(e)) => {
                warn!("Reminder for task {} could not be delivered: {e}", notification.task_id);
            }
            Err(_) => warn!(
                "Reminder for task {} timed out after {}ms",
                notification.task_id,
                timeout.as_millis()
            ),
        }
    }

    /// Polls until `shutdown` becomes `true` or its sender is dropped.
    ///
    /// Polls never overlap; ticks missed while a poll runs are delayed
    /// rather than bunched. A failed poll is logged and the loop continues.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        // `interval` panics on a zero period.
        let period = self.config.poll_interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            "Reminder scheduler started (every {}ms, grace {}s)",
            period.as_millis(),
            self.config.grace.as_secs()
        );

        while !*shutdown.borrow() {
            tokio::select! {
                _ = ticker.tick() => match self.poll_once().await {
                    Ok(report) if !report.fired.is_empty() => {
                        debug!("Poll fired {} reminder(s)", report.fired.len());
                    }
                    Ok(_) => {}
                    Err(e) => error!("Reminder poll failed: {e}"),
                },
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        info!("Reminder scheduler stopped");
    }
}
