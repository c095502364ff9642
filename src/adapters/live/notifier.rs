//! Live notification sinks.

use std::io::Write;
use std::sync::Arc;

use chrono::FixedOffset;
use log::debug;
use tokio::process::Command;

use crate::ports::notifier::{Notification, Notifier, NotifyFuture};

/// Prints reminders to stdout and rings the terminal bell.
pub struct ConsoleNotifier {
    offset: FixedOffset,
}

impl ConsoleNotifier {
    /// Creates a console sink that renders due times in `offset`.
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    fn render(&self, notification: &Notification) -> String {
        let due = notification.due_at.with_timezone(&self.offset);
        format!(
            "\u{7}⏰ {} (due {}) [{}]",
            notification.message,
            due.format("%H:%M"),
            notification.task_id
        )
    }
}

impl Notifier for ConsoleNotifier {
    fn notify<'a>(&'a self, notification: &'a Notification) -> NotifyFuture<'a> {
        Box::pin(async move {
            let line = self.render(notification);
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{line}")?;
            stdout.flush()?;
            Ok(())
        })
    }
}

/// Runs an external program for each reminder, e.g. `notify-send` or a
/// text-to-speech tool.
///
/// The reminder is passed through the environment (`JARVIS_REMINDER_MESSAGE`,
/// `JARVIS_REMINDER_TITLE`, `JARVIS_REMINDER_DUE`, `JARVIS_REMINDER_ID`),
/// never interpolated into a shell command line.
pub struct CommandNotifier {
    program: String,
    args: Vec<String>,
}

impl CommandNotifier {
    /// Creates a sink from a whitespace-separated command line.
    ///
    /// Returns `None` if `command_line` is blank.
    #[must_use]
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(String::from);
        let program = parts.next()?;
        Some(Self { program, args: parts.collect() })
    }
}

impl Notifier for CommandNotifier {
    fn notify<'a>(&'a self, notification: &'a Notification) -> NotifyFuture<'a> {
        Box::pin(async move {
            debug!("Running notify command {} for task {}", self.program, notification.task_id);
            let status = Command::new(&self.program)
                .args(&self.args)
                .env("JARVIS_REMINDER_MESSAGE", &notification.message)
                .env("JARVIS_REMINDER_TITLE", &notification.title)
                .env("JARVIS_REMINDER_DUE", notification.due_at.to_rfc3339())
                .env("JARVIS_REMINDER_ID", &notification.task_id)
                .kill_on_drop(true)
                .status()
                .await?;
            if status.success() {
                Ok(())
            } else {
                Err(format!("notify command {} exited with {status}", self.program).into())
            }
        })
    }
}

/// Delivers each reminder to several sinks in order.
///
/// Every sink is attempted even if an earlier one fails; failures are
/// joined into a single error.
pub struct FanoutNotifier {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    /// Creates a fan-out over `sinks`.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn Notifier>>) -> Self {
        Self { sinks }
    }
}

impl Notifier for FanoutNotifier {
    fn notify<'a>(&'a self, notification: &'a Notification) -> NotifyFuture<'a> {
        Box::pin(async move {
            let mut failures = Vec::new();
            for sink in &self.sinks {
                if let Err(e) = sink.notify(notification).await {
                    failures.push(e.to_string());
                }
            }
            if failures.is_empty() {
                Ok(())
            } else {
                Err(failures.join("; ").into())
            }
        })
    }
}
