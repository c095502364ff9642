//! `jarvis add` command.

use chrono::{DateTime, Utc};

use super::local_time;
use crate::context::ServiceContext;

/// Execute the `add` command.
///
/// `at`, when given, must be an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns an error string if `at` does not parse, the title is blank, or
/// the task cannot be stored.
pub fn run(ctx: &ServiceContext, title: &str, at: Option<&str>) -> Result<(), String> {
    let due_at = at.map(parse_due).transpose()?;
    let task = ctx.tasks.create(title, due_at).map_err(|e| format!("Failed to add task: {e}"))?;
    match task.due_at {
        Some(due) => {
            println!("Added task {}: {} (due {})", task.id, task.title, local_time(due, ctx.config.utc_offset));
        }
        None => println!("Added task {}: {}", task.id, task.title),
    }
    Ok(())
}

fn parse_due(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("Invalid --at value {raw:?} (expected RFC 3339): {e}"))
}
