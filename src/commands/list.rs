//! `jarvis list` command.

use chrono::FixedOffset;

use super::local_time;
use crate::context::ServiceContext;
use crate::ports::Task;

/// Execute the `list` command.
///
/// Shows open tasks, or every task with `all`, as a table of ID, due time,
/// status and title.
///
/// # Errors
///
/// Returns an error string if the tasks cannot be listed.
pub fn run(ctx: &ServiceContext, all: bool) -> Result<(), String> {
    let mut tasks = ctx.tasks.list_all().map_err(|e| format!("Failed to list tasks: {e}"))?;
    if !all {
        tasks.retain(|t| !t.done);
    }
    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }
    print!("{}", render(&tasks, ctx.config.utc_offset));
    println!("\n{} task(s).", tasks.len());
    Ok(())
}

fn status(task: &Task) -> &'static str {
    if task.done {
        "done"
    } else if task.notified {
        "notified"
    } else if task.due_at.is_some() {
        "pending"
    } else {
        "open"
    }
}

fn render(tasks: &[Task], offset: FixedOffset) -> String {
    let rows: Vec<(&str, String, &str, &str)> = tasks
        .iter()
        .map(|t| {
            let due = t.due_at.map_or_else(|| "-".to_string(), |d| local_time(d, offset));
            (t.id.as_str(), due, status(t), t.title.as_str())
        })
        .collect();

    let id_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(2).max(2);
    let due_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(3).max(3);
    let status_width = rows.iter().map(|r| r.2.len()).max().unwrap_or(6).max(6);

    let mut out = format!("{:<id_width$}  {:<due_width$}  {:<status_width$}  TITLE\n", "ID", "DUE", "STATUS");
    out.push_str(&format!("{:-<id_width$}  {:-<due_width$}  {:-<status_width$}  -----\n", "", "", ""));
    for (id, due, status, title) in &rows {
        out.push_str(&format!("{id:<id_width$}  {due:<due_width$}  {status:<status_width$}  {title}\n"));
    }
    out
}
