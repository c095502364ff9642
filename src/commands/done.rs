//! `jarvis done` command.

use crate::context::ServiceContext;

/// Execute the `done` command: set the completion flag of task `id`.
///
/// # Errors
///
/// Returns an error string if the task does not exist or cannot be updated.
pub fn run(ctx: &ServiceContext, id: &str, done: bool) -> Result<(), String> {
    let found = ctx.tasks.set_done(id, done).map_err(|e| format!("Failed to update task {id}: {e}"))?;
    if !found {
        return Err(format!("No task with ID {id}"));
    }
    if done {
        println!("Marked {id} done.");
    } else {
        println!("Reopened {id}.");
    }
    Ok(())
}
