//! `jarvis rm` command.

use crate::context::ServiceContext;

/// Execute the `rm` command: delete task `id`.
///
/// # Errors
///
/// Returns an error string if the task does not exist or cannot be deleted.
pub fn run(ctx: &ServiceContext, id: &str) -> Result<(), String> {
    let deleted = ctx.tasks.delete(id).map_err(|e| format!("Failed to delete task {id}: {e}"))?;
    if !deleted {
        return Err(format!("No task with ID {id}"));
    }
    println!("Deleted {id}.");
    Ok(())
}
