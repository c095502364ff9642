//! `jarvis notes` command.

use super::local_time;
use crate::context::ServiceContext;

/// Execute the `notes` command: print every note, oldest first.
///
/// # Errors
///
/// Returns an error string if the notebook cannot be read.
pub fn run(ctx: &ServiceContext) -> Result<(), String> {
    let notes = ctx.notebook.list_notes().map_err(|e| format!("Failed to list notes: {e}"))?;
    if notes.is_empty() {
        println!("No notes.");
        return Ok(());
    }
    for note in &notes {
        println!("{}  {}", local_time(note.created_at, ctx.config.utc_offset), note.content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    #[test]
    fn lists_notes() {
        let (ctx, _, _) = test_support::context();
        run(&ctx).unwrap();
        ctx.notebook.add_note("buy eggs").unwrap();
        run(&ctx).unwrap();
    }
}
