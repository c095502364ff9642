//! `jarvis say` command.

use crate::context::ServiceContext;

/// Execute the `say` command: interpret `text`, act on it and print the reply.
///
/// # Errors
///
/// Returns an error string if the store or notebook call fails.
pub fn run(ctx: &ServiceContext, text: &str) -> Result<(), String> {
    let reply = ctx.assistant().handle(text).map_err(|e| format!("Failed to handle {text:?}: {e}"))?;
    println!("{}", reply.message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    #[test]
    fn say_creates_reminder() {
        let (ctx, _, _) = test_support::context();
        run(&ctx, "remind me to call mom at 5:00 pm").unwrap();
        let pending = ctx.tasks.list_pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "call mom");
    }

    #[test]
    fn say_remembers_facts() {
        let (ctx, _, _) = test_support::context();
        run(&ctx, "my name is Tony").unwrap();
        assert_eq!(ctx.notebook.recall("user_name").unwrap().as_deref(), Some("Tony"));
    }
}
