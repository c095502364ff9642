//! `jarvis parse` command.

use std::fmt::Write as _;

use chrono::FixedOffset;

use super::local_time;
use crate::context::ServiceContext;
use crate::interpret::ParsedCommand;

/// Execute the `parse` command.
///
/// Prints the intent and entities extracted from `text` without touching
/// any store.
///
/// # Errors
///
/// Returns an error string if JSON serialization fails.
pub fn run(ctx: &ServiceContext, text: &str, json: bool) -> Result<(), String> {
    let parsed = ctx.assistant().parse(text);
    if json {
        let out = serde_json::to_string_pretty(&parsed)
            .map_err(|e| format!("Failed to serialize parsed command: {e}"))?;
        println!("{out}");
    } else {
        print!("{}", render(&parsed, ctx.config.utc_offset));
    }
    Ok(())
}

fn render(parsed: &ParsedCommand, offset: FixedOffset) -> String {
    let entities = &parsed.entities;
    let mut out = format!("Intent: {}\n", parsed.intent);
    let fields = [
        ("Content", entities.content.clone()),
        ("Time", entities.time.map(|t| local_time(t, offset))),
        ("Key", entities.key.clone()),
        ("Value", entities.value.clone()),
        ("Expression", entities.expression.clone()),
        ("URL", entities.url.clone()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    out
}
