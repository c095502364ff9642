//! Command dispatch and handlers.

pub mod add;
pub mod done;
pub mod list;
pub mod notes;
pub mod parse;
pub mod rm;
pub mod say;
pub mod watch;

use chrono::{DateTime, FixedOffset, Utc};

use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::logging;

/// Dispatch a parsed command to its handler.
///
/// Reads the configuration from the environment, initialises logging and
/// builds a live [`ServiceContext`].
///
/// # Errors
///
/// Returns an error string if the configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::from_env()?;
    logging::init(&config.log);
    let ctx = ServiceContext::live(config);
    dispatch_with_context(command, &ctx)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Parse { text, json } => parse::run(ctx, &text.join(" "), *json),
        Command::Say { text } => say::run(ctx, &text.join(" ")),
        Command::Add { title, at } => add::run(ctx, &title.join(" "), at.as_deref()),
        Command::List { all } => list::run(ctx, *all),
        Command::Done { id, undo } => done::run(ctx, id, !*undo),
        Command::Rm { id } => rm::run(ctx, id),
        Command::Notes => notes::run(ctx),
        Command::Watch { once } => watch::run(ctx, *once),
    }
}

/// Formats a timestamp for terminal output in the configured offset.
pub(crate) fn local_time(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%Y-%m-%d %H:%M").to_string()
}
