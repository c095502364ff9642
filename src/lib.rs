//! Core library entry for the `jarvis` assistant.
//!
//! The two pieces with real logic are the [`interpret`] module, which turns
//! free text into an intent with entities, and the [`scheduler`], which
//! fires due reminders exactly once. Everything else wires them to storage
//! and the terminal through the traits in [`ports`].

pub mod adapters;
pub mod assistant;
pub mod calc;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod interpret;
pub mod logging;
pub mod ports;
pub mod scheduler;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
