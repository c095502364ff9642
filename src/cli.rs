//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `jarvis`.
#[derive(Debug, Parser)]
#[command(name = "jarvis", version, about = "Personal task and reminder assistant")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show how an utterance is interpreted, without acting on it.
    Parse {
        /// The utterance.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Print the parsed command as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Interpret an utterance and carry it out.
    Say {
        /// The utterance.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Add a task directly.
    Add {
        /// Task title.
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// Reminder time as RFC 3339, e.g. 2025-03-12T17:00:00+01:00.
        #[arg(long, value_name = "RFC3339")]
        at: Option<String>,
    },
    /// List tasks. Shows open tasks unless --all is given.
    List {
        /// Include completed tasks.
        #[arg(long)]
        all: bool,
    },
    /// Mark a task done.
    Done {
        /// Task ID.
        id: String,
        /// Mark the task open again.
        #[arg(long)]
        undo: bool,
    },
    /// Delete a task.
    Rm {
        /// Task ID.
        id: String,
    },
    /// List notes.
    Notes,
    /// Run the reminder scheduler until Ctrl-C.
    Watch {
        /// Poll once and exit.
        #[arg(long)]
        once: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_say_with_words() {
        let cli = Cli::parse_from(["jarvis", "say", "remind", "me", "to", "stretch"]);
        match cli.command {
            Command::Say { text } => assert_eq!(text.join(" "), "remind me to stretch"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_add_with_time() {
        let cli = Cli::parse_from(["jarvis", "add", "call", "mom", "--at", "2025-03-12T17:00:00Z"]);
        match cli.command {
            Command::Add { title, at } => {
                assert_eq!(title, vec!["call", "mom"]);
                assert_eq!(at.as_deref(), Some("2025-03-12T17:00:00Z"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_flags() {
        assert!(matches!(Cli::parse_from(["jarvis", "list", "--all"]).command, Command::List { all: true }));
        assert!(matches!(
            Cli::parse_from(["jarvis", "done", "abc", "--undo"]).command,
            Command::Done { undo: true, .. }
        ));
        assert!(matches!(Cli::parse_from(["jarvis", "watch", "--once"]).command, Command::Watch { once: true }));
        assert!(matches!(Cli::parse_from(["jarvis", "notes"]).command, Command::Notes));
    }

    #[test]
    fn say_requires_text() {
        assert!(Cli::try_parse_from(["jarvis", "say"]).is_err());
    }
}
