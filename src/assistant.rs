//! Turns a parsed command into an action on the ports and a reply.

use std::sync::Arc;

use chrono::FixedOffset;
use log::{debug, info};
use serde::Serialize;

use crate::calc;
use crate::interpret::{Intent, Interpreter, ParsedCommand, USER_NAME_KEY};
use crate::ports::{Clock, Notebook, Task, TaskStore};

/// Outcome of handling one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// Intent that was acted on.
    pub intent: Intent,
    /// Text to show or speak.
    pub message: String,
    /// Task created by a reminder, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}

impl Reply {
    fn text(intent: Intent, message: impl Into<String>) -> Self {
        Self { intent, message: message.into(), task: None }
    }
}

/// Interprets utterances and carries them out.
pub struct Assistant {
    interpreter: Interpreter,
    tasks: Arc<dyn TaskStore>,
    notebook: Arc<dyn Notebook>,
    clock: Arc<dyn Clock>,
}

impl Assistant {
    /// Creates an assistant over the given ports, reading clock times in `offset`.
    #[must_use]
    pub fn new(
        offset: FixedOffset,
        tasks: Arc<dyn TaskStore>,
        notebook: Arc<dyn Notebook>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { interpreter: Interpreter::new(offset), tasks, notebook, clock }
    }

    /// Interprets `text` at the current time.
    #[must_use]
    pub fn parse(&self, text: &str) -> ParsedCommand {
        self.interpreter.interpret(text, self.clock.now())
    }

    /// Interprets and executes `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if a store call fails.
    pub fn handle(&self, text: &str) -> Result<Reply, Box<dyn std::error::Error + Send + Sync>> {
        let command = self.parse(text);
        debug!("Interpreted {:?} as {}", command.original, command.intent);
        self.execute(&command)
    }

    /// Executes an already parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error if a store call fails.
    pub fn execute(
        &self,
        command: &ParsedCommand,
    ) -> Result<Reply, Box<dyn std::error::Error + Send + Sync>> {
        let entities = &command.entities;
        let offset = self.interpreter.offset();
        let reply = match command.intent {
            Intent::SetReminder => {
                let title = entities.content.as_deref().unwrap_or(&command.original);
                let task = self.tasks.create(title, entities.time)?;
                info!("Created task {} due {:?}", task.id, task.due_at);
                let message = match task.due_at {
                    Some(due) => format!(
                        "Added task for {}: {}",
                        due.with_timezone(&offset).format("%a %H:%M"),
                        task.title
                    ),
                    None => format!("Added task: {}", task.title),
                };
                Reply { intent: command.intent, message, task: Some(task) }
            }
            Intent::AddNote => {
                let content = entities.content.as_deref().unwrap_or(&command.original);
                let note = self.notebook.add_note(content)?;
                Reply::text(command.intent, format!("Noted: {}", note.content))
            }
            Intent::StoreFact => {
                let key = entities.key.as_deref().unwrap_or(USER_NAME_KEY);
                let value = entities.value.as_deref().unwrap_or_default();
                self.notebook.remember(key, value)?;
                Reply::text(command.intent, format!("Nice to meet you, {value}"))
            }
            Intent::QueryFact => {
                let key = entities.key.as_deref().unwrap_or(USER_NAME_KEY);
                let message = match self.notebook.recall(key)? {
                    Some(name) => format!("Your name is {name}"),
                    None => "I don't know your name yet".to_string(),
                };
                Reply::text(command.intent, message)
            }
            Intent::GetTime => {
                let now = self.clock.now().with_timezone(&offset);
                Reply::text(
                    command.intent,
                    format!("It is {} on {}", now.format("%H:%M"), now.format("%A, %B %-d, %Y")),
                )
            }
            Intent::Calculate => {
                let expression = entities.expression.as_deref().unwrap_or_default();
                let message = match calc::evaluate(expression) {
                    Ok(value) => format!("{expression} = {}", calc::format_number(value)),
                    Err(e) => {
                        debug!("Calculation of {expression:?} failed: {e}");
                        format!("I could not calculate {expression}")
                    }
                };
                Reply::text(command.intent, message)
            }
            Intent::OpenUrl => {
                let url = entities.url.as_deref().unwrap_or_default();
                Reply::text(command.intent, format!("Opening {url}"))
            }
            Intent::Unknown => Reply::text(
                command.intent,
                format!("Sorry, I didn't understand \"{}\"", command.original.trim()),
            ),
        };
        Ok(reply)
    }
}
