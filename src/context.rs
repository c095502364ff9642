//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::adapters::fallback::FallbackTaskStore;
use crate::adapters::file::{FileNotebook, FileTaskStore};
use crate::adapters::live::{
    CommandNotifier, ConsoleNotifier, FanoutNotifier, LiveClock, LiveFileSystem, LiveIdGenerator,
};
use crate::adapters::memory::{MemoryNotebook, MemoryTaskStore};
use crate::assistant::Assistant;
use crate::config::Config;
use crate::ports::{Clock, FileSystem, IdGenerator, Notebook, Notifier, TaskStore};
use crate::scheduler::ReminderScheduler;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire
/// up different adapter implementations (live, in-memory).
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Arc<dyn Clock>,
    /// Task storage.
    pub tasks: Arc<dyn TaskStore>,
    /// Notes and facts.
    pub notebook: Arc<dyn Notebook>,
    /// Where reminders are delivered.
    pub notifier: Arc<dyn Notifier>,
    /// Settings the context was built from.
    pub config: Config,
}

impl ServiceContext {
    /// Creates a live context: YAML stores under `config.store` backed by a
    /// second YAML store under `config.fallback_store`, the system clock,
    /// and console (plus optional command) notifications.
    #[must_use]
    pub fn live(config: Config) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(LiveFileSystem);
        let ids: Arc<dyn IdGenerator> = Arc::new(LiveIdGenerator);
        let clock: Arc<dyn Clock> = Arc::new(LiveClock);

        let primary = Arc::new(FileTaskStore::new(fs.clone(), ids.clone(), clock.clone(), &config.store));
        let secondary =
            Arc::new(FileTaskStore::new(fs.clone(), ids.clone(), clock.clone(), &config.fallback_store));
        debug!(
            "Task store at {}, fallback at {}",
            primary.path().display(),
            secondary.path().display()
        );

        let notebook = Arc::new(FileNotebook::new(fs, ids, clock.clone(), &config.store));

        Self {
            tasks: Arc::new(FallbackTaskStore::new(primary, secondary)),
            notebook,
            notifier: live_notifier(&config),
            clock,
            config,
        }
    }

    /// Creates a context that keeps everything in memory, driven by `clock`.
    #[must_use]
    pub fn in_memory(config: Config, clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            tasks: Arc::new(MemoryTaskStore::new(clock.clone())),
            notebook: Arc::new(MemoryNotebook::new(clock.clone())),
            notifier,
            clock,
            config,
        }
    }

    /// Store directory in use.
    #[must_use]
    pub fn store_dir(&self) -> &Path {
        &self.config.store
    }

    /// Builds an assistant over this context's ports.
    #[must_use]
    pub fn assistant(&self) -> Assistant {
        Assistant::new(
            self.config.utc_offset,
            self.tasks.clone(),
            self.notebook.clone(),
            self.clock.clone(),
        )
    }

    /// Builds a reminder scheduler over this context's ports.
    #[must_use]
    pub fn scheduler(&self) -> ReminderScheduler {
        ReminderScheduler::new(
            self.tasks.clone(),
            self.notifier.clone(),
            self.clock.clone(),
            self.config.scheduler,
        )
    }
}

fn live_notifier(config: &Config) -> Arc<dyn Notifier> {
    let console: Arc<dyn Notifier> = Arc::new(ConsoleNotifier::new(config.utc_offset));
    match config.notify_command.as_deref().and_then(CommandNotifier::parse) {
        Some(command) => Arc::new(FanoutNotifier::new(vec![console, Arc::new(command) as Arc<dyn Notifier>])),
        None => console,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};

    use super::*;
    use crate::adapters::memory::{CollectingNotifier, ManualClock};

    fn config(store: &Path) -> Config {
        let store = store.to_string_lossy().into_owned();
        Config::from_lookup(|key| match key {
            "JARVIS_STORE" => Some(store.clone()),
            "JARVIS_UTC_OFFSET" => Some("+00:00".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn live_context_persists_under_store_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::live(config(dir.path()));
        assert_eq!(ctx.store_dir(), dir.path());

        ctx.assistant().handle("remind me to water plants in 1 hour").unwrap();
        ctx.assistant().handle("note to buy eggs").unwrap();

        assert!(dir.path().join("tasks.yaml").exists());
        assert!(dir.path().join("notebook.yaml").exists());
        assert_eq!(ctx.tasks.list_pending().unwrap().len(), 1);
    }

    #[test]
    fn fallback_tasks_outlive_the_process() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the store directory should be.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();

        let reply = ServiceContext::live(config(&blocked))
            .assistant()
            .handle("remind me to pay rent in 1 hour")
            .unwrap();
        assert!(reply.message.contains("pay rent"));
        assert!(dir.path().join("blocked.fallback").join("tasks.yaml").exists());

        let reopened = ServiceContext::live(config(&blocked));
        let tasks = reopened.tasks.list_all().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "pay rent");
    }

    #[test]
    fn both_stores_unusable_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();
        let mut cfg = config(&blocked);
        cfg.fallback_store = blocked.join("inner");

        assert!(ServiceContext::live(cfg).tasks.create("lost", None).is_err());
    }

    #[tokio::test]
    async fn in_memory_context_wires_scheduler() {
        let now = Utc.with_ymd_and_hms(2025, 3, 12, 10, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(now));
        let sink = Arc::new(CollectingNotifier::new());
        let mut cfg = config(Path::new("unused"));
        cfg.utc_offset = FixedOffset::east_opt(0).unwrap();
        let ctx = ServiceContext::in_memory(cfg, clock.clone(), sink.clone());

        ctx.assistant().handle("remind me to stretch in 1 minute").unwrap();
        clock.advance(chrono::Duration::minutes(1));
        let report = ctx.scheduler().poll_once().await.unwrap();

        assert_eq!(report.fired.len(), 1);
        assert_eq!(sink.received()[0].message, "Reminder: stretch");
    }
}
