//! `jarvis watch` command.

use log::warn;
use tokio::sync::watch;

use crate::context::ServiceContext;
use crate::scheduler::PollReport;

/// Execute the `watch` command.
///
/// Runs the reminder scheduler in the foreground until Ctrl-C. With `once`,
/// performs a single poll, prints what happened and returns.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start or, with `once`, if
/// the poll fails.
pub fn run(ctx: &ServiceContext, once: bool) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    runtime.block_on(watch_reminders(ctx, once))
}

async fn watch_reminders(ctx: &ServiceContext, once: bool) -> Result<(), String> {
    let scheduler = ctx.scheduler();
    if once {
        let report = scheduler.poll_once().await.map_err(|e| format!("Reminder poll failed: {e}"))?;
        println!("{}", summary(&report));
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let interrupt = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
        let _ = shutdown_tx.send(true);
    };

    println!(
        "Watching {} for reminders every {}s. Press Ctrl-C to stop.",
        ctx.store_dir().display(),
        ctx.config.scheduler.poll_interval.as_secs()
    );
    tokio::join!(scheduler.run(shutdown_rx), interrupt);
    println!("Stopped.");
    Ok(())
}

fn summary(report: &PollReport) -> String {
    format!(
        "Fired {} reminder(s); {} not yet due, {} missed, {} failed commit(s).",
        report.fired.len(),
        report.not_yet_due,
        report.missed,
        report.failed_commits
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::MemoryTaskStore;
    use crate::commands::test_support;
    use crate::ports::Clock;

    #[test]
    fn once_fires_due_reminders() {
        let (ctx, clock, sink) = test_support::context();
        ctx.tasks.create("stretch", Some(clock.now())).unwrap();
        run(&ctx, true).unwrap();
        assert_eq!(sink.received().len(), 1);
        run(&ctx, true).unwrap();
        assert_eq!(sink.received().len(), 1);
    }

    #[test]
    fn once_surfaces_store_errors() {
        let (ctx, _, _) = test_support::context();
        let broken = MemoryTaskStore::new(ctx.clock.clone());
        broken.set_offline(true);
        let ctx = ServiceContext { tasks: Arc::new(broken), ..ctx };
        assert!(run(&ctx, true).unwrap_err().contains("Reminder poll failed"));
    }

    #[test]
    fn summary_text() {
        let report = PollReport { fired: vec!["a".into()], not_yet_due: 2, ..PollReport::default() };
        assert_eq!(summary(&report), "Fired 1 reminder(s); 2 not yet due, 0 missed, 0 failed commit(s).");
    }
}
