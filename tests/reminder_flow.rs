//! End-to-end flow through the library: interpret an utterance, store the
//! task on disk, and let the scheduler fire it.

use std::sync::Arc;

use chrono::{Duration, FixedOffset, TimeZone, Utc};

use jarvis::adapters::file::FileTaskStore;
use jarvis::adapters::live::{LiveFileSystem, LiveIdGenerator};
use jarvis::adapters::memory::{CollectingNotifier, ManualClock};
use jarvis::interpret::{reminder_content, Intent, Interpreter};
use jarvis::ports::TaskStore;
use jarvis::scheduler::{ReminderScheduler, SchedulerConfig};

#[tokio::test]
async fn spoken_reminder_fires_once_at_its_time() {
    let dir = tempfile::tempdir().unwrap();
    // Wednesday 2025-03-12 09:00 UTC, 10:00 at +01:00.
    let start = Utc.with_ymd_and_hms(2025, 3, 12, 9, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let offset = FixedOffset::east_opt(3600).unwrap();

    let text = "Remind me to call mom at 5:00 pm";
    let parsed = Interpreter::new(offset).interpret(text, start);
    assert_eq!(parsed.intent, Intent::SetReminder);
    let due = parsed.entities.time.unwrap();
    assert_eq!(due, Utc.with_ymd_and_hms(2025, 3, 12, 16, 0, 0).unwrap());

    let store = Arc::new(FileTaskStore::new(
        Arc::new(LiveFileSystem),
        Arc::new(LiveIdGenerator),
        clock.clone(),
        dir.path(),
    ));
    let task = store.create(parsed.entities.content.as_deref().unwrap(), Some(due)).unwrap();

    // Title and time survive storage unchanged.
    let reopened = FileTaskStore::new(
        Arc::new(LiveFileSystem),
        Arc::new(LiveIdGenerator),
        clock.clone(),
        dir.path(),
    );
    let stored = reopened.list_pending().unwrap();
    assert_eq!(stored[0].title, reminder_content(text));
    assert_eq!(stored[0].title, "call mom");
    assert_eq!(stored[0].due_at, Some(due));

    let sink = Arc::new(CollectingNotifier::new());
    let scheduler =
        ReminderScheduler::new(store.clone(), sink.clone(), clock.clone(), SchedulerConfig::default());

    assert!(scheduler.poll_once().await.unwrap().fired.is_empty());

    clock.set(due + Duration::seconds(3));
    let report = scheduler.poll_once().await.unwrap();
    assert_eq!(report.fired, vec![task.id.clone()]);

    clock.advance(Duration::seconds(5));
    assert!(scheduler.poll_once().await.unwrap().fired.is_empty());

    let received = sink.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].message, "Reminder: call mom");
    assert_eq!(received[0].due_at, due);
    assert!(reopened.list_pending().unwrap().is_empty());
}

#[tokio::test]
async fn a_restarted_scheduler_does_not_refire() {
    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2025, 3, 12, 9, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(now));
    let store = Arc::new(FileTaskStore::new(
        Arc::new(LiveFileSystem),
        Arc::new(LiveIdGenerator),
        clock.clone(),
        dir.path(),
    ));
    store.create("stand up", Some(now)).unwrap();
    let sink = Arc::new(CollectingNotifier::new());

    for _ in 0..2 {
        let scheduler =
            ReminderScheduler::new(store.clone(), sink.clone(), clock.clone(), SchedulerConfig::default());
        scheduler.poll_once().await.unwrap();
    }
    assert_eq!(sink.received().len(), 1);
}
