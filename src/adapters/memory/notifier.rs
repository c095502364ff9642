//! Notification sink that keeps what it receives.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::ports::notifier::{Notification, Notifier, NotifyFuture};

/// Collects delivered notifications; can be switched into a failing mode.
#[derive(Default)]
pub struct CollectingNotifier {
    received: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl CollectingNotifier {
    /// Creates an empty, succeeding sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later delivery record the notification and then fail.
    pub fn fail_deliveries(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns everything delivered so far.
    #[must_use]
    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify<'a>(&'a self, notification: &'a Notification) -> NotifyFuture<'a> {
        Box::pin(async move {
            self.received.lock().unwrap_or_else(PoisonError::into_inner).push(notification.clone());
            if self.failing.load(Ordering::SeqCst) {
                Err("delivery failed".into())
            } else {
                Ok(())
            }
        })
    }
}
