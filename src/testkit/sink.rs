//! Notification sinks for tests.
//!
//! - [`RecordingSink`] - keeps every notification and lets tests wait for
//!   background deliveries.
//! - [`FailingSink`] - rejects every push and counts the attempts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::domain::UserId;
use crate::error::{Error, Result};
use crate::port::outbound::{Notification, NotificationSink};

/// Records notifications in push order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
    pushed: Notify,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn for_recipient(&self, user: &UserId) -> Vec<Notification> {
        self.notifications
            .lock()
            .iter()
            .filter(|n| &n.recipient == user)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notifications.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.lock().is_empty()
    }

    /// Wait until at least `count` notifications arrived or `timeout` passed.
    ///
    /// Returns whether the count was reached.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let pushed = self.pushed.notified();
            if self.len() >= count {
                return true;
            }
            if tokio::time::timeout_at(deadline, pushed).await.is_err() {
                return self.len() >= count;
            }
        }
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn push(&self, notification: Notification) -> Result<()> {
        self.notifications.lock().push(notification);
        self.pushed.notify_waiters();
        Ok(())
    }
}

/// Rejects every notification.
#[derive(Debug, Default)]
pub struct FailingSink {
    attempts: AtomicUsize,
    attempted: Notify,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Wait until at least `count` pushes were attempted or `timeout` passed.
    pub async fn wait_for_attempts(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let attempted = self.attempted.notified();
            if self.attempts() >= count {
                return true;
            }
            if tokio::time::timeout_at(deadline, attempted).await.is_err() {
                return self.attempts() >= count;
            }
        }
    }
}

#[async_trait]
impl NotificationSink for FailingSink {
    async fn push(&self, _notification: Notification) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.attempted.notify_waiters();
        Err(Error::Notification("sink unavailable".into()))
    }
}
