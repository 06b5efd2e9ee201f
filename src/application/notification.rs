//! Lifecycle alert scheduling and delivery.
//!
//! Alerts are claimed inside the store's optimistic update by stamping
//! `last_notification_at`; only the writer whose update lands dispatches, so
//! concurrent status checks cannot double-send. Delivery runs detached and
//! failures are only logged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::{AlertPolicy, LifecycleEngine, StoreAlert, StoreRecord};
use crate::port::outbound::{Notification, NotificationSink};

/// Decides which lifecycle alerts are due and delivers them.
pub struct NotificationScheduler {
    sink: Arc<dyn NotificationSink>,
    policy: AlertPolicy,
}

impl NotificationScheduler {
    pub fn new(sink: Arc<dyn NotificationSink>, policy: AlertPolicy) -> Self {
        Self { sink, policy }
    }

    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    /// Pick the alert due for `store` at `now` and start its cooldown.
    ///
    /// Must run on the record that is about to be written back, so the
    /// cooldown stamp and the status it was computed from persist together.
    pub fn claim(
        &self,
        store: &mut StoreRecord,
        engine: &LifecycleEngine,
        now: DateTime<Utc>,
    ) -> Option<StoreAlert> {
        let info = engine.expiration_info(store, now)?;
        let alert = self
            .policy
            .evaluate(&info, store.last_notification_at, now)?;
        store.last_notification_at = Some(now);
        Some(alert)
    }

    /// Send `alert` to the store owner in the background.
    pub fn dispatch(&self, store: &StoreRecord, alert: StoreAlert, now: DateTime<Utc>) {
        let notification = Notification::store_alert(store, alert, now);
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            deliver(sink.as_ref(), notification).await;
        });
    }
}

/// Push one notification, logging instead of returning failures.
pub(crate) async fn deliver(sink: &dyn NotificationSink, notification: Notification) -> bool {
    let recipient = notification.recipient.clone();
    let store_id = notification.store_id.clone();
    let kind = notification.kind.as_str();

    match sink.push(notification).await {
        Ok(()) => {
            debug!(recipient = %recipient, store_id = %store_id, kind, "Notification delivered");
            true
        }
        Err(e) => {
            warn!(
                recipient = %recipient,
                store_id = %store_id,
                kind,
                error = %e,
                "Notification delivery failed"
            );
            false
        }
    }
}
