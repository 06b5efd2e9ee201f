//! New-listing announcements to store followers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::notification::deliver;
use crate::domain::{ListingId, StoreId, StoreRecord, UserId};
use crate::port::outbound::{Notification, NotificationSink};

/// Delivery counts for one fanout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Notifies a store's followers about a new listing.
///
/// Runs after the slot has been committed and never reports back to the
/// caller that added the listing. Delivery is at least once per follower.
pub struct FollowerFanout {
    sink: Arc<dyn NotificationSink>,
}

impl FollowerFanout {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Start a detached fanout for `listing_id`.
    pub fn spawn(
        &self,
        store: &StoreRecord,
        listing_id: ListingId,
        now: DateTime<Utc>,
    ) -> JoinHandle<FanoutReport> {
        let sink = Arc::clone(&self.sink);
        let store_id = store.id.clone();
        let store_name = store.name.clone();
        let followers: Vec<UserId> = store.followers.iter().cloned().collect();

        tokio::spawn(async move {
            Self::deliver(
                sink.as_ref(),
                &store_id,
                &store_name,
                followers,
                &listing_id,
                now,
            )
            .await
        })
    }

    /// Notify each follower in turn. One failed delivery does not stop the rest.
    pub async fn deliver(
        sink: &dyn NotificationSink,
        store_id: &StoreId,
        store_name: &str,
        followers: Vec<UserId>,
        listing_id: &ListingId,
        now: DateTime<Utc>,
    ) -> FanoutReport {
        let mut report = FanoutReport::default();
        if followers.is_empty() {
            debug!(store_id = %store_id, "No followers to notify");
            return report;
        }

        for follower in followers {
            let notification = Notification::new_listing(
                follower,
                store_id.clone(),
                store_name,
                listing_id.clone(),
                now,
            );
            if deliver(sink, notification).await {
                report.delivered += 1;
            } else {
                report.failed += 1;
            }
        }

        info!(
            store_id = %store_id,
            listing_id = %listing_id,
            delivered = report.delivered,
            failed = report.failed,
            "Follower fanout finished"
        );
        report
    }
}
