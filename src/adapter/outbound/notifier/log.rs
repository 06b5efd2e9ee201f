//! Sink that writes notifications to the tracing log.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::port::outbound::{Notification, NotificationKind, NotificationSink};

/// Logs every notification at info level. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn push(&self, notification: Notification) -> Result<()> {
        match &notification.kind {
            NotificationKind::ExpiryWarning { days_left } => {
                info!(
                    recipient = %notification.recipient,
                    store_id = %notification.store_id,
                    days_left,
                    "Store expiry warning"
                );
            }
            NotificationKind::GracePeriodStarted => {
                info!(
                    recipient = %notification.recipient,
                    store_id = %notification.store_id,
                    "Store grace period started"
                );
            }
            NotificationKind::StoreDeactivated => {
                info!(
                    recipient = %notification.recipient,
                    store_id = %notification.store_id,
                    "Store deactivated"
                );
            }
            NotificationKind::NewListing { listing_id } => {
                info!(
                    recipient = %notification.recipient,
                    store_id = %notification.store_id,
                    listing_id = %listing_id,
                    "New listing from followed store"
                );
            }
        }
        Ok(())
    }
}
