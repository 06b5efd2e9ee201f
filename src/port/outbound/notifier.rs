//! Notification sink port.
//!
//! Notifications land in a per-user, append-only feed. Delivery is always
//! best effort: callers dispatch in the background and only log failures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ListingId, StoreAlert, StoreId, StoreRecord, UserId};
use crate::error::Result;

/// What a notification is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationKind {
    /// The store plan expires in `days_left` days.
    ExpiryWarning { days_left: i64 },
    /// The plan expired and the grace period began.
    GracePeriodStarted,
    /// The store was deactivated.
    StoreDeactivated,
    /// A followed store published a listing.
    NewListing { listing_id: ListingId },
}

impl NotificationKind {
    /// Short machine-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExpiryWarning { .. } => "expiry_warning",
            Self::GracePeriodStarted => "grace_period_started",
            Self::StoreDeactivated => "store_deactivated",
            Self::NewListing { .. } => "new_listing",
        }
    }
}

impl From<StoreAlert> for NotificationKind {
    fn from(alert: StoreAlert) -> Self {
        match alert {
            StoreAlert::ExpiryWarning { days_left } => Self::ExpiryWarning { days_left },
            StoreAlert::GracePeriodStarted => Self::GracePeriodStarted,
            StoreAlert::Deactivated => Self::StoreDeactivated,
        }
    }
}

/// One entry in a user's feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient: UserId,
    pub store_id: StoreId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Lifecycle alert addressed to the store owner.
    #[must_use]
    pub fn store_alert(store: &StoreRecord, alert: StoreAlert, now: DateTime<Utc>) -> Self {
        let message = match alert {
            StoreAlert::ExpiryWarning { days_left: 1 } => {
                format!("Your store \"{}\" expires tomorrow", store.name)
            }
            StoreAlert::ExpiryWarning { days_left } => {
                format!("Your store \"{}\" expires in {days_left} days", store.name)
            }
            StoreAlert::GracePeriodStarted => format!(
                "Your store \"{}\" has expired and is in its grace period. Renew to keep it open",
                store.name
            ),
            StoreAlert::Deactivated => format!(
                "Your store \"{}\" has been deactivated. Reactivate it to resume selling",
                store.name
            ),
        };

        Self {
            id: Uuid::new_v4(),
            recipient: store.owner_id.clone(),
            store_id: store.id.clone(),
            kind: alert.into(),
            message,
            created_at: now,
        }
    }

    /// New listing announcement addressed to a follower.
    #[must_use]
    pub fn new_listing(
        follower: UserId,
        store_id: StoreId,
        store_name: &str,
        listing_id: ListingId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: follower,
            message: format!("\"{store_name}\" published a new listing"),
            store_id,
            kind: NotificationKind::NewListing { listing_id },
            created_at: now,
        }
    }
}

/// Append-only per-user notification feed.
///
/// Implementations must be thread-safe (`Send + Sync`); they are called
/// from detached tasks.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Append a notification to its recipient's feed.
    async fn push(&self, notification: Notification) -> Result<()>;
}
