//! The store record and its status.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ListingId, StoreId, UserId};
use super::plan::Plan;

/// Time-derived store status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    Active,
    GracePeriod,
    Deactivated,
    /// Terminal.
    Archived,
}

impl StoreStatus {
    /// Stable lowercase name used in storage and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::GracePeriod => "grace_period",
            Self::Deactivated => "deactivated",
            Self::Archived => "archived",
        }
    }

    /// Whether a store in this status may take new listings.
    #[must_use]
    pub const fn accepts_listings(&self) -> bool {
        matches!(self, Self::Active | Self::GracePeriod)
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "grace_period" => Ok(Self::GracePeriod),
            "deactivated" => Ok(Self::Deactivated),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown store status '{other}'")),
        }
    }
}

/// A seller's storefront.
///
/// Lifecycle fields (`status` and the timestamps that drive it) are only
/// written by the lifecycle engine; `ads_used` and `deleted_listings` only by
/// the quota functions. `version` is bumped by the repository on every
/// persisted write and backs optimistic concurrency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: StoreId,
    pub owner_id: UserId,
    pub name: String,
    pub plan: Plan,
    pub ads_used: u32,
    pub max_ads: u32,
    /// Audit ledger of listings deleted before expiry. Append-only.
    pub deleted_listings: BTreeSet<ListingId>,
    pub is_active: bool,
    pub status: StoreStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub grace_period_ends_at: Option<DateTime<Utc>>,
    pub deactivated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
    pub last_notification_at: Option<DateTime<Utc>>,
    pub followers: BTreeSet<UserId>,
    pub rating_sum: u64,
    pub rating_count: u64,
    pub version: u64,
}

impl StoreRecord {
    /// Open a new active store on `plan`, expiring `plan.duration_days` after `now`.
    #[must_use]
    pub fn new(
        id: StoreId,
        owner_id: UserId,
        name: impl Into<String>,
        plan: Plan,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            expires_at: now + plan.duration(),
            max_ads: plan.max_ads,
            plan,
            ads_used: 0,
            deleted_listings: BTreeSet::new(),
            is_active: true,
            status: StoreStatus::Active,
            created_at: now,
            grace_period_ends_at: None,
            deactivated_at: None,
            archived_at: None,
            last_notification_at: None,
            followers: BTreeSet::new(),
            rating_sum: 0,
            rating_count: 0,
            version: 0,
        }
    }

    /// Mean star rating, if anyone has rated the store.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        if self.rating_count == 0 {
            return None;
        }
        Some(self.rating_sum as f64 / self.rating_count as f64)
    }
}
