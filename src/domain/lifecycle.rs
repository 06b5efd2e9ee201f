//! Time-driven store lifecycle.
//!
//! A store's status is derived from its timestamps:
//!
//! ```text
//!  active ──(expires_at passes)──► grace_period ──(grace ends)──► deactivated
//!    ▲                                  │                              │
//!    └──────────── renew ───────────────┴──────── renew/reactivate ────┘
//!                                                                      │
//!                                     (90 days after deactivation)     ▼
//!                                                                  archived
//! ```
//!
//! `archived` is terminal. Every status write goes through
//! [`LifecycleEngine::apply_status_transition`], which only ever sets each
//! lifecycle timestamp once, so repeated or concurrent application converges
//! on the same record.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::error::DomainError;
use super::plan::Plan;
use super::store::{StoreRecord, StoreStatus};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Default length of the grace period after expiry.
pub const DEFAULT_GRACE_PERIOD_DAYS: i64 = 7;

/// Default delay between deactivation and automatic archival.
pub const DEFAULT_ARCHIVE_AFTER_DAYS: i64 = 90;

/// A status change produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: StoreStatus,
    pub to: StoreStatus,
    pub at: DateTime<Utc>,
}

/// What the owner should do next, given the store's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    RenewBeforeExpiry,
    RenewToAvoidDeactivation,
    Reactivate,
    None,
}

impl NextAction {
    /// Human-facing hint.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::RenewBeforeExpiry => "Renew your plan before it expires to keep selling",
            Self::RenewToAvoidDeactivation => {
                "Your plan has expired. Renew before the grace period ends to keep your store"
            }
            Self::Reactivate => "Your store is deactivated. Reactivate it to resume selling",
            Self::None => "This store has been archived",
        }
    }
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Read-only view of where a store stands in its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpirationInfo {
    pub status: StoreStatus,
    pub expires_at: DateTime<Utc>,
    pub grace_period_ends_at: Option<DateTime<Utc>>,
    pub deactivated_at: Option<DateTime<Utc>>,
    /// Whole days left before expiry, rounded up; 0 once expired.
    pub days_until_expiration: i64,
    /// Whole days left in the grace period, rounded up; 0 outside it.
    pub days_in_grace_period: i64,
    /// Completed days since deactivation; 0 on the first day and outside
    /// the deactivated status.
    pub days_since_deactivation: i64,
    pub can_reactivate: bool,
    pub next_action: NextAction,
}

/// Lifecycle rules parameterised by the grace and archival windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEngine {
    grace_period: Duration,
    archive_after: Duration,
}

impl Default for LifecycleEngine {
    fn default() -> Self {
        Self::new(
            Duration::days(DEFAULT_GRACE_PERIOD_DAYS),
            Duration::days(DEFAULT_ARCHIVE_AFTER_DAYS),
        )
    }
}

impl LifecycleEngine {
    #[must_use]
    pub const fn new(grace_period: Duration, archive_after: Duration) -> Self {
        Self {
            grace_period,
            archive_after,
        }
    }

    #[must_use]
    pub const fn grace_period(&self) -> Duration {
        self.grace_period
    }

    #[must_use]
    pub const fn archive_after(&self) -> Duration {
        self.archive_after
    }

    /// Derive the status the store should be in at `now`.
    ///
    /// Pure: reads the record, never writes it.
    #[must_use]
    pub fn compute_status(&self, store: &StoreRecord, now: DateTime<Utc>) -> StoreStatus {
        if store.status.is_terminal() {
            return StoreStatus::Archived;
        }

        if let Some(deactivated_at) = store.deactivated_at {
            if now - deactivated_at >= self.archive_after {
                return StoreStatus::Archived;
            }
        }

        if now <= store.expires_at {
            return StoreStatus::Active;
        }

        match store.grace_period_ends_at {
            Some(grace_ends) if now <= grace_ends => StoreStatus::GracePeriod,
            _ => StoreStatus::Deactivated,
        }
    }

    /// Move the store to the status it should have at `now`, setting the
    /// lifecycle timestamps that belong to the new status.
    ///
    /// The grace period end is fixed the first time the store is seen past
    /// its expiry; `deactivated_at` and `archived_at` are only written when
    /// absent. Returns the change, or `None` if the status is unchanged.
    pub fn apply_status_transition(
        &self,
        store: &mut StoreRecord,
        now: DateTime<Utc>,
    ) -> Option<StatusChange> {
        if store.status.is_terminal() {
            return None;
        }

        let from = store.status;

        if now > store.expires_at
            && store.grace_period_ends_at.is_none()
            && store.deactivated_at.is_none()
        {
            store.grace_period_ends_at = store.expires_at.checked_add_signed(self.grace_period);
        }

        let to = self.compute_status(store, now);
        match to {
            StoreStatus::Active | StoreStatus::GracePeriod => store.is_active = true,
            StoreStatus::Deactivated => {
                store.deactivated_at.get_or_insert(now);
                store.is_active = false;
            }
            StoreStatus::Archived => {
                store.archived_at.get_or_insert(now);
                store.is_active = false;
            }
        }
        store.status = to;

        (from != to).then_some(StatusChange { from, to, at: now })
    }

    /// Start a fresh plan period from `now`.
    ///
    /// Valid from any status except archived.
    ///
    /// # Errors
    /// [`DomainError::StoreArchived`] for archived stores, plan validation
    /// errors, and [`DomainError::PlanTooSmall`] when the plan grants fewer
    /// slots than are in use.
    pub fn renew(
        &self,
        store: &mut StoreRecord,
        plan: Plan,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, DomainError> {
        if self.compute_status(store, now).is_terminal() {
            return Err(DomainError::StoreArchived);
        }
        plan.validate()?;
        if store.ads_used > plan.max_ads {
            return Err(DomainError::PlanTooSmall {
                used: store.ads_used,
                max_ads: plan.max_ads,
            });
        }

        let from = store.status;
        store.expires_at = now + plan.duration();
        store.max_ads = plan.max_ads;
        store.plan = plan;
        store.status = StoreStatus::Active;
        store.is_active = true;
        store.grace_period_ends_at = None;
        store.deactivated_at = None;
        store.archived_at = None;

        Ok(StatusChange {
            from,
            to: StoreStatus::Active,
            at: now,
        })
    }

    /// Renew a store that has been deactivated.
    ///
    /// # Errors
    /// [`DomainError::NotDeactivated`] unless the store is deactivated at
    /// `now`, plus everything [`renew`](Self::renew) rejects.
    pub fn reactivate(
        &self,
        store: &mut StoreRecord,
        plan: Plan,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, DomainError> {
        match self.compute_status(store, now) {
            StoreStatus::Deactivated => self.renew(store, plan, now),
            StoreStatus::Archived => Err(DomainError::StoreArchived),
            status => Err(DomainError::NotDeactivated { status }),
        }
    }

    /// Archive on the owner's request. No-op for stores already archived.
    pub fn archive(&self, store: &mut StoreRecord, now: DateTime<Utc>) -> Option<StatusChange> {
        if store.status.is_terminal() {
            return None;
        }
        let from = store.status;
        store.archived_at.get_or_insert(now);
        store.is_active = false;
        store.status = StoreStatus::Archived;
        Some(StatusChange {
            from,
            to: StoreStatus::Archived,
            at: now,
        })
    }

    /// Project the store's expiration state at `now`.
    ///
    /// The projection is computed on a transitioned copy, so it agrees with
    /// what [`apply_status_transition`](Self::apply_status_transition) would
    /// persist. Returns `None` when the record lacks the timestamp its status
    /// depends on.
    #[must_use]
    pub fn expiration_info(&self, store: &StoreRecord, now: DateTime<Utc>) -> Option<ExpirationInfo> {
        let mut projected = store.clone();
        self.apply_status_transition(&mut projected, now);
        let status = projected.status;

        let days_until_expiration = ceil_days(projected.expires_at - now).max(0);

        let days_in_grace_period = match status {
            StoreStatus::GracePeriod => ceil_days(projected.grace_period_ends_at? - now).max(0),
            _ => 0,
        };

        let days_since_deactivation = match status {
            StoreStatus::Deactivated => ceil_days(now - projected.deactivated_at?).max(0),
            _ => 0,
        };

        let next_action = match status {
            StoreStatus::Active => NextAction::RenewBeforeExpiry,
            StoreStatus::GracePeriod => NextAction::RenewToAvoidDeactivation,
            StoreStatus::Deactivated => NextAction::Reactivate,
            StoreStatus::Archived => NextAction::None,
        };

        Some(ExpirationInfo {
            status,
            expires_at: projected.expires_at,
            grace_period_ends_at: projected.grace_period_ends_at,
            deactivated_at: projected.deactivated_at,
            days_until_expiration,
            days_in_grace_period,
            days_since_deactivation,
            can_reactivate: status == StoreStatus::Deactivated,
            next_action,
        })
    }
}

fn ceil_days(delta: Duration) -> i64 {
    -(-delta.num_milliseconds()).div_euclid(MILLIS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::{StoreId, UserId};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn plan(days: u32, max_ads: u32) -> Plan {
        Plan::try_new("basic", days, max_ads, dec!(10)).unwrap()
    }

    fn store_expiring_at(expires_at: DateTime<Utc>) -> StoreRecord {
        let mut store = StoreRecord::new(
            StoreId::new("s1"),
            UserId::new("owner"),
            "Shop",
            plan(30, 10),
            expires_at - Duration::days(30),
        );
        store.expires_at = expires_at;
        store
    }

    #[test]
    fn store_before_expiry_is_active() {
        let engine = LifecycleEngine::default();
        let store = store_expiring_at(now() + Duration::days(3));
        assert_eq!(engine.compute_status(&store, now()), StoreStatus::Active);
    }

    #[test]
    fn expiry_instant_is_still_active() {
        let engine = LifecycleEngine::default();
        let store = store_expiring_at(now());
        assert_eq!(engine.compute_status(&store, now()), StoreStatus::Active);
    }

    #[test]
    fn first_expiry_opens_grace_period() {
        let engine = LifecycleEngine::default();
        let expires_at = now() - Duration::days(1);
        let mut store = store_expiring_at(expires_at);

        let change = engine.apply_status_transition(&mut store, now()).unwrap();

        assert_eq!(change.from, StoreStatus::Active);
        assert_eq!(change.to, StoreStatus::GracePeriod);
        assert_eq!(store.status, StoreStatus::GracePeriod);
        assert_eq!(store.grace_period_ends_at, Some(expires_at + Duration::days(7)));
        assert!(store.is_active);
        assert!(store.deactivated_at.is_none());
    }

    #[test]
    fn grace_period_end_is_set_only_once() {
        let engine = LifecycleEngine::default();
        let expires_at = now() - Duration::days(1);
        let mut store = store_expiring_at(expires_at);

        engine.apply_status_transition(&mut store, now());
        let first = store.grace_period_ends_at;
        engine.apply_status_transition(&mut store, now() + Duration::days(2));

        assert_eq!(store.grace_period_ends_at, first);
    }

    #[test]
    fn grace_period_ending_deactivates() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() - Duration::days(8));
        store.status = StoreStatus::GracePeriod;
        store.grace_period_ends_at = Some(now() - Duration::days(1));

        let change = engine.apply_status_transition(&mut store, now()).unwrap();

        assert_eq!(change.to, StoreStatus::Deactivated);
        assert_eq!(store.deactivated_at, Some(now()));
        assert!(!store.is_active);
    }

    #[test]
    fn missed_grace_window_deactivates_directly() {
        let engine = LifecycleEngine::default();
        let expires_at = now() - Duration::days(10);
        let mut store = store_expiring_at(expires_at);

        let change = engine.apply_status_transition(&mut store, now()).unwrap();

        assert_eq!(change.to, StoreStatus::Deactivated);
        assert_eq!(store.grace_period_ends_at, Some(expires_at + Duration::days(7)));
        assert_eq!(store.deactivated_at, Some(now()));
    }

    #[test]
    fn long_deactivation_archives() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() - Duration::days(120));
        store.status = StoreStatus::Deactivated;
        store.is_active = false;
        store.grace_period_ends_at = Some(now() - Duration::days(113));
        store.deactivated_at = Some(now() - Duration::days(91));

        assert_eq!(engine.compute_status(&store, now()), StoreStatus::Archived);

        let change = engine.apply_status_transition(&mut store, now()).unwrap();
        assert_eq!(change.to, StoreStatus::Archived);
        assert_eq!(store.archived_at, Some(now()));
        assert!(!store.is_active);
    }

    #[test]
    fn archival_happens_exactly_at_the_threshold() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() - Duration::days(120));
        store.status = StoreStatus::Deactivated;
        store.deactivated_at = Some(now() - Duration::days(90));

        assert_eq!(engine.compute_status(&store, now()), StoreStatus::Archived);
    }

    #[test]
    fn archived_is_terminal() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() + Duration::days(300));
        store.status = StoreStatus::Archived;
        store.archived_at = Some(now());

        for offset in [0, 1, 30, 365] {
            let later = now() + Duration::days(offset);
            assert_eq!(engine.compute_status(&store, later), StoreStatus::Archived);
            assert!(engine.apply_status_transition(&mut store, later).is_none());
        }
        assert_eq!(store.archived_at, Some(now()));
    }

    #[test]
    fn transition_is_idempotent() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() - Duration::days(1));

        assert!(engine.apply_status_transition(&mut store, now()).is_some());
        let snapshot = store.clone();

        assert!(engine.apply_status_transition(&mut store, now()).is_none());
        assert_eq!(store, snapshot);
    }

    #[test]
    fn renew_resets_lifecycle_fields() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() - Duration::days(20));
        engine.apply_status_transition(&mut store, now());
        assert_eq!(store.status, StoreStatus::Deactivated);

        let change = engine.renew(&mut store, plan(60, 25), now()).unwrap();

        assert_eq!(change.from, StoreStatus::Deactivated);
        assert_eq!(store.status, StoreStatus::Active);
        assert!(store.is_active);
        assert_eq!(store.expires_at, now() + Duration::days(60));
        assert_eq!(store.max_ads, 25);
        assert!(store.grace_period_ends_at.is_none());
        assert!(store.deactivated_at.is_none());
        assert!(store.archived_at.is_none());
    }

    #[test]
    fn renew_rejects_archived_store() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() - Duration::days(200));
        store.status = StoreStatus::Archived;

        assert_eq!(
            engine.renew(&mut store, plan(30, 10), now()),
            Err(DomainError::StoreArchived)
        );
        assert_eq!(store.status, StoreStatus::Archived);
    }

    #[test]
    fn renew_rejects_store_due_for_archival() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() - Duration::days(200));
        store.status = StoreStatus::Deactivated;
        store.deactivated_at = Some(now() - Duration::days(95));

        assert_eq!(
            engine.renew(&mut store, plan(30, 10), now()),
            Err(DomainError::StoreArchived)
        );
    }

    #[test]
    fn renew_rejects_plan_smaller_than_usage() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() + Duration::days(1));
        store.ads_used = 8;

        assert_eq!(
            engine.renew(&mut store, plan(30, 5), now()),
            Err(DomainError::PlanTooSmall { used: 8, max_ads: 5 })
        );
    }

    #[test]
    fn reactivate_requires_deactivated_store() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() + Duration::days(5));

        assert_eq!(
            engine.reactivate(&mut store, plan(30, 10), now()),
            Err(DomainError::NotDeactivated {
                status: StoreStatus::Active
            })
        );
    }

    #[test]
    fn archive_is_idempotent() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() + Duration::days(5));

        let change = engine.archive(&mut store, now()).unwrap();
        assert_eq!(change.to, StoreStatus::Archived);
        assert!(engine.archive(&mut store, now() + Duration::days(1)).is_none());
        assert_eq!(store.archived_at, Some(now()));
    }

    #[test]
    fn expiration_info_for_active_store() {
        let engine = LifecycleEngine::default();
        let store = store_expiring_at(now() + Duration::days(6) + Duration::hours(1));

        let info = engine.expiration_info(&store, now()).unwrap();

        assert_eq!(info.status, StoreStatus::Active);
        assert_eq!(info.days_until_expiration, 7);
        assert_eq!(info.days_in_grace_period, 0);
        assert!(!info.can_reactivate);
        assert_eq!(info.next_action, NextAction::RenewBeforeExpiry);
    }

    #[test]
    fn expiration_info_on_first_grace_day() {
        let engine = LifecycleEngine::default();
        let store = store_expiring_at(now() - Duration::hours(2));

        let info = engine.expiration_info(&store, now()).unwrap();

        assert_eq!(info.status, StoreStatus::GracePeriod);
        assert_eq!(info.days_until_expiration, 0);
        assert_eq!(info.days_in_grace_period, 7);
    }

    #[test]
    fn expiration_info_for_deactivated_store() {
        let engine = LifecycleEngine::default();
        let mut store = store_expiring_at(now() - Duration::days(20));
        store.status = StoreStatus::Deactivated;
        store.grace_period_ends_at = Some(now() - Duration::days(13));
        store.deactivated_at = Some(now() - Duration::days(3) - Duration::hours(5));

        let info = engine.expiration_info(&store, now()).unwrap();

        assert_eq!(info.days_since_deactivation, 4);
        assert!(info.can_reactivate);
        assert_eq!(info.next_action, NextAction::Reactivate);
    }

    #[test]
    fn expiration_info_does_not_mutate_the_record() {
        let engine = LifecycleEngine::default();
        let store = store_expiring_at(now() - Duration::days(1));
        let before = store.clone();

        let _ = engine.expiration_info(&store, now());

        assert_eq!(store, before);
    }

    #[test]
    fn day_rounding_helpers() {
        assert_eq!(ceil_days(Duration::hours(1)), 1);
        assert_eq!(ceil_days(Duration::days(2)), 2);
        assert_eq!(ceil_days(Duration::hours(-1)), 0);
        assert_eq!(ceil_days(Duration::zero()), 0);
        assert_eq!(ceil_days(Duration::hours(49)), 3);
    }
}
