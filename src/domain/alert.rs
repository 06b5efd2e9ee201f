//! Which lifecycle alert, if any, a store owner should get.
//!
//! A single `last_notification_at` per store throttles every alert class:
//! after any alert, nothing else is sent to that store for the cooldown
//! window, even a different kind of alert. The grace alert is also held
//! back once anything has been sent since the store expired.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::lifecycle::{ExpirationInfo, DEFAULT_GRACE_PERIOD_DAYS};
use super::store::StoreStatus;

/// Default cooldown between two alerts for the same store.
pub const DEFAULT_COOLDOWN_HOURS: i64 = 12;

/// Default "days before expiry" warning thresholds.
pub const DEFAULT_WARNING_DAYS: [i64; 3] = [7, 3, 1];

/// Lifecycle alert classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreAlert {
    ExpiryWarning { days_left: i64 },
    GracePeriodStarted,
    Deactivated,
}

/// Thresholds and cooldown for lifecycle alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPolicy {
    warning_days: Vec<i64>,
    cooldown: Duration,
    /// Length of the grace period; its first day reads as this many days left.
    grace_period_days: i64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_WARNING_DAYS.to_vec(),
            Duration::hours(DEFAULT_COOLDOWN_HOURS),
            DEFAULT_GRACE_PERIOD_DAYS,
        )
    }
}

impl AlertPolicy {
    #[must_use]
    pub fn new(warning_days: Vec<i64>, cooldown: Duration, grace_period_days: i64) -> Self {
        Self {
            warning_days,
            cooldown,
            grace_period_days,
        }
    }

    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether the store is still inside the cooldown of its last alert.
    #[must_use]
    pub fn in_cooldown(
        &self,
        last_notification_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> bool {
        last_notification_at.is_some_and(|last| now - last < self.cooldown)
    }

    /// Pick the alert for a store at `now`, honouring the cooldown.
    #[must_use]
    pub fn evaluate(
        &self,
        info: &ExpirationInfo,
        last_notification_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<StoreAlert> {
        if self.in_cooldown(last_notification_at, now) {
            return None;
        }

        match info.status {
            StoreStatus::Active if self.warning_days.contains(&info.days_until_expiration) => {
                Some(StoreAlert::ExpiryWarning {
                    days_left: info.days_until_expiration,
                })
            }
            StoreStatus::GracePeriod
                if info.days_in_grace_period == self.grace_period_days
                    && last_notification_at.map_or(true, |last| last <= info.expires_at) =>
            {
                Some(StoreAlert::GracePeriodStarted)
            }
            StoreStatus::Deactivated if info.days_since_deactivation == 0 => {
                Some(StoreAlert::Deactivated)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lifecycle::NextAction;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 9, 0, 0).unwrap()
    }

    fn info(status: StoreStatus) -> ExpirationInfo {
        ExpirationInfo {
            status,
            expires_at: now(),
            grace_period_ends_at: None,
            deactivated_at: None,
            days_until_expiration: 0,
            days_in_grace_period: 0,
            days_since_deactivation: 0,
            can_reactivate: status == StoreStatus::Deactivated,
            next_action: NextAction::None,
        }
    }

    #[test]
    fn warns_at_each_threshold() {
        let policy = AlertPolicy::default();
        for days in [7, 3, 1] {
            let info = ExpirationInfo {
                days_until_expiration: days,
                ..info(StoreStatus::Active)
            };
            assert_eq!(
                policy.evaluate(&info, None, now()),
                Some(StoreAlert::ExpiryWarning { days_left: days })
            );
        }
    }

    #[test]
    fn no_warning_between_thresholds() {
        let policy = AlertPolicy::default();
        for days in [8, 6, 5, 4, 2, 0] {
            let info = ExpirationInfo {
                days_until_expiration: days,
                ..info(StoreStatus::Active)
            };
            assert_eq!(policy.evaluate(&info, None, now()), None);
        }
    }

    #[test]
    fn grace_alert_only_on_first_day() {
        let policy = AlertPolicy::default();
        let first_day = ExpirationInfo {
            days_in_grace_period: 7,
            ..info(StoreStatus::GracePeriod)
        };
        let later = ExpirationInfo {
            days_in_grace_period: 5,
            ..info(StoreStatus::GracePeriod)
        };

        assert_eq!(
            policy.evaluate(&first_day, None, now()),
            Some(StoreAlert::GracePeriodStarted)
        );
        assert_eq!(policy.evaluate(&later, None, now()), None);
    }

    #[test]
    fn grace_alert_is_sent_once_per_grace_period() {
        let policy = AlertPolicy::default();
        let first_day = ExpirationInfo {
            expires_at: now() - Duration::hours(14),
            days_in_grace_period: 7,
            ..info(StoreStatus::GracePeriod)
        };

        let sent_in_grace = Some(now() - Duration::hours(13));
        assert_eq!(policy.evaluate(&first_day, sent_in_grace, now()), None);

        let warned_before_expiry = Some(now() - Duration::hours(15));
        assert_eq!(
            policy.evaluate(&first_day, warned_before_expiry, now()),
            Some(StoreAlert::GracePeriodStarted)
        );
    }

    #[test]
    fn deactivation_alert_only_on_first_day() {
        let policy = AlertPolicy::default();
        let first_day = info(StoreStatus::Deactivated);
        let later = ExpirationInfo {
            days_since_deactivation: 2,
            ..info(StoreStatus::Deactivated)
        };

        assert_eq!(
            policy.evaluate(&first_day, None, now()),
            Some(StoreAlert::Deactivated)
        );
        assert_eq!(policy.evaluate(&later, None, now()), None);
    }

    #[test]
    fn cooldown_is_shared_across_alert_classes() {
        let policy = AlertPolicy::default();
        let deactivated = info(StoreStatus::Deactivated);

        let recent = Some(now() - Duration::hours(11));
        assert_eq!(policy.evaluate(&deactivated, recent, now()), None);

        let stale = Some(now() - Duration::hours(12));
        assert_eq!(
            policy.evaluate(&deactivated, stale, now()),
            Some(StoreAlert::Deactivated)
        );
    }

    #[test]
    fn archived_store_gets_no_alert() {
        let policy = AlertPolicy::default();
        assert_eq!(policy.evaluate(&info(StoreStatus::Archived), None, now()), None);
    }
}
