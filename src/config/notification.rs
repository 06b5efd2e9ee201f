use serde::Deserialize;

use crate::domain::alert::{DEFAULT_COOLDOWN_HOURS, DEFAULT_WARNING_DAYS};
use crate::domain::AlertPolicy;

/// Lifecycle alert settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub cooldown_hours: i64,
    /// Days before expiry on which the owner is warned.
    pub warning_days: Vec<i64>,
}

impl NotificationConfig {
    /// Alert policy for a lifecycle with the given grace period.
    #[must_use]
    pub fn policy(&self, grace_period_days: i64) -> AlertPolicy {
        AlertPolicy::new(
            self.warning_days.clone(),
            chrono::Duration::hours(self.cooldown_hours),
            grace_period_days,
        )
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            cooldown_hours: DEFAULT_COOLDOWN_HOURS,
            warning_days: DEFAULT_WARNING_DAYS.to_vec(),
        }
    }
}
