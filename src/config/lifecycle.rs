use std::time::Duration;

use serde::Deserialize;

use crate::application::access::DEFAULT_MAX_UPDATE_ATTEMPTS;
use crate::application::lifecycle::DEFAULT_SWEEP_CONCURRENCY;
use crate::domain::lifecycle::{DEFAULT_ARCHIVE_AFTER_DAYS, DEFAULT_GRACE_PERIOD_DAYS};
use crate::domain::LifecycleEngine;

/// Store lifecycle timing and sweep settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub grace_period_days: i64,
    pub archive_after_days: i64,
    pub sweep_interval_secs: u64,
    pub sweep_concurrency: usize,
    pub max_update_attempts: u32,
}

impl LifecycleConfig {
    #[must_use]
    pub fn engine(&self) -> LifecycleEngine {
        LifecycleEngine::new(
            chrono::Duration::days(self.grace_period_days),
            chrono::Duration::days(self.archive_after_days),
        )
    }

    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            grace_period_days: DEFAULT_GRACE_PERIOD_DAYS,
            archive_after_days: DEFAULT_ARCHIVE_AFTER_DAYS,
            sweep_interval_secs: 3600,
            sweep_concurrency: DEFAULT_SWEEP_CONCURRENCY,
            max_update_attempts: DEFAULT_MAX_UPDATE_ATTEMPTS,
        }
    }
}
