//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. The database location can be
//! overridden with `STOREFRONT_DATABASE_URL`.

use std::path::Path;

use serde::Deserialize;

use super::{DatabaseConfig, LifecycleConfig, LoggingConfig, NotificationConfig};
use crate::error::{ConfigError, Result};

/// Environment variable that overrides `database.url`.
pub const DATABASE_URL_ENV: &str = "STOREFRONT_DATABASE_URL";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl Config {
    /// Load, apply environment overrides and validate.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse(&content)?;

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            config.database.url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse TOML without touching the environment or validating.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }

        let lifecycle = &self.lifecycle;
        if lifecycle.grace_period_days <= 0 {
            return Err(invalid("lifecycle.grace_period_days", "must be positive"));
        }
        if lifecycle.archive_after_days <= 0 {
            return Err(invalid("lifecycle.archive_after_days", "must be positive"));
        }
        if lifecycle.sweep_interval_secs == 0 {
            return Err(invalid("lifecycle.sweep_interval_secs", "must be non-zero"));
        }
        if lifecycle.sweep_concurrency == 0 {
            return Err(invalid("lifecycle.sweep_concurrency", "must be non-zero"));
        }
        if lifecycle.max_update_attempts == 0 {
            return Err(invalid("lifecycle.max_update_attempts", "must be non-zero"));
        }

        let notifications = &self.notifications;
        if notifications.cooldown_hours <= 0 {
            return Err(invalid("notifications.cooldown_hours", "must be positive"));
        }
        if let Some(day) = notifications
            .warning_days
            .iter()
            .find(|day| !(1..=365).contains(*day))
        {
            return Err(invalid(
                "notifications.warning_days",
                &format!("{day} is outside 1..=365"),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}
