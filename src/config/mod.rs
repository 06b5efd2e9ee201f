//! Configuration loading and validation.

mod database;
mod lifecycle;
mod logging;
mod notification;
mod settings;

pub use database::DatabaseConfig;
pub use lifecycle::LifecycleConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use notification::NotificationConfig;
pub use settings::{Config, DATABASE_URL_ENV};
