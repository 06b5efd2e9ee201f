//! Canonical test configuration.

use crate::config::Config;

/// Default configuration with a small sweep fan-out and a throwaway database.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.database.url = ":memory:".into();
    config.lifecycle.sweep_concurrency = 4;
    config.lifecycle.sweep_interval_secs = 1;
    config
}
