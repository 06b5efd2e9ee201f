//! Service graph construction.
//!
//! Every collaborator is injected explicitly; nothing is looked up at call
//! time.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::memory::{
    MemoryListingRepository, MemoryNotificationFeed, MemoryStoreRepository,
};
use crate::adapter::outbound::notifier::{LogNotificationSink, SinkRegistry};
use crate::adapter::outbound::sqlite::database::connection;
use crate::adapter::outbound::sqlite::{
    SqliteListingRepository, SqliteNotificationFeed, SqliteStoreRepository,
};
use crate::application::{
    DiscountService, FollowerFanout, LifecycleService, LifecycleSweeper, NotificationScheduler,
    QuotaService, StoreAccess, StoreService,
};
use crate::config::Config;
use crate::error::Result;
use crate::port::outbound::{
    Clock, ListingRepository, NotificationSink, StoreRepository, SystemClock,
};

/// Outbound adapters the services are built on.
#[derive(Clone)]
pub struct Ports {
    pub stores: Arc<dyn StoreRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub notifications: Arc<dyn NotificationSink>,
    pub clock: Arc<dyn Clock>,
}

/// Fully wired application.
pub struct AppContext {
    pub config: Config,
    pub ports: Ports,
    pub stores: StoreService,
    pub lifecycle: Arc<LifecycleService>,
    pub quota: QuotaService,
    pub discounts: DiscountService,
    pub sweeper: LifecycleSweeper,
}

impl AppContext {
    /// Wire services over the given ports.
    pub fn build(config: Config, ports: Ports) -> Self {
        let engine = config.lifecycle.engine();
        let policy = config
            .notifications
            .policy(config.lifecycle.grace_period_days);

        let access = StoreAccess::new(Arc::clone(&ports.stores), Arc::clone(&ports.clock))
            .with_max_attempts(config.lifecycle.max_update_attempts);
        let scheduler = NotificationScheduler::new(Arc::clone(&ports.notifications), policy);
        let lifecycle = Arc::new(
            LifecycleService::new(access.clone(), engine, scheduler)
                .with_sweep_concurrency(config.lifecycle.sweep_concurrency),
        );
        let fanout = FollowerFanout::new(Arc::clone(&ports.notifications));

        Self {
            stores: StoreService::new(access.clone(), engine),
            quota: QuotaService::new(access, Arc::clone(&lifecycle), fanout),
            discounts: DiscountService::new(
                Arc::clone(&ports.stores),
                Arc::clone(&ports.listings),
            ),
            sweeper: LifecycleSweeper::new(
                Arc::clone(&lifecycle),
                config.lifecycle.sweep_interval(),
            ),
            lifecycle,
            ports,
            config,
        }
    }

    /// SQLite-backed application. Notifications are logged and persisted
    /// to the feed table.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn from_config(config: Config) -> Result<Self> {
        let pool = connection::open(&config.database.url)?;
        info!(database = %config.database.url, "Database ready");

        let mut sinks = SinkRegistry::new();
        sinks.register(Arc::new(LogNotificationSink));
        sinks.register(Arc::new(SqliteNotificationFeed::new(pool.clone())));

        let ports = Ports {
            stores: Arc::new(SqliteStoreRepository::new(pool.clone())),
            listings: Arc::new(SqliteListingRepository::new(pool)),
            notifications: Arc::new(sinks),
            clock: Arc::new(SystemClock),
        };
        Ok(Self::build(config, ports))
    }

    /// Application over in-memory repositories, returning the feed that
    /// receives every notification.
    pub fn in_memory(config: Config) -> (Self, Arc<MemoryNotificationFeed>) {
        let feed = Arc::new(MemoryNotificationFeed::new());
        let mut sinks = SinkRegistry::new();
        sinks.register(Arc::new(LogNotificationSink));
        sinks.register(Arc::clone(&feed) as Arc<dyn NotificationSink>);

        let ports = Ports {
            stores: Arc::new(MemoryStoreRepository::new()),
            listings: Arc::new(MemoryListingRepository::new()),
            notifications: Arc::new(sinks),
            clock: Arc::new(SystemClock),
        };
        (Self::build(config, ports), feed)
    }
}
