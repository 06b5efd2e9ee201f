//! Fully wired in-memory application driven by a manual clock.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::clock::ManualClock;
use super::config::test_config;
use super::domain::{epoch, plan, user};
use super::sink::RecordingSink;
use crate::adapter::outbound::memory::{MemoryListingRepository, MemoryStoreRepository};
use crate::app::{AppContext, Ports};
use crate::config::Config;
use crate::domain::{Listing, ListingId, StoreId, StoreRecord};
use crate::error::Result;
use crate::port::outbound::{ListingRepository, NotificationSink, StoreRepository};

/// Application over in-memory repositories starting at [`epoch`].
pub struct TestHarness {
    pub app: AppContext,
    pub clock: Arc<ManualClock>,
    pub stores: Arc<MemoryStoreRepository>,
    pub listings: Arc<MemoryListingRepository>,
    /// Receives every notification unless a custom sink was wired.
    pub sink: Arc<RecordingSink>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let sink = Arc::new(RecordingSink::new());
        Self::assemble(config, Arc::clone(&sink) as Arc<dyn NotificationSink>, sink)
    }

    /// Wire `notifications` instead of the recording sink.
    pub fn with_sink(config: Config, notifications: Arc<dyn NotificationSink>) -> Self {
        Self::assemble(config, notifications, Arc::new(RecordingSink::new()))
    }

    fn assemble(
        config: Config,
        notifications: Arc<dyn NotificationSink>,
        sink: Arc<RecordingSink>,
    ) -> Self {
        let clock = Arc::new(ManualClock::new(epoch()));
        let stores = Arc::new(MemoryStoreRepository::new());
        let listings = Arc::new(MemoryListingRepository::new());

        let ports = Ports {
            stores: Arc::clone(&stores) as Arc<dyn StoreRepository>,
            listings: Arc::clone(&listings) as Arc<dyn ListingRepository>,
            notifications,
            clock: Arc::clone(&clock) as Arc<dyn crate::port::outbound::Clock>,
        };

        Self {
            app: AppContext::build(config, ports),
            clock,
            stores,
            listings,
            sink,
        }
    }

    /// Open a store for `owner-1` on a plan of `duration_days` and `max_ads`.
    pub async fn open_store(&self, duration_days: u32, max_ads: u32) -> Result<StoreRecord> {
        self.app
            .stores
            .open_store(user("owner-1"), "Test Store", plan(duration_days, max_ads))
            .await
    }

    /// Persist a fixed-price listing without touching quota.
    pub async fn save_listing(&self, store: &StoreId, id: &str, price: Decimal) -> Result<Listing> {
        let listing = Listing::new(id, store.clone(), price);
        self.listings.save(&listing).await?;
        Ok(listing)
    }

    /// Persist a listing and consume a slot for it.
    pub async fn publish_listing(&self, store: &StoreId, id: &str, price: Decimal) -> Result<Listing> {
        let listing = self.save_listing(store, id, price).await?;
        self.app.quota.add_listing_to_store(store, &listing.id).await?;
        Ok(listing)
    }

    /// Current persisted record.
    pub async fn store(&self, id: &StoreId) -> Result<StoreRecord> {
        self.app.stores.get_store(id).await
    }

    pub async fn listing(&self, id: &ListingId) -> Result<Option<Listing>> {
        self.listings.get(id).await
    }

    pub fn advance_days(&self, days: i64) {
        self.clock.advance_days(days);
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
