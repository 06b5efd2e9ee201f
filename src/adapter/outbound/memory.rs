//! In-memory repositories.
//!
//! Used by the in-memory application context and by tests. The
//! compare-and-swap runs under the write lock, so it is as atomic as the
//! SQLite `UPDATE ... WHERE version = ?`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{Listing, ListingId, StoreId, StoreRecord, UserId};
use crate::error::{Error, Result};
use crate::port::outbound::{ListingRepository, Notification, NotificationSink, StoreRepository};

/// In-memory store repository.
#[derive(Debug, Default)]
pub struct MemoryStoreRepository {
    stores: RwLock<BTreeMap<StoreId, StoreRecord>>,
}

impl MemoryStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stores.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.read().is_empty()
    }
}

#[async_trait]
impl StoreRepository for MemoryStoreRepository {
    async fn get(&self, id: &StoreId) -> Result<Option<StoreRecord>> {
        Ok(self.stores.read().get(id).cloned())
    }

    async fn insert(&self, store: &StoreRecord) -> Result<()> {
        let mut stores = self.stores.write();
        if stores.contains_key(&store.id) {
            return Err(Error::Database(format!("store {} already exists", store.id)));
        }
        stores.insert(store.id.clone(), store.clone());
        Ok(())
    }

    async fn compare_and_swap(&self, store: &StoreRecord, expected_version: u64) -> Result<bool> {
        let mut stores = self.stores.write();
        match stores.get_mut(&store.id) {
            Some(current) if current.version == expected_version => {
                *current = store.clone();
                current.version = expected_version + 1;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(Error::store_not_found(&store.id)),
        }
    }

    async fn list_ids(&self) -> Result<Vec<StoreId>> {
        Ok(self.stores.read().keys().cloned().collect())
    }
}

/// In-memory listing repository.
#[derive(Debug, Default)]
pub struct MemoryListingRepository {
    listings: RwLock<HashMap<ListingId, Listing>>,
}

impl MemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for MemoryListingRepository {
    async fn get(&self, id: &ListingId) -> Result<Option<Listing>> {
        Ok(self.listings.read().get(id).cloned())
    }

    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Listing>> {
        let mut listings: Vec<Listing> = self
            .listings
            .read()
            .values()
            .filter(|listing| &listing.store_id == store_id)
            .cloned()
            .collect();
        listings.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listings)
    }

    async fn save(&self, listing: &Listing) -> Result<()> {
        self.listings
            .write()
            .insert(listing.id.clone(), listing.clone());
        Ok(())
    }
}

/// In-memory per-user notification feed.
#[derive(Debug, Default)]
pub struct MemoryNotificationFeed {
    feeds: RwLock<HashMap<UserId, Vec<Notification>>>,
}

impl MemoryNotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications for `user`, oldest first.
    pub fn feed_for(&self, user: &UserId) -> Vec<Notification> {
        self.feeds.read().get(user).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl NotificationSink for MemoryNotificationFeed {
    async fn push(&self, notification: Notification) -> Result<()> {
        self.feeds
            .write()
            .entry(notification.recipient.clone())
            .or_default()
            .push(notification);
        Ok(())
    }
}
