//! Listing slot use cases.

use std::sync::Arc;

use tracing::{info, warn};

use super::access::StoreAccess;
use super::fanout::FollowerFanout;
use super::lifecycle::LifecycleService;
use crate::domain::{quota, ListingId, StoreId, StoreUsage};
use crate::error::{Error, Result};

/// Enforces and updates a store's ad slot usage.
///
/// The slot check and the increment happen inside one optimistic update,
/// so concurrent listing creation cannot overdraw the plan.
pub struct QuotaService {
    access: StoreAccess,
    lifecycle: Arc<LifecycleService>,
    fanout: FollowerFanout,
}

impl QuotaService {
    pub fn new(access: StoreAccess, lifecycle: Arc<LifecycleService>, fanout: FollowerFanout) -> Self {
        Self {
            access,
            lifecycle,
            fanout,
        }
    }

    /// Whether the store can take one more listing now.
    pub async fn can_add_listing(&self, id: &StoreId) -> Result<bool> {
        let update = self.lifecycle.update_store_status(id).await?;
        Ok(quota::can_add_listing(&update.store))
    }

    /// Consume a slot for `listing_id` and notify followers in the background.
    ///
    /// The store's status is brought up to date first, so a transition or
    /// alert that became due is recorded even when the listing is rejected.
    pub async fn add_listing_to_store(
        &self,
        id: &StoreId,
        listing_id: &ListingId,
    ) -> Result<StoreUsage> {
        self.lifecycle.update_store_status(id).await?;

        let now = self.access.now();
        let engine = self.lifecycle.engine();

        let mutation = self
            .access
            .mutate(id, |store| {
                engine.apply_status_transition(store, now);
                quota::add_listing(store)?;
                Ok(())
            })
            .await
            .map_err(|e| {
                if let Error::Domain(ref domain) = e {
                    warn!(store_id = %id, listing_id = %listing_id, reason = %domain, "Listing rejected");
                }
                e
            })?;

        let usage = quota::usage(&mutation.store);
        info!(
            store_id = %id,
            listing_id = %listing_id,
            used = usage.used,
            max = usage.max,
            "Listing added to store"
        );

        self.fanout.spawn(&mutation.store, listing_id.clone(), now);
        Ok(usage)
    }

    /// Give a slot back. Never drops usage below zero.
    pub async fn remove_listing_from_store(
        &self,
        id: &StoreId,
        listing_id: &ListingId,
    ) -> Result<StoreUsage> {
        let mutation = self
            .access
            .mutate(id, |store| {
                quota::remove_listing(store);
                Ok(())
            })
            .await?;

        info!(store_id = %id, listing_id = %listing_id, used = mutation.store.ads_used, "Listing slot released");
        Ok(quota::usage(&mutation.store))
    }

    /// Record an early deletion in the store's audit ledger.
    ///
    /// Returns `false` if the listing was already recorded. Slot usage is
    /// left unchanged.
    pub async fn delete_listing_early(&self, id: &StoreId, listing_id: &ListingId) -> Result<bool> {
        let mutation = self
            .access
            .mutate(id, |store| {
                Ok(quota::delete_listing_early(store, listing_id.clone()))
            })
            .await?;

        if mutation.output {
            info!(store_id = %id, listing_id = %listing_id, "Listing deleted early");
        }
        Ok(mutation.output)
    }

    /// Current slot usage.
    ///
    /// A store whose record cannot be decoded reports empty usage instead
    /// of failing.
    pub async fn get_store_usage(&self, id: &StoreId) -> Result<StoreUsage> {
        match self.access.load(id).await {
            Ok(store) => Ok(quota::usage(&store)),
            Err(Error::MalformedRecord { reason, .. }) => {
                warn!(store_id = %id, reason = %reason, "Reporting empty usage for malformed store");
                Ok(StoreUsage {
                    used: 0,
                    max: 0,
                    remaining: 0,
                    deleted: 0,
                })
            }
            Err(e) => Err(e),
        }
    }
}
