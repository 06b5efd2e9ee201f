//! Owner-initiated listing discounts.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::discount::{self, DiscountPercent, DiscountedListing};
use crate::domain::{DomainError, Listing, ListingId, StoreId};
use crate::error::{Error, Result};
use crate::port::outbound::{ListingRepository, StoreRepository};

/// One listing a batch could not update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub listing_id: ListingId,
    pub reason: String,
}

/// Aggregate outcome of a store-wide discount operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub updated: usize,
    pub skipped: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    fn record_failure(&mut self, listing_id: &ListingId, error: &Error) {
        warn!(listing_id = %listing_id, error = %error, "Discount update failed for listing");
        self.failures.push(BatchFailure {
            listing_id: listing_id.clone(),
            reason: error.to_string(),
        });
    }
}

/// Applies and removes discounts on a store's listings.
pub struct DiscountService {
    stores: Arc<dyn StoreRepository>,
    listings: Arc<dyn ListingRepository>,
}

impl DiscountService {
    pub fn new(stores: Arc<dyn StoreRepository>, listings: Arc<dyn ListingRepository>) -> Self {
        Self { stores, listings }
    }

    /// Discount one listing by `percentage`.
    pub async fn apply_discount_to_product(
        &self,
        store_id: &StoreId,
        listing_id: &ListingId,
        percentage: i64,
    ) -> Result<Listing> {
        let pct = DiscountPercent::try_new(percentage)?;
        self.ensure_store(store_id).await?;
        let mut listing = self.owned_listing(store_id, listing_id).await?;

        let price = discount::apply_listing_discount(&mut listing, pct)?;
        self.listings.save(&listing).await?;

        info!(
            store_id = %store_id,
            listing_id = %listing_id,
            discount = %pct,
            price = %price,
            "Discount applied"
        );
        Ok(listing)
    }

    /// Restore one listing's baseline price. No-op without a discount.
    pub async fn remove_discount_from_product(
        &self,
        store_id: &StoreId,
        listing_id: &ListingId,
    ) -> Result<Listing> {
        self.ensure_store(store_id).await?;
        let mut listing = self.owned_listing(store_id, listing_id).await?;

        if discount::remove_listing_discount(&mut listing) {
            self.listings.save(&listing).await?;
            info!(store_id = %store_id, listing_id = %listing_id, price = %listing.price, "Discount removed");
        }
        Ok(listing)
    }

    /// Discount every live, fixed-price listing of the store except `exclude`.
    pub async fn apply_store_wide_discount(
        &self,
        store_id: &StoreId,
        percentage: i64,
        exclude: &[ListingId],
    ) -> Result<BatchReport> {
        let pct = DiscountPercent::try_new(percentage)?;
        self.ensure_store(store_id).await?;

        let excluded: HashSet<&ListingId> = exclude.iter().collect();
        let mut report = BatchReport::default();

        for mut listing in self.listings.list_by_store(store_id).await? {
            if listing.is_deleted() || listing.price_by_agreement || excluded.contains(&listing.id) {
                report.skipped += 1;
                continue;
            }

            let outcome = match discount::apply_listing_discount(&mut listing, pct) {
                Ok(_) => self.listings.save(&listing).await,
                Err(e) => Err(e.into()),
            };
            match outcome {
                Ok(()) => report.updated += 1,
                Err(e) => report.record_failure(&listing.id, &e),
            }
        }

        info!(
            store_id = %store_id,
            discount = %pct,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed(),
            "Store-wide discount applied"
        );
        Ok(report)
    }

    /// Remove the discount from every discounted listing of the store.
    pub async fn remove_store_wide_discount(&self, store_id: &StoreId) -> Result<BatchReport> {
        self.ensure_store(store_id).await?;
        let mut report = BatchReport::default();

        for mut listing in self.listings.list_by_store(store_id).await? {
            if listing.is_deleted() || !listing.has_discount {
                report.skipped += 1;
                continue;
            }

            discount::remove_listing_discount(&mut listing);
            match self.listings.save(&listing).await {
                Ok(()) => report.updated += 1,
                Err(e) => report.record_failure(&listing.id, &e),
            }
        }

        info!(
            store_id = %store_id,
            updated = report.updated,
            failed = report.failed(),
            "Store-wide discount removed"
        );
        Ok(report)
    }

    /// Listings of the store currently on discount.
    pub async fn get_store_discounts(&self, store_id: &StoreId) -> Result<Vec<DiscountedListing>> {
        self.ensure_store(store_id).await?;
        let listings = self.listings.list_by_store(store_id).await?;
        Ok(listings
            .iter()
            .filter(|listing| !listing.is_deleted())
            .filter_map(discount::discount_of)
            .collect())
    }

    /// Fail with not-found unless the store exists. A store whose record is
    /// malformed still exists.
    async fn ensure_store(&self, store_id: &StoreId) -> Result<()> {
        match self.stores.get(store_id).await {
            Ok(Some(_)) | Err(Error::MalformedRecord { .. }) => Ok(()),
            Ok(None) => Err(Error::store_not_found(store_id)),
            Err(e) => Err(e),
        }
    }

    async fn owned_listing(&self, store_id: &StoreId, listing_id: &ListingId) -> Result<Listing> {
        let listing = self
            .listings
            .get(listing_id)
            .await?
            .filter(|listing| !listing.is_deleted())
            .ok_or_else(|| Error::listing_not_found(listing_id))?;

        if &listing.store_id != store_id {
            return Err(DomainError::ListingNotInStore {
                listing_id: listing_id.clone(),
                store_id: store_id.clone(),
            }
            .into());
        }
        Ok(listing)
    }
}
