//! Persistence port for listings.

use async_trait::async_trait;

use crate::domain::{Listing, ListingId, StoreId};
use crate::error::Result;

/// Storage operations for the listing fields the store engine owns.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn get(&self, id: &ListingId) -> Result<Option<Listing>>;

    /// Every listing of a store, deleted ones included.
    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Listing>>;

    /// Insert or replace a listing.
    async fn save(&self, listing: &Listing) -> Result<()>;
}
