//! Ad slot bookkeeping on a store.

use serde::Serialize;

use super::error::DomainError;
use super::id::ListingId;
use super::store::StoreRecord;

/// Snapshot of a store's slot usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreUsage {
    pub used: u32,
    pub max: u32,
    pub remaining: u32,
    /// Size of the early-deletion ledger.
    pub deleted: usize,
}

/// Whether the store can take one more listing right now.
#[must_use]
pub fn can_add_listing(store: &StoreRecord) -> bool {
    store.status.accepts_listings() && store.ads_used < store.max_ads
}

/// Consume one slot.
///
/// # Errors
/// [`DomainError::StoreUnavailable`] outside active/grace, and
/// [`DomainError::QuotaExceeded`] when every slot is used.
pub fn add_listing(store: &mut StoreRecord) -> Result<(), DomainError> {
    if !store.status.accepts_listings() {
        return Err(DomainError::StoreUnavailable {
            status: store.status,
        });
    }
    if store.ads_used >= store.max_ads {
        return Err(DomainError::QuotaExceeded {
            used: store.ads_used,
            max: store.max_ads,
        });
    }
    store.ads_used += 1;
    Ok(())
}

/// Release one slot. Never drops below zero and leaves the deletion ledger alone.
pub fn remove_listing(store: &mut StoreRecord) {
    store.ads_used = store.ads_used.saturating_sub(1);
}

/// Record an early deletion in the audit ledger.
///
/// Returns `false` if the listing was already recorded. Slot usage is not
/// affected.
pub fn delete_listing_early(store: &mut StoreRecord, listing_id: ListingId) -> bool {
    store.deleted_listings.insert(listing_id)
}

#[must_use]
pub fn usage(store: &StoreRecord) -> StoreUsage {
    StoreUsage {
        used: store.ads_used,
        max: store.max_ads,
        remaining: store.max_ads.saturating_sub(store.ads_used),
        deleted: store.deleted_listings.len(),
    }
}
