//! Listing fields the store engine reads and writes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ListingId, StoreId};

/// A classified ad owned by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub store_id: StoreId,
    /// Price shown to buyers; the discounted price while a discount is on.
    pub price: Decimal,
    /// Pre-discount baseline, captured when a discount is first applied.
    pub original_price: Option<Decimal>,
    pub discount_percentage: Option<u8>,
    pub has_discount: bool,
    pub price_by_agreement: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Listing {
    #[must_use]
    pub fn new(id: impl Into<ListingId>, store_id: StoreId, price: Decimal) -> Self {
        Self {
            id: id.into(),
            store_id,
            price,
            original_price: None,
            discount_percentage: None,
            has_discount: false,
            price_by_agreement: false,
            deleted_at: None,
        }
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
