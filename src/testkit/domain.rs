//! Builders for domain primitives used across tests.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{Listing, ListingId, Plan, PlanId, StoreId, StoreRecord, UserId};

/// Fixed starting instant for clock-driven tests: 2024-01-01T00:00:00Z.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A plan priced at 10.00.
pub fn plan(duration_days: u32, max_ads: u32) -> Plan {
    Plan {
        id: PlanId::new(format!("plan-{duration_days}d-{max_ads}")),
        duration_days,
        max_ads,
        price: Decimal::new(1000, 2),
    }
}

pub fn store_id(id: &str) -> StoreId {
    StoreId::new(id)
}

pub fn user(id: &str) -> UserId {
    UserId::new(id)
}

pub fn listing_id(id: &str) -> ListingId {
    ListingId::new(id)
}

/// Fixed-price listing.
pub fn listing(id: &str, store: &StoreId, price: Decimal) -> Listing {
    Listing::new(id, store.clone(), price)
}

/// Freshly opened store owned by `owner-1`.
pub fn store_record(id: &str, plan: Plan, now: DateTime<Utc>) -> StoreRecord {
    StoreRecord::new(StoreId::new(id), user("owner-1"), "Test Store", plan, now)
}
