//! Domain rule violations.
//!
//! These errors are raised by the pure domain functions (lifecycle, quota,
//! discount) before anything is persisted.
//!
//! # Examples
//!
//! ```
//! use storefront::domain::{DiscountPercent, DomainError};
//!
//! let result = DiscountPercent::try_new(100);
//! assert!(matches!(result, Err(DomainError::InvalidDiscount { percentage: 100 })));
//! ```

use thiserror::Error;

use super::id::{ListingId, StoreId};
use super::store::StoreStatus;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Discount percentage outside `1..=99`.
    #[error("discount percentage must be between 1 and 99, got {percentage}")]
    InvalidDiscount {
        /// The rejected percentage.
        percentage: i64,
    },

    /// Listings priced by agreement carry no price to discount.
    #[error("listing {listing_id} is priced by agreement and cannot be discounted")]
    PriceByAgreement {
        /// The listing that was targeted.
        listing_id: ListingId,
    },

    /// All ad slots granted by the plan are in use.
    #[error("ad quota exceeded: {used} of {max} slots used")]
    QuotaExceeded {
        /// Slots currently used.
        used: u32,
        /// Slots granted by the plan.
        max: u32,
    },

    /// The store is not in a status that accepts new listings.
    #[error("store is {status} and cannot accept new listings")]
    StoreUnavailable {
        /// The status that blocked the request.
        status: StoreStatus,
    },

    /// Archived stores are terminal.
    #[error("store is archived")]
    StoreArchived,

    /// Reactivation requested for a store that is not deactivated.
    #[error("store is {status}, only deactivated stores can be reactivated")]
    NotDeactivated {
        /// The current status.
        status: StoreStatus,
    },

    /// The new plan grants fewer slots than are currently used.
    #[error("plan allows {max_ads} ads but the store already uses {used}")]
    PlanTooSmall {
        /// Slots currently used.
        used: u32,
        /// Slots granted by the new plan.
        max_ads: u32,
    },

    /// Plan parameters are unusable.
    #[error("invalid plan: {reason}")]
    InvalidPlan {
        /// Why the plan was rejected.
        reason: String,
    },

    /// Ratings are whole stars in `1..=5`.
    #[error("rating must be between 1 and 5, got {rating}")]
    InvalidRating {
        /// The rejected rating.
        rating: u8,
    },

    /// The listing exists but belongs to another store.
    #[error("listing {listing_id} does not belong to store {store_id}")]
    ListingNotInStore {
        /// The listing that was targeted.
        listing_id: ListingId,
        /// The store the caller acted on.
        store_id: StoreId,
    },
}
