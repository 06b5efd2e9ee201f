//! Store lifecycle domain: records, rules and projections.
//!
//! Everything in this layer is synchronous and free of I/O. Time is always
//! passed in as `now`.

pub mod alert;
pub mod discount;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod listing;
pub mod plan;
pub mod quota;
pub mod store;

pub use alert::{AlertPolicy, StoreAlert};
pub use discount::{DiscountPercent, DiscountedListing};
pub use error::DomainError;
pub use id::{ListingId, PlanId, StoreId, UserId};
pub use lifecycle::{ExpirationInfo, LifecycleEngine, NextAction, StatusChange};
pub use listing::Listing;
pub use plan::{Plan, MAX_DURATION_DAYS};
pub use quota::StoreUsage;
pub use store::{StoreRecord, StoreStatus};
