//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate the outbound
//! ports to implement the store engine's use cases.

pub mod access;
pub mod discount;
pub mod fanout;
pub mod lifecycle;
pub mod notification;
pub mod quota;
pub mod store;
pub mod sweeper;

pub use access::{Mutation, StoreAccess};
pub use discount::{BatchFailure, BatchReport, DiscountService};
pub use fanout::{FanoutReport, FollowerFanout};
pub use lifecycle::{ExpirationReport, LifecycleService, StatusUpdate, SweepReport};
pub use notification::NotificationScheduler;
pub use quota::QuotaService;
pub use store::StoreService;
pub use sweeper::LifecycleSweeper;
