//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod clock;
pub mod listing;
pub mod notifier;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use listing::ListingRepository;
pub use notifier::{Notification, NotificationKind, NotificationSink};
pub use store::StoreRepository;
