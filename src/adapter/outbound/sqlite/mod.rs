//! SQLite persistence adapters.
//!
//! Provides SQLite-backed store and listing repositories and the
//! notification feed using Diesel ORM.

pub mod database;
pub mod feed;
pub mod listing;
pub mod store;

pub use feed::SqliteNotificationFeed;
pub use listing::SqliteListingRepository;
pub use store::SqliteStoreRepository;
