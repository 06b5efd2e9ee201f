//! Persistence port for store records.

use async_trait::async_trait;

use crate::domain::{StoreId, StoreRecord};
use crate::error::Result;

/// Storage operations for stores.
///
/// Records are never deleted; archival is a status.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Get a store by ID.
    ///
    /// Returns [`Error::MalformedRecord`](crate::error::Error::MalformedRecord)
    /// when the stored row cannot be decoded.
    async fn get(&self, id: &StoreId) -> Result<Option<StoreRecord>>;

    /// Insert a new store. Fails if the ID is taken.
    async fn insert(&self, store: &StoreRecord) -> Result<()>;

    /// Replace the stored record if its version still equals
    /// `expected_version`, writing `store` with `version = expected_version + 1`.
    ///
    /// Returns `false` (and writes nothing) when another writer got there first.
    async fn compare_and_swap(&self, store: &StoreRecord, expected_version: u64) -> Result<bool>;

    /// IDs of every store, in a stable order.
    async fn list_ids(&self) -> Result<Vec<StoreId>>;
}
