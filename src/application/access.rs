//! Optimistic read-modify-write access to store records.
//!
//! Every store mutation loads the record, applies a closure to a copy and
//! writes it back with a compare-and-swap on `version`. A lost race reloads
//! and re-runs the closure, so the check inside the closure (e.g. "is there
//! a free slot?") and the write it guards are atomic per store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{StoreId, StoreRecord};
use crate::error::{Error, Result};
use crate::port::outbound::{Clock, StoreRepository};

/// Default number of compare-and-swap attempts before giving up.
pub const DEFAULT_MAX_UPDATE_ATTEMPTS: u32 = 5;

/// Outcome of a successful [`StoreAccess::mutate`].
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    /// The record as persisted (or as loaded, if nothing changed).
    pub store: StoreRecord,
    /// What the closure returned on the winning attempt.
    pub output: T,
    /// Whether a write happened.
    pub written: bool,
}

/// Shared handle on the store repository and the clock.
#[derive(Clone)]
pub struct StoreAccess {
    stores: Arc<dyn StoreRepository>,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
}

impl StoreAccess {
    pub fn new(stores: Arc<dyn StoreRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            stores,
            clock,
            max_attempts: DEFAULT_MAX_UPDATE_ATTEMPTS,
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn repository(&self) -> &dyn StoreRepository {
        self.stores.as_ref()
    }

    /// Load a store, mapping absence to [`Error::NotFound`].
    pub async fn load(&self, id: &StoreId) -> Result<StoreRecord> {
        self.stores
            .get(id)
            .await?
            .ok_or_else(|| Error::store_not_found(id))
    }

    /// Apply `mutate` to the store and persist the result atomically.
    ///
    /// An error from `mutate` aborts without writing. If `mutate` leaves the
    /// record unchanged nothing is written and the version is not bumped.
    pub async fn mutate<T, F>(&self, id: &StoreId, mut mutate: F) -> Result<Mutation<T>>
    where
        F: FnMut(&mut StoreRecord) -> Result<T>,
    {
        for attempt in 1..=self.max_attempts {
            let current = self.load(id).await?;
            let mut next = current.clone();
            let output = mutate(&mut next)?;

            if next == current {
                return Ok(Mutation {
                    store: next,
                    output,
                    written: false,
                });
            }

            let expected = current.version;
            next.version = expected + 1;
            if self.stores.compare_and_swap(&next, expected).await? {
                return Ok(Mutation {
                    store: next,
                    output,
                    written: true,
                });
            }

            debug!(store_id = %id, attempt, "Concurrent store update, retrying");
        }

        Err(Error::Conflict {
            store_id: id.clone(),
            attempts: self.max_attempts,
        })
    }
}
