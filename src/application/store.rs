//! Owner and shopper actions on a store that sit outside the lifecycle:
//! opening, profile edits, deletion, following and rating.

use tracing::info;

use super::access::StoreAccess;
use crate::domain::{DomainError, LifecycleEngine, Plan, StoreId, StoreRecord, UserId};
use crate::error::Result;

/// Store management service.
pub struct StoreService {
    access: StoreAccess,
    engine: LifecycleEngine,
}

impl StoreService {
    pub fn new(access: StoreAccess, engine: LifecycleEngine) -> Self {
        Self { access, engine }
    }

    /// Open a new active store for `owner` on `plan`.
    pub async fn open_store(
        &self,
        owner: UserId,
        name: impl Into<String>,
        plan: Plan,
    ) -> Result<StoreRecord> {
        plan.validate()?;
        let store = StoreRecord::new(StoreId::generate(), owner, name, plan, self.access.now());
        self.access.repository().insert(&store).await?;

        info!(
            store_id = %store.id,
            owner_id = %store.owner_id,
            plan = %store.plan.id,
            expires_at = %store.expires_at,
            "Store opened"
        );
        Ok(store)
    }

    pub async fn get_store(&self, id: &StoreId) -> Result<StoreRecord> {
        self.access.load(id).await
    }

    /// Rename the store. Lifecycle fields are untouched.
    pub async fn update_store_profile(
        &self,
        id: &StoreId,
        name: impl Into<String>,
    ) -> Result<StoreRecord> {
        let name = name.into();
        let mutation = self
            .access
            .mutate(id, |store| {
                store.name.clone_from(&name);
                Ok(())
            })
            .await?;
        Ok(mutation.store)
    }

    /// Owner deletion. Archives the store; calling it again is a no-op.
    pub async fn delete_store(&self, id: &StoreId) -> Result<StoreRecord> {
        let now = self.access.now();
        let engine = &self.engine;
        let mutation = self
            .access
            .mutate(id, |store| Ok(engine.archive(store, now)))
            .await?;

        if let Some(change) = mutation.output {
            info!(store_id = %id, from = %change.from, "Store deleted by owner");
        }
        Ok(mutation.store)
    }

    /// Add `user` to the store's followers. Returns `false` if already following.
    pub async fn follow_store(&self, id: &StoreId, user: &UserId) -> Result<bool> {
        let mutation = self
            .access
            .mutate(id, |store| Ok(store.followers.insert(user.clone())))
            .await?;
        Ok(mutation.output)
    }

    /// Remove `user` from the store's followers. Returns `false` if not following.
    pub async fn unfollow_store(&self, id: &StoreId, user: &UserId) -> Result<bool> {
        let mutation = self
            .access
            .mutate(id, |store| Ok(store.followers.remove(user)))
            .await?;
        Ok(mutation.output)
    }

    /// Record a 1-5 star rating.
    pub async fn rate_store(&self, id: &StoreId, rating: u8) -> Result<StoreRecord> {
        if !(1..=5).contains(&rating) {
            return Err(DomainError::InvalidRating { rating }.into());
        }
        let mutation = self
            .access
            .mutate(id, |store| {
                store.rating_sum += u64::from(rating);
                store.rating_count += 1;
                Ok(())
            })
            .await?;
        Ok(mutation.store)
    }
}
