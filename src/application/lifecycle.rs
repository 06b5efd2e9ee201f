//! Store lifecycle use cases: status checks, renewal, expiration info and
//! the bulk sweep.
//!
//! On-demand checks and the periodic sweep both go through
//! [`LifecycleService::update_store_status`], which applies the one
//! transition function inside an optimistic update. Whichever caller
//! lands first performs the transition; the other reloads and finds
//! nothing left to do.

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use super::access::StoreAccess;
use super::notification::NotificationScheduler;
use crate::domain::{
    ExpirationInfo, LifecycleEngine, Plan, StatusChange, StoreAlert, StoreId, StoreRecord,
    StoreStatus,
};
use crate::error::{Error, Result};

/// Default number of stores processed concurrently by a sweep.
pub const DEFAULT_SWEEP_CONCURRENCY: usize = 8;

/// Result of applying the lifecycle to one store.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub store: StoreRecord,
    pub change: Option<StatusChange>,
    pub alert: Option<StoreAlert>,
}

/// Expiration info, or why it cannot be computed for a store that exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "availability", rename_all = "snake_case")]
pub enum ExpirationReport {
    Available(ExpirationInfo),
    Unavailable { reason: String },
}

impl ExpirationReport {
    #[must_use]
    pub fn info(&self) -> Option<&ExpirationInfo> {
        match self {
            Self::Available(info) => Some(info),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Totals for one sweep over every store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub scanned: usize,
    pub transitioned: usize,
    pub alerted: usize,
    pub failed: usize,
}

/// Lifecycle service over the store repository.
pub struct LifecycleService {
    access: StoreAccess,
    engine: LifecycleEngine,
    scheduler: NotificationScheduler,
    sweep_concurrency: usize,
}

impl LifecycleService {
    pub fn new(
        access: StoreAccess,
        engine: LifecycleEngine,
        scheduler: NotificationScheduler,
    ) -> Self {
        Self {
            access,
            engine,
            scheduler,
            sweep_concurrency: DEFAULT_SWEEP_CONCURRENCY,
        }
    }

    #[must_use]
    pub fn with_sweep_concurrency(mut self, concurrency: usize) -> Self {
        self.sweep_concurrency = concurrency.max(1);
        self
    }

    pub fn engine(&self) -> &LifecycleEngine {
        &self.engine
    }

    /// Bring the store's persisted status up to date and fire any alert
    /// that became due.
    pub async fn update_store_status(&self, id: &StoreId) -> Result<StatusUpdate> {
        let now = self.access.now();
        let engine = &self.engine;
        let scheduler = &self.scheduler;

        let mutation = self
            .access
            .mutate(id, |store| {
                let change = engine.apply_status_transition(store, now);
                let alert = scheduler.claim(store, engine, now);
                Ok((change, alert))
            })
            .await?;
        let (change, alert) = mutation.output;

        if let Some(change) = change {
            info!(
                store_id = %id,
                from = %change.from,
                to = %change.to,
                "Store status changed"
            );
        }
        if let Some(alert) = alert {
            self.scheduler.dispatch(&mutation.store, alert, now);
        }

        Ok(StatusUpdate {
            store: mutation.store,
            change,
            alert,
        })
    }

    /// Current status of the store, applying any pending transition.
    pub async fn check_store_status(&self, id: &StoreId) -> Result<StoreStatus> {
        Ok(self.update_store_status(id).await?.store.status)
    }

    /// Start a new plan period. Rejected for archived stores.
    pub async fn renew_store(&self, id: &StoreId, plan: Plan) -> Result<StoreRecord> {
        let now = self.access.now();
        let engine = &self.engine;

        let mutation = self
            .access
            .mutate(id, |store| Ok(engine.renew(store, plan.clone(), now)?))
            .await?;

        info!(
            store_id = %id,
            from = %mutation.output.from,
            plan = %mutation.store.plan.id,
            expires_at = %mutation.store.expires_at,
            "Store renewed"
        );
        Ok(mutation.store)
    }

    /// Renew a deactivated store.
    pub async fn reactivate_store(&self, id: &StoreId, plan: Plan) -> Result<StoreRecord> {
        let now = self.access.now();
        let engine = &self.engine;

        let mutation = self
            .access
            .mutate(id, |store| Ok(engine.reactivate(store, plan.clone(), now)?))
            .await?;

        info!(
            store_id = %id,
            plan = %mutation.store.plan.id,
            expires_at = %mutation.store.expires_at,
            "Store reactivated"
        );
        Ok(mutation.store)
    }

    /// Read-only expiration projection.
    ///
    /// Only a missing store is an error; a store whose record cannot be
    /// decoded reports [`ExpirationReport::Unavailable`].
    pub async fn get_expiration_info(&self, id: &StoreId) -> Result<ExpirationReport> {
        let now = self.access.now();
        match self.access.load(id).await {
            Ok(store) => Ok(match self.engine.expiration_info(&store, now) {
                Some(info) => ExpirationReport::Available(info),
                None => {
                    warn!(store_id = %id, status = %store.status, "Store lifecycle timestamps are incomplete");
                    ExpirationReport::Unavailable {
                        reason: format!("{} store is missing its lifecycle timestamps", store.status),
                    }
                }
            }),
            Err(Error::MalformedRecord { reason, .. }) => {
                warn!(store_id = %id, reason = %reason, "Cannot compute expiration info");
                Ok(ExpirationReport::Unavailable { reason })
            }
            Err(e) => Err(e),
        }
    }

    /// Apply the lifecycle to every store.
    ///
    /// A failure on one store is logged and counted; it never stops the sweep.
    pub async fn sweep(&self) -> Result<SweepReport> {
        let ids = self.access.repository().list_ids().await?;
        let mut report = SweepReport {
            scanned: ids.len(),
            ..SweepReport::default()
        };

        let mut updates = stream::iter(ids)
            .map(|id| async move {
                let result = self.update_store_status(&id).await;
                (id, result)
            })
            .buffer_unordered(self.sweep_concurrency);

        while let Some((id, result)) = updates.next().await {
            match result {
                Ok(update) => {
                    if update.change.is_some() {
                        report.transitioned += 1;
                    }
                    if update.alert.is_some() {
                        report.alerted += 1;
                    }
                }
                Err(e) => {
                    warn!(store_id = %id, error = %e, "Lifecycle update failed");
                    report.failed += 1;
                }
            }
        }

        info!(
            scanned = report.scanned,
            transitioned = report.transitioned,
            alerted = report.alerted,
            failed = report.failed,
            "Lifecycle sweep finished"
        );
        Ok(report)
    }
}
