//! SQLite store repository.
//!
//! Timestamps are stored as RFC 3339 text, decimals as text and sets as
//! JSON arrays. A row that cannot be decoded surfaces as
//! [`Error::MalformedRecord`] rather than a generic database error.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::StoreRow;
use crate::adapter::outbound::sqlite::database::schema::stores;
use crate::domain::{ListingId, Plan, PlanId, StoreId, StoreRecord, StoreStatus, UserId};
use crate::error::{Error, Result};
use crate::port::outbound::StoreRepository;

/// SQLite-backed store repository.
pub struct SqliteStoreRepository {
    pool: DbPool,
}

impl SqliteStoreRepository {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(store: &StoreRecord) -> Result<StoreRow> {
        Ok(StoreRow {
            id: store.id.to_string(),
            owner_id: store.owner_id.to_string(),
            name: store.name.clone(),
            plan_id: store.plan.id.to_string(),
            plan_duration_days: to_i32("plan_duration_days", store.plan.duration_days)?,
            plan_max_ads: to_i32("plan_max_ads", store.plan.max_ads)?,
            plan_price: store.plan.price.to_string(),
            ads_used: Some(to_i32("ads_used", store.ads_used)?),
            max_ads: Some(to_i32("max_ads", store.max_ads)?),
            deleted_listings: serde_json::to_string(&store.deleted_listings)?,
            is_active: store.is_active,
            status: store.status.as_str().to_string(),
            created_at: store.created_at.to_rfc3339(),
            expires_at: store.expires_at.to_rfc3339(),
            grace_period_ends_at: store.grace_period_ends_at.map(|t| t.to_rfc3339()),
            deactivated_at: store.deactivated_at.map(|t| t.to_rfc3339()),
            archived_at: store.archived_at.map(|t| t.to_rfc3339()),
            last_notification_at: store.last_notification_at.map(|t| t.to_rfc3339()),
            followers: serde_json::to_string(&store.followers)?,
            rating_sum: to_i64("rating_sum", store.rating_sum)?,
            rating_count: to_i64("rating_count", store.rating_count)?,
            version: to_i64("version", store.version)?,
        })
    }

    fn from_row(row: StoreRow) -> Result<StoreRecord> {
        let id = StoreId::new(row.id);
        let decoder = RowDecoder { id: &id };

        let plan = Plan {
            id: PlanId::new(row.plan_id),
            duration_days: RowDecoder::count(Some(row.plan_duration_days)),
            max_ads: RowDecoder::count(Some(row.plan_max_ads)),
            price: row
                .plan_price
                .parse::<Decimal>()
                .map_err(|e| decoder.malformed("plan_price", e))?,
        };
        let status: StoreStatus = row
            .status
            .parse()
            .map_err(|e: String| decoder.malformed("status", e))?;
        let deleted_listings: BTreeSet<ListingId> = serde_json::from_str(&row.deleted_listings)
            .map_err(|e| decoder.malformed("deleted_listings", e))?;
        let followers: BTreeSet<UserId> = serde_json::from_str(&row.followers)
            .map_err(|e| decoder.malformed("followers", e))?;

        Ok(StoreRecord {
            owner_id: UserId::new(row.owner_id),
            name: row.name,
            plan,
            ads_used: RowDecoder::count(row.ads_used),
            max_ads: RowDecoder::count(row.max_ads),
            deleted_listings,
            is_active: row.is_active,
            status,
            created_at: decoder.time("created_at", &row.created_at)?,
            expires_at: decoder.time("expires_at", &row.expires_at)?,
            grace_period_ends_at: decoder.optional_time("grace_period_ends_at", row.grace_period_ends_at)?,
            deactivated_at: decoder.optional_time("deactivated_at", row.deactivated_at)?,
            archived_at: decoder.optional_time("archived_at", row.archived_at)?,
            last_notification_at: decoder.optional_time("last_notification_at", row.last_notification_at)?,
            followers,
            rating_sum: RowDecoder::wide(row.rating_sum),
            rating_count: RowDecoder::wide(row.rating_count),
            version: RowDecoder::wide(row.version),
            id,
        })
    }
}

#[async_trait]
impl StoreRepository for SqliteStoreRepository {
    async fn get(&self, id: &StoreId) -> Result<Option<StoreRecord>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row: Option<StoreRow> = stores::table
            .find(id.as_str())
            .select(StoreRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn insert(&self, store: &StoreRecord) -> Result<()> {
        let row = Self::to_row(store)?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::insert_into(stores::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn compare_and_swap(&self, store: &StoreRecord, expected_version: u64) -> Result<bool> {
        let mut row = Self::to_row(store)?;
        let expected = to_i64("version", expected_version)?;
        row.version = expected + 1;

        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let updated = diesel::update(
            stores::table
                .filter(stores::id.eq(&row.id))
                .filter(stores::version.eq(expected)),
        )
        .set(&row)
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(updated == 1)
    }

    async fn list_ids(&self) -> Result<Vec<StoreId>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let ids: Vec<String> = stores::table
            .select(stores::id)
            .order(stores::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(ids.into_iter().map(StoreId::from).collect())
    }
}

fn to_i32(field: &str, value: u32) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::Database(format!("{field} out of range: {value}")))
}

fn to_i64(field: &str, value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| Error::Database(format!("{field} out of range: {value}")))
}

/// Field decoding that reports failures against the row's store ID.
struct RowDecoder<'a> {
    id: &'a StoreId,
}

impl RowDecoder<'_> {
    fn malformed(&self, field: &str, reason: impl std::fmt::Display) -> Error {
        Error::MalformedRecord {
            store_id: self.id.clone(),
            reason: format!("{field}: {reason}"),
        }
    }

    fn time(&self, field: &str, value: &str) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| self.malformed(field, e))
    }

    fn optional_time(&self, field: &str, value: Option<String>) -> Result<Option<DateTime<Utc>>> {
        value.map(|v| self.time(field, &v)).transpose()
    }

    /// Counter value; `NULL` and negatives read as zero.
    fn count(value: Option<i32>) -> u32 {
        u32::try_from(value.unwrap_or(0)).unwrap_or(0)
    }

    fn wide(value: i64) -> u64 {
        u64::try_from(value).unwrap_or(0)
    }
}
