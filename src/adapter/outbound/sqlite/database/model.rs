//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{listings, notifications, stores};

/// Database row for a store.
///
/// Counters are nullable for rows written before they existed; `NULL`
/// reads back as zero.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = stores)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StoreRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub plan_id: String,
    pub plan_duration_days: i32,
    pub plan_max_ads: i32,
    pub plan_price: String,
    pub ads_used: Option<i32>,
    pub max_ads: Option<i32>,
    pub deleted_listings: String,
    pub is_active: bool,
    pub status: String,
    pub created_at: String,
    pub expires_at: String,
    pub grace_period_ends_at: Option<String>,
    pub deactivated_at: Option<String>,
    pub archived_at: Option<String>,
    pub last_notification_at: Option<String>,
    pub followers: String,
    pub rating_sum: i64,
    pub rating_count: i64,
    pub version: i64,
}

/// Database row for a listing.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ListingRow {
    pub id: String,
    pub store_id: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percentage: Option<i32>,
    pub has_discount: bool,
    pub price_by_agreement: bool,
    pub deleted_at: Option<String>,
}

/// Database row for a notification (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow {
    pub id: String,
    pub recipient: String,
    pub store_id: String,
    pub kind: String,
    pub message: String,
    pub created_at: String,
}

/// Database row for a notification (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationRow {
    pub seq: Option<i32>,
    pub id: String,
    pub recipient: String,
    pub store_id: String,
    pub kind: String,
    pub message: String,
    pub created_at: String,
}
