//! SQLite listing repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::ListingRow;
use crate::adapter::outbound::sqlite::database::schema::listings;
use crate::domain::{Listing, ListingId, StoreId};
use crate::error::{Error, Result};
use crate::port::outbound::ListingRepository;

/// SQLite-backed listing repository.
pub struct SqliteListingRepository {
    pool: DbPool,
}

impl SqliteListingRepository {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(listing: &Listing) -> ListingRow {
        ListingRow {
            id: listing.id.to_string(),
            store_id: listing.store_id.to_string(),
            price: listing.price.to_string(),
            original_price: listing.original_price.map(|p| p.to_string()),
            discount_percentage: listing.discount_percentage.map(i32::from),
            has_discount: listing.has_discount,
            price_by_agreement: listing.price_by_agreement,
            deleted_at: listing.deleted_at.map(|t| t.to_rfc3339()),
        }
    }

    fn from_row(row: ListingRow) -> Result<Listing> {
        let parse_price = |value: &str| {
            value
                .parse::<Decimal>()
                .map_err(|e| Error::Database(format!("listing {}: bad price {value}: {e}", row.id)))
        };

        let price = parse_price(&row.price)?;
        let original_price = row.original_price.as_deref().map(parse_price).transpose()?;
        let discount_percentage = row
            .discount_percentage
            .map(u8::try_from)
            .transpose()
            .map_err(|e| Error::Database(format!("listing {}: bad discount: {e}", row.id)))?;
        let deleted_at = row
            .deleted_at
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
            .transpose()
            .map_err(|e| Error::Database(format!("listing {}: bad deleted_at: {e}", row.id)))?
            .map(|t| t.with_timezone(&Utc));

        Ok(Listing {
            id: ListingId::new(row.id),
            store_id: StoreId::new(row.store_id),
            price,
            original_price,
            discount_percentage,
            has_discount: row.has_discount,
            price_by_agreement: row.price_by_agreement,
            deleted_at,
        })
    }
}

#[async_trait]
impl ListingRepository for SqliteListingRepository {
    async fn get(&self, id: &ListingId) -> Result<Option<Listing>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row: Option<ListingRow> = listings::table
            .find(id.as_str())
            .select(ListingRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Listing>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<ListingRow> = listings::table
            .filter(listings::store_id.eq(store_id.as_str()))
            .order(listings::id.asc())
            .select(ListingRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn save(&self, listing: &Listing) -> Result<()> {
        let row = Self::to_row(listing);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::replace_into(listings::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}
