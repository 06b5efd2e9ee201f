//! SQLite notification feed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{NewNotificationRow, NotificationRow};
use crate::adapter::outbound::sqlite::database::schema::notifications;
use crate::domain::{StoreId, UserId};
use crate::error::{Error, Result};
use crate::port::outbound::{Notification, NotificationSink};

/// Persistent, append-only per-user feed.
pub struct SqliteNotificationFeed {
    pool: DbPool,
}

impl SqliteNotificationFeed {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Notifications for `user` in the order they were pushed.
    pub fn feed_for(&self, user: &UserId) -> Result<Vec<Notification>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<NotificationRow> = notifications::table
            .filter(notifications::recipient.eq(user.as_str()))
            .order(notifications::seq.asc())
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    fn from_row(row: NotificationRow) -> Result<Notification> {
        let id = Uuid::parse_str(&row.id).map_err(|e| Error::Database(e.to_string()))?;
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| Error::Database(e.to_string()))?
            .with_timezone(&Utc);

        Ok(Notification {
            id,
            recipient: UserId::new(row.recipient),
            store_id: StoreId::new(row.store_id),
            kind: serde_json::from_str(&row.kind)?,
            message: row.message,
            created_at,
        })
    }
}

#[async_trait]
impl NotificationSink for SqliteNotificationFeed {
    async fn push(&self, notification: Notification) -> Result<()> {
        let row = NewNotificationRow {
            id: notification.id.to_string(),
            recipient: notification.recipient.to_string(),
            store_id: notification.store_id.to_string(),
            kind: serde_json::to_string(&notification.kind)?,
            message: notification.message,
            created_at: notification.created_at.to_rfc3339(),
        };

        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::insert_into(notifications::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}
