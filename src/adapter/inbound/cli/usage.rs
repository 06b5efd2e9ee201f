//! Handler for the `usage` command.

use super::output::{self, FieldRow};
use crate::app::AppContext;
use crate::domain::StoreId;
use crate::error::Result;

/// Print a store's ad slot usage.
pub async fn execute(app: &AppContext, store_id: &str, json: bool) -> Result<()> {
    let id = StoreId::new(store_id);
    let usage = app.quota.get_store_usage(&id).await?;

    if json {
        return output::json(&usage);
    }

    output::header(&format!("Store {id}"));
    output::table(vec![
        FieldRow::new("Ads used", usage.used),
        FieldRow::new("Max ads", usage.max),
        FieldRow::new("Remaining", usage.remaining),
        FieldRow::new("Deleted early", usage.deleted),
    ]);
    Ok(())
}
