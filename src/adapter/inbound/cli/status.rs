//! Handler for the `status` command.

use super::output::{self, or_dash, FieldRow};
use crate::app::AppContext;
use crate::application::ExpirationReport;
use crate::domain::StoreId;
use crate::error::Result;

/// Print a store's expiration info.
pub async fn execute(app: &AppContext, store_id: &str, json: bool) -> Result<()> {
    let id = StoreId::new(store_id);
    let report = app.lifecycle.get_expiration_info(&id).await?;

    if json {
        return output::json(&report);
    }

    output::header(&format!("Store {id}"));
    match report {
        ExpirationReport::Available(info) => output::table(vec![
            FieldRow::new("Status", info.status),
            FieldRow::new("Expires at", info.expires_at),
            FieldRow::new("Grace period ends", or_dash(info.grace_period_ends_at)),
            FieldRow::new("Deactivated at", or_dash(info.deactivated_at)),
            FieldRow::new("Days until expiration", info.days_until_expiration),
            FieldRow::new("Days in grace period", info.days_in_grace_period),
            FieldRow::new("Days since deactivation", info.days_since_deactivation),
            FieldRow::new("Can reactivate", info.can_reactivate),
            FieldRow::new("Next action", info.next_action),
        ]),
        ExpirationReport::Unavailable { reason } => {
            println!("  Expiration info unavailable: {reason}");
        }
    }
    Ok(())
}
