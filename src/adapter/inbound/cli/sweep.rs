//! Handler for the `sweep` command.

use super::output::{self, FieldRow};
use crate::app::AppContext;
use crate::error::Result;

/// Run one sweep and print its report.
pub async fn execute(app: &AppContext, json: bool) -> Result<()> {
    let report = app.lifecycle.sweep().await?;

    if json {
        return output::json(&report);
    }

    output::header("Lifecycle sweep");
    output::table(vec![
        FieldRow::new("Scanned", report.scanned),
        FieldRow::new("Transitioned", report.transitioned),
        FieldRow::new("Alerted", report.alerted),
        FieldRow::new("Failed", report.failed),
    ]);
    Ok(())
}
