//! Handler for the `run` command.

use tokio::signal;
use tracing::info;

use crate::app::AppContext;
use crate::error::Result;

/// Run the lifecycle sweeper until Ctrl-C.
pub async fn execute(app: &AppContext) -> Result<()> {
    app.sweeper.start();
    info!("storefront running, press Ctrl-C to stop");

    signal::ctrl_c().await?;
    info!("Shutdown signal received");

    app.sweeper.stop().await;
    info!("storefront stopped");
    Ok(())
}
