use anyhow::Context;
use clap::Parser;
use tracing::info;

use storefront::adapter::inbound::cli::command::{Cli, Commands};
use storefront::adapter::inbound::cli::{discounts, run, status, sweep, usage};
use storefront::app::AppContext;
use storefront::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    config.logging.init();
    info!(version = env!("CARGO_PKG_VERSION"), "storefront starting");

    let app = AppContext::from_config(config).context("failed to initialise storefront")?;

    match &cli.command {
        Commands::Run => run::execute(&app).await?,
        Commands::Sweep => sweep::execute(&app, cli.json).await?,
        Commands::Status(arg) => status::execute(&app, &arg.store_id, cli.json).await?,
        Commands::Usage(arg) => usage::execute(&app, &arg.store_id, cli.json).await?,
        Commands::Discounts(arg) => discounts::execute(&app, &arg.store_id, cli.json).await?,
    }

    Ok(())
}
