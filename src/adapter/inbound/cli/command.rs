//! Command-line interface definitions.
//!
//! Defines the CLI structure for the storefront service using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Store lifecycle, quota and discount engine
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the lifecycle sweeper until interrupted
    Run,

    /// Run one lifecycle sweep over every store and exit
    Sweep,

    /// Show a store's expiration status
    Status(StoreArg),

    /// Show a store's ad slot usage
    Usage(StoreArg),

    /// List a store's discounted listings
    Discounts(StoreArg),
}

/// A single store ID argument.
#[derive(Args, Debug)]
pub struct StoreArg {
    /// Store ID
    pub store_id: String,
}
