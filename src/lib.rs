//! Storefront - store lifecycle, ad quota and discount engine for a
//! classifieds marketplace.
//!
//! A store is opened on a paid plan that grants a number of ad slots for a
//! fixed period. When the plan runs out the store enters a grace period,
//! then is deactivated, and is finally archived. Owners are warned before
//! each step and followers hear about new listings.
//!
//! # Modules
//!
//! - [`domain`] - Pure rules: lifecycle state machine, quota, discount math, alert policy
//! - [`port`] - Outbound interfaces: repositories, notification sink, clock
//! - [`application`] - Use cases with optimistic per-store updates
//! - [`adapter`] - In-memory and SQLite repositories, notification sinks, CLI
//! - [`app`] - Service wiring
//! - [`config`] - TOML configuration and logging setup
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use storefront::app::AppContext;
//! use storefront::config::Config;
//! use storefront::domain::{Plan, PlanId, UserId};
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> storefront::error::Result<()> {
//! let (app, _feed) = AppContext::in_memory(Config::default());
//! let plan = Plan::try_new(PlanId::new("basic"), 30, 10, Decimal::new(999, 2))?;
//! let store = app.stores.open_store(UserId::new("owner-1"), "Corner Shop", plan).await?;
//! let status = app.lifecycle.check_store_status(&store.id).await?;
//! println!("{status}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
