//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`clock`] - `ManualClock`, a settable time source.
//! - [`sink`] - `RecordingSink` and `FailingSink` notification sinks.
//! - [`domain`] - Builders for plans, stores and listings.
//! - [`config`] - Canonical test configuration.
//! - [`harness`] - `TestHarness`, a fully wired in-memory application.

pub mod clock;
pub mod config;
pub mod domain;
pub mod harness;
pub mod sink;
