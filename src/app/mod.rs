//! Application wiring: builds adapters and services from configuration.

mod context;

pub use context::{AppContext, Ports};
