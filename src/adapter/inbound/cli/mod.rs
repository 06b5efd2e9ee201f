//! CLI module graph.

pub mod command;
pub mod discounts;
pub mod output;
pub mod run;
pub mod status;
pub mod sweep;
pub mod usage;
