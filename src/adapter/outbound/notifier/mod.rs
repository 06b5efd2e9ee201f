//! Notification sink adapters.
//!
//! Implements the `port::outbound::NotificationSink` trait for the log and
//! for fanning one notification out to several sinks.

pub mod log;
pub mod registry;

pub use log::LogNotificationSink;
pub use registry::SinkRegistry;
