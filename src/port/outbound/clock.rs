//! Time source port.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Every lifecycle decision is a function of `now`; taking it from a port
/// lets tests drive the calendar.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
