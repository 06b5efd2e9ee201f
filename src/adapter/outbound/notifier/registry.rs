//! Fan one notification out to several sinks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::port::outbound::{Notification, NotificationSink};

/// Pushes each notification to every registered sink.
///
/// All sinks are attempted; the push fails if any of them failed.
#[derive(Default)]
pub struct SinkRegistry {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, sink: Arc<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl NotificationSink for SinkRegistry {
    async fn push(&self, notification: Notification) -> Result<()> {
        let mut failures = Vec::new();
        for sink in &self.sinks {
            if let Err(e) = sink.push(notification.clone()).await {
                failures.push(e.to_string());
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Notification(failures.join("; ")))
        }
    }
}
