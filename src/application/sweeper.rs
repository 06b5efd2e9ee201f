//! Periodic lifecycle sweep.
//!
//! The sweeper owns at most one background task. Starting it again replaces
//! the running task instead of adding a second timer.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::lifecycle::LifecycleService;

/// Default time between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

struct SweepTask {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Start/stop-able owner of the periodic lifecycle sweep.
pub struct LifecycleSweeper {
    lifecycle: Arc<LifecycleService>,
    interval: Duration,
    running: Mutex<Option<SweepTask>>,
}

impl LifecycleSweeper {
    pub fn new(lifecycle: Arc<LifecycleService>, interval: Duration) -> Self {
        Self {
            lifecycle,
            interval,
            running: Mutex::new(None),
        }
    }

    /// Spawn the sweep task, cancelling one that is already running.
    ///
    /// The first sweep runs immediately, then every `interval`.
    pub fn start(&self) {
        let mut running = self.running.lock();
        if let Some(previous) = running.take() {
            info!("Replacing running lifecycle sweep");
            previous.handle.abort();
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let lifecycle = Arc::clone(&self.lifecycle);
        let period = self.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        info!("Lifecycle sweep shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = lifecycle.sweep().await {
                            warn!(error = %e, "Lifecycle sweep failed");
                        }
                    }
                }
            }
        });

        info!(interval_secs = period.as_secs(), "Lifecycle sweep started");
        *running = Some(SweepTask {
            shutdown_tx,
            handle,
        });
    }

    /// Stop the sweep, letting an in-flight pass finish.
    ///
    /// Returns `false` if nothing was running.
    pub async fn stop(&self) -> bool {
        let task = self.running.lock().take();
        let Some(task) = task else {
            return false;
        };

        let _ = task.shutdown_tx.send(());
        if let Err(e) = task.handle.await {
            if !e.is_cancelled() {
                warn!(error = %e, "Lifecycle sweep task ended abnormally");
            }
        }
        true
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }
}

impl Drop for LifecycleSweeper {
    fn drop(&mut self) {
        if let Some(task) = self.running.get_mut().take() {
            task.handle.abort();
        }
    }
}
