use std::time::Duration;

/// Upper bound for background notification delivery in tests.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Let detached tasks run to completion.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    tokio::time::sleep(Duration::from_millis(20)).await;
}
