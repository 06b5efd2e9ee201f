mod support;

use std::time::Duration;

use storefront::domain::StoreStatus;
use storefront::testkit::config::test_config;
use storefront::testkit::harness::TestHarness;
use support::wait::DELIVERY_TIMEOUT;

#[tokio::test]
async fn sweep_reports_transitions_and_alerts() {
    let h = TestHarness::new();
    let fresh = h.open_store(60, 5).await.unwrap();
    let expiring = h.open_store(30, 5).await.unwrap();
    let lapsed = h.open_store(10, 5).await.unwrap();
    let warned = h.open_store(37, 5).await.unwrap();

    h.advance_days(30);
    h.clock.advance(chrono::Duration::hours(1));
    let report = h.app.lifecycle.sweep().await.unwrap();

    assert_eq!(report.scanned, 4);
    // expiring -> grace, lapsed -> deactivated
    assert_eq!(report.transitioned, 2);
    // grace start on `expiring`, deactivation on `lapsed`, 7-day warning on `warned`
    assert_eq!(report.alerted, 3);
    assert_eq!(report.failed, 0);

    assert_eq!(h.store(&fresh.id).await.unwrap().status, StoreStatus::Active);
    assert_eq!(
        h.store(&expiring.id).await.unwrap().status,
        StoreStatus::GracePeriod
    );
    assert_eq!(
        h.store(&lapsed.id).await.unwrap().status,
        StoreStatus::Deactivated
    );
    assert_eq!(h.store(&warned.id).await.unwrap().status, StoreStatus::Active);

    assert!(h.sink.wait_for(3, DELIVERY_TIMEOUT).await);
}

#[tokio::test]
async fn second_sweep_finds_nothing_to_do() {
    let h = TestHarness::new();
    h.open_store(10, 5).await.unwrap();
    h.advance_days(11);

    let first = h.app.lifecycle.sweep().await.unwrap();
    assert_eq!(first.transitioned, 1);

    let second = h.app.lifecycle.sweep().await.unwrap();
    assert_eq!(second.transitioned, 0);
    assert_eq!(second.alerted, 0);
}

#[tokio::test]
async fn empty_repository_sweeps_cleanly() {
    let h = TestHarness::new();
    let report = h.app.lifecycle.sweep().await.unwrap();
    assert_eq!(report, Default::default());
}

#[tokio::test]
async fn sweeper_starts_and_stops() {
    let h = TestHarness::new();
    let store = h.open_store(10, 5).await.unwrap();
    h.advance_days(11);

    assert!(!h.app.sweeper.is_running());
    h.app.sweeper.start();
    assert!(h.app.sweeper.is_running());

    // The first pass runs immediately.
    let mut status = StoreStatus::Active;
    for _ in 0..100 {
        status = h.store(&store.id).await.unwrap().status;
        if status != StoreStatus::Active {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(status, StoreStatus::GracePeriod);

    assert!(h.app.sweeper.stop().await);
    assert!(!h.app.sweeper.is_running());
}

#[tokio::test]
async fn restarting_replaces_the_running_task() {
    let h = TestHarness::new();

    h.app.sweeper.start();
    h.app.sweeper.start();
    assert!(h.app.sweeper.is_running());

    assert!(h.app.sweeper.stop().await);
    assert!(!h.app.sweeper.stop().await);
}

#[tokio::test]
async fn stopping_an_idle_sweeper_is_a_no_op() {
    let mut config = test_config();
    config.lifecycle.sweep_interval_secs = 3600;
    let h = TestHarness::with_config(config);

    assert!(!h.app.sweeper.stop().await);
}
