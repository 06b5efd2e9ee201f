mod support;

use std::sync::Arc;

use chrono::Duration;

use storefront::domain::{DomainError, ListingId, StoreAlert, StoreStatus};
use storefront::error::Error;
use storefront::port::outbound::NotificationKind;
use storefront::testkit::config::test_config;
use storefront::testkit::domain::{epoch, user};
use storefront::testkit::harness::TestHarness;
use storefront::testkit::sink::FailingSink;
use support::wait::{settle, DELIVERY_TIMEOUT};

#[tokio::test]
async fn owner_is_warned_a_week_before_expiry() {
    let h = TestHarness::new();
    let store = h.open_store(30, 5).await.unwrap();

    h.advance_days(23);
    let update = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert!(update.alert.is_some());
    assert!(h.sink.wait_for(1, DELIVERY_TIMEOUT).await);

    let sent = h.sink.for_recipient(&user("owner-1"));
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, NotificationKind::ExpiryWarning { days_left: 7 });
    assert_eq!(sent[0].store_id, store.id);
    assert!(sent[0].message.contains("expires in 7 days"));
}

#[tokio::test]
async fn cooldown_suppresses_repeat_alerts() {
    let h = TestHarness::new();
    let store = h.open_store(30, 5).await.unwrap();

    h.advance_days(23);
    h.app.lifecycle.check_store_status(&store.id).await.unwrap();
    h.clock.advance(Duration::hours(6));
    let update = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert!(update.alert.is_none());

    settle().await;
    assert_eq!(h.sink.len(), 1);
}

#[tokio::test]
async fn days_between_thresholds_send_nothing() {
    let h = TestHarness::new();
    let store = h.open_store(30, 5).await.unwrap();

    h.advance_days(25);
    let update = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert!(update.alert.is_none());

    h.advance_days(2);
    let update = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert!(update.alert.is_some());
    assert!(h.sink.wait_for(1, DELIVERY_TIMEOUT).await);
    assert_eq!(
        h.sink.notifications()[0].kind,
        NotificationKind::ExpiryWarning { days_left: 3 }
    );
}

#[tokio::test]
async fn grace_and_deactivation_alerts_follow_the_lifecycle() {
    let h = TestHarness::new();
    let store = h.open_store(30, 5).await.unwrap();

    h.advance_days(30);
    h.clock.advance(Duration::hours(1));
    h.app.lifecycle.check_store_status(&store.id).await.unwrap();
    assert!(h.sink.wait_for(1, DELIVERY_TIMEOUT).await);

    h.advance_days(7);
    h.app.lifecycle.check_store_status(&store.id).await.unwrap();
    assert!(h.sink.wait_for(2, DELIVERY_TIMEOUT).await);

    let kinds: Vec<_> = h.sink.notifications().into_iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::GracePeriodStarted,
            NotificationKind::StoreDeactivated
        ]
    );
}

#[tokio::test]
async fn deactivation_alert_is_not_repeated_after_the_cooldown() {
    let h = TestHarness::new();
    let store = h.open_store(30, 5).await.unwrap();

    h.advance_days(30);
    h.clock.advance(Duration::hours(1));
    h.app.lifecycle.check_store_status(&store.id).await.unwrap();

    h.advance_days(7);
    let deactivated = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert_eq!(deactivated.alert, Some(StoreAlert::Deactivated));

    h.clock.advance(Duration::hours(13));
    let later = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert_eq!(later.store.status, StoreStatus::Deactivated);
    assert!(later.alert.is_none());

    let info = h.app.lifecycle.get_expiration_info(&store.id).await.unwrap();
    assert_eq!(info.info().unwrap().days_since_deactivation, 1);

    assert!(h.sink.wait_for(2, DELIVERY_TIMEOUT).await);
    settle().await;
    assert_eq!(h.sink.len(), 2);
}

#[tokio::test]
async fn grace_alert_is_not_repeated_on_its_first_day() {
    let h = TestHarness::new();
    let store = h.open_store(30, 5).await.unwrap();

    h.advance_days(30);
    h.clock.advance(Duration::hours(1));
    let first = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert_eq!(first.alert, Some(StoreAlert::GracePeriodStarted));

    h.clock.advance(Duration::hours(13));
    let later = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert_eq!(later.store.status, StoreStatus::GracePeriod);
    assert!(later.alert.is_none());

    assert!(h.sink.wait_for(1, DELIVERY_TIMEOUT).await);
    settle().await;
    assert_eq!(h.sink.len(), 1);
}

#[tokio::test]
async fn listing_added_at_expiry_sends_the_grace_alert() {
    let h = TestHarness::new();
    let store = h.open_store(30, 5).await.unwrap();

    h.advance_days(30);
    h.clock.advance(Duration::hours(1));
    h.app
        .quota
        .add_listing_to_store(&store.id, &ListingId::new("l-1"))
        .await
        .unwrap();

    assert!(h.sink.wait_for(1, DELIVERY_TIMEOUT).await);
    assert_eq!(
        h.sink.notifications()[0].kind,
        NotificationKind::GracePeriodStarted
    );

    let stored = h.store(&store.id).await.unwrap();
    assert_eq!(stored.status, StoreStatus::GracePeriod);
    assert_eq!(stored.ads_used, 1);
    assert_eq!(
        stored.last_notification_at,
        Some(epoch() + Duration::days(30) + Duration::hours(1))
    );

    let update = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert!(update.alert.is_none());
}

#[tokio::test]
async fn rejected_listing_still_records_the_deactivation() {
    let h = TestHarness::new();
    let store = h.open_store(30, 5).await.unwrap();

    h.advance_days(40);
    let err = h
        .app
        .quota
        .add_listing_to_store(&store.id, &ListingId::new("l-1"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::StoreUnavailable {
            status: StoreStatus::Deactivated
        })
    ));

    assert!(h.sink.wait_for(1, DELIVERY_TIMEOUT).await);
    assert_eq!(
        h.sink.notifications()[0].kind,
        NotificationKind::StoreDeactivated
    );
    assert_eq!(
        h.store(&store.id).await.unwrap().status,
        StoreStatus::Deactivated
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sweep_racing_status_checks_alerts_once() {
    let mut config = test_config();
    config.lifecycle.max_update_attempts = 50;
    let h = Arc::new(TestHarness::with_config(config));
    let store = h.open_store(30, 5).await.unwrap();
    h.advance_days(30);
    h.clock.advance(Duration::hours(1));

    let sweep = {
        let h = Arc::clone(&h);
        tokio::spawn(async move { h.app.lifecycle.sweep().await })
    };
    let mut checks = Vec::new();
    for _ in 0..8 {
        let h = Arc::clone(&h);
        let id = store.id.clone();
        checks.push(tokio::spawn(async move {
            h.app.lifecycle.update_store_status(&id).await
        }));
    }

    let report = sweep.await.unwrap().unwrap();
    let mut updates = Vec::new();
    for check in checks {
        updates.push(check.await.unwrap().unwrap());
    }

    let changes = report.transitioned + updates.iter().filter(|u| u.change.is_some()).count();
    let alerts = report.alerted + updates.iter().filter(|u| u.alert.is_some()).count();
    assert_eq!(changes, 1);
    assert_eq!(alerts, 1);

    let stored = h.store(&store.id).await.unwrap();
    assert_eq!(stored.status, StoreStatus::GracePeriod);
    assert_eq!(stored.grace_period_ends_at, Some(epoch() + Duration::days(37)));
    for update in &updates {
        assert_eq!(update.store, stored);
    }

    assert!(h.sink.wait_for(1, DELIVERY_TIMEOUT).await);
    settle().await;
    let sent = h.sink.notifications();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, NotificationKind::GracePeriodStarted);
}

#[tokio::test]
async fn cooldown_spans_alert_classes() {
    let h = TestHarness::new();
    let store = h.open_store(1, 5).await.unwrap();

    h.clock.advance(Duration::hours(23));
    let warning = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert_eq!(
        warning.alert,
        Some(StoreAlert::ExpiryWarning { days_left: 1 })
    );

    h.clock.advance(Duration::hours(2));
    let grace = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert!(grace.change.is_some());
    assert!(grace.alert.is_none());

    h.clock.advance(Duration::hours(11));
    let later = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert_eq!(
        later.alert,
        Some(StoreAlert::GracePeriodStarted)
    );

    assert!(h.sink.wait_for(2, DELIVERY_TIMEOUT).await);
    settle().await;
    assert_eq!(h.sink.len(), 2);
}

#[tokio::test]
async fn failing_sink_never_fails_the_status_check() {
    let sink = Arc::new(FailingSink::new());
    let h = TestHarness::with_sink(test_config(), sink.clone());
    let store = h.open_store(30, 5).await.unwrap();

    h.advance_days(23);
    let update = h.app.lifecycle.update_store_status(&store.id).await.unwrap();
    assert!(update.alert.is_some());
    assert!(sink.wait_for_attempts(1, DELIVERY_TIMEOUT).await);

    // The cooldown was still claimed.
    let stored = h.store(&store.id).await.unwrap();
    assert_eq!(stored.last_notification_at, Some(epoch() + Duration::days(23)));
}
