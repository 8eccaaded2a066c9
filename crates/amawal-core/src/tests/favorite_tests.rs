use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use amawal_types::Source;
use tokio::sync::watch;

use super::mock_gateway::{Call, MockGateway, entry, eventually, session};
use crate::{AuthStatus, AuthStatusProvider, FavoriteTracker, ToggleOutcome};

fn tracker(gateway: &Arc<MockGateway>, auth: &AuthStatus) -> FavoriteTracker {
    FavoriteTracker::new(gateway.clone(), Arc::new(auth.clone()))
}

#[tokio::test]
async fn reconcile_reads_flags_from_backend() {
    let gateway = MockGateway::new();
    gateway.with_favorite("dictionary_aqelɛi", "1");
    let tracker = tracker(&gateway, &AuthStatus::new(true));

    let results = vec![
        entry(Source::Aqelei, "1", "aman"),
        entry(Source::Waryaghri, "2", "aman"),
        entry(Source::Verbs, "", "ddu"),
    ];
    tracker.reconcile(&results).await;

    let map = tracker.snapshot().await;
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("dictionary_aqelɛi:1"), Some(&true));
    assert_eq!(map.get("dictionary_waryaghri:2"), Some(&false));
    assert_eq!(map.get("verbs:ddu"), Some(&false));
    assert!(gateway.has_call(|call| *call == Call::Check("verbs".to_string(), "ddu".to_string())));
}

#[tokio::test]
async fn failed_check_defaults_to_false_without_blocking_others() {
    let gateway = MockGateway::new();
    gateway.with_favorite("dictionary_aqelɛi", "1");
    gateway.with_favorite("dictionary_waryaghri", "2");
    gateway.fail_check("2");
    let tracker = tracker(&gateway, &AuthStatus::new(true));

    tracker
        .reconcile(&[entry(Source::Aqelei, "1", "aman"), entry(Source::Waryaghri, "2", "aman")])
        .await;

    assert!(tracker.is_favorited("dictionary_aqelɛi:1").await);
    let map = tracker.snapshot().await;
    assert_eq!(map.get("dictionary_waryaghri:2"), Some(&false));
}

#[tokio::test]
async fn reconcile_is_idempotent() {
    let gateway = MockGateway::new();
    gateway.with_favorite("dictionary_aqelɛi", "1");
    let tracker = tracker(&gateway, &AuthStatus::new(true));
    let results = vec![entry(Source::Aqelei, "1", "aman"), entry(Source::Aqelei, "2", "amane")];

    tracker.reconcile(&results).await;
    let first = tracker.snapshot().await;
    tracker.reconcile(&results).await;

    assert_eq!(tracker.snapshot().await, first);
}

#[tokio::test]
async fn reconcile_when_logged_out_sends_nothing() {
    let gateway = MockGateway::new();
    let tracker = tracker(&gateway, &AuthStatus::new(false));

    tracker.reconcile(&[entry(Source::Aqelei, "1", "aman")]).await;

    assert_eq!(gateway.call_count(), 0);
    assert!(tracker.snapshot().await.is_empty());
}

#[tokio::test]
async fn check_landing_after_clear_is_dropped() {
    let gateway = MockGateway::new();
    gateway.with_favorite("dictionary_aqelɛi", "1");
    gateway.hold("1");
    let tracker = tracker(&gateway, &AuthStatus::new(true));

    let background = tracker.clone();
    let pending = tokio::spawn(async move {
        background
            .reconcile(&[entry(Source::Aqelei, "1", "aman")])
            .await
    });

    let g = &gateway;
    eventually(move || async move { g.call_count() == 1 }).await;

    tracker.clear().await;
    gateway.release("1");
    pending.await.unwrap();

    assert!(tracker.snapshot().await.is_empty());
}

#[tokio::test]
async fn toggle_requires_authentication() {
    let gateway = MockGateway::new();
    let tracker = tracker(&gateway, &AuthStatus::new(false));

    let outcome = tracker.toggle(&entry(Source::Aqelei, "1", "aman")).await;

    assert_eq!(outcome, ToggleOutcome::Unauthenticated);
    assert_eq!(gateway.call_count(), 0);
    assert!(tracker.snapshot().await.is_empty());
}

#[tokio::test]
async fn toggle_adds_then_removes() {
    let gateway = MockGateway::new();
    let tracker = tracker(&gateway, &AuthStatus::new(true));
    let aman = entry(Source::Waryaghri, "", "aman");

    assert_eq!(tracker.toggle(&aman).await, ToggleOutcome::Added);
    assert!(tracker.is_favorited(&aman.global_id).await);

    match &gateway.calls()[0] {
        Call::Add(request) => {
            assert_eq!(request.source_collection, "dictionary_waryaghri");
            assert_eq!(request.entry_id, "aman");
            assert_eq!(request.entry_word, "aman");
            assert_eq!(request.entry_translation, "aman (tr)");
            assert_eq!(request.entry_type, "noun");
        }
        other => panic!("Expected an add, got {:?}", other),
    }

    assert_eq!(tracker.toggle(&aman).await, ToggleOutcome::Removed);
    assert_eq!(tracker.snapshot().await.get(&aman.global_id), Some(&false));
    assert_eq!(
        gateway.calls()[1],
        Call::Remove(Source::Waryaghri, "aman".to_string())
    );
}

#[tokio::test]
async fn removal_reported_as_noop_keeps_flag() {
    let gateway = MockGateway::new();
    gateway.with_favorite("dictionary_aqelɛi", "1");
    let tracker = tracker(&gateway, &AuthStatus::new(true));
    let aman = entry(Source::Aqelei, "1", "aman");

    tracker.reconcile(std::slice::from_ref(&aman)).await;
    gateway.drop_favorite("dictionary_aqelɛi", "1");

    assert_eq!(tracker.toggle(&aman).await, ToggleOutcome::Unchanged);
    assert!(tracker.is_favorited(&aman.global_id).await);
}

#[tokio::test]
async fn failed_add_leaves_map_untouched() {
    let gateway = MockGateway::new();
    gateway.fail_writes();
    let tracker = tracker(&gateway, &AuthStatus::new(true));

    let outcome = tracker.toggle(&entry(Source::Aqelei, "1", "aman")).await;

    assert_eq!(outcome, ToggleOutcome::Failed);
    assert!(tracker.snapshot().await.is_empty());
}

#[tokio::test]
async fn search_annotates_results_with_favorites() {
    let gateway = MockGateway::new();
    gateway.with_results("aman", vec![entry(Source::Aqelei, "1", "aman")]);
    gateway.with_favorite("dictionary_aqelɛi", "1");
    let session = session(&gateway, &AuthStatus::new(true));

    session.search("aman").await;

    assert!(session.is_favorited("dictionary_aqelɛi:1").await);
}

#[tokio::test]
async fn logout_clears_favorites_immediately() {
    let gateway = MockGateway::new();
    gateway.with_results("aman", vec![entry(Source::Aqelei, "x", "aman")]);
    gateway.with_favorite("dictionary_aqelɛi", "x");
    let auth = AuthStatus::new(true);
    let session = session(&gateway, &auth);
    session.start().await;

    session.search("aman").await;
    assert_eq!(session.favorites().snapshot().await.len(), 1);

    auth.set(false);

    let s = &session;
    eventually(move || async move { s.favorites().snapshot().await.is_empty() }).await;
}

#[tokio::test]
async fn login_reloads_favorites_for_current_results() {
    let gateway = MockGateway::new();
    gateway.with_results("aman", vec![entry(Source::Aqelei, "x", "aman")]);
    gateway.with_favorite("dictionary_aqelɛi", "x");
    let auth = AuthStatus::new(false);
    let session = session(&gateway, &auth);
    session.start().await;

    session.search("aman").await;
    assert!(session.favorites().snapshot().await.is_empty());

    auth.set(true);

    let s = &session;
    eventually(move || async move { s.is_favorited("dictionary_aqelɛi:x").await }).await;
}

#[tokio::test]
async fn shutdown_stops_listening_to_auth() {
    let gateway = MockGateway::new();
    gateway.with_results("aman", vec![entry(Source::Aqelei, "x", "aman")]);
    gateway.with_favorite("dictionary_aqelɛi", "x");
    let auth = AuthStatus::new(true);
    let session = session(&gateway, &auth);
    session.start().await;
    session.search("aman").await;

    session.shutdown();
    tokio::task::yield_now().await;
    auth.set(false);
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    assert_eq!(session.favorites().snapshot().await.len(), 1);
}

/// Reports logged in once, then the user is logged out right behind that check
struct LogoutAfterFirstCheck {
    status: AuthStatus,
    checked: AtomicBool,
}

impl LogoutAfterFirstCheck {
    fn new() -> Self {
        Self {
            status: AuthStatus::new(true),
            checked: AtomicBool::new(false),
        }
    }
}

impl AuthStatusProvider for LogoutAfterFirstCheck {
    fn is_authenticated(&self) -> bool {
        let authenticated = self.status.is_authenticated();
        if !self.checked.swap(true, Ordering::SeqCst) {
            self.status.set(false);
        }
        authenticated
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.status.subscribe()
    }
}

#[tokio::test]
async fn reconcile_writes_nothing_after_logout_behind_auth_check() {
    let gateway = MockGateway::new();
    gateway.with_favorite("dictionary_aqelɛi", "1");
    let tracker = FavoriteTracker::new(gateway.clone(), Arc::new(LogoutAfterFirstCheck::new()));

    tracker
        .reconcile(&[entry(Source::Aqelei, "1", "aman")])
        .await;

    assert!(gateway.has_call(|call| matches!(call, Call::Check(..))));
    assert!(tracker.snapshot().await.is_empty());
}

#[tokio::test]
async fn check_landing_after_logout_is_dropped() {
    let gateway = MockGateway::new();
    gateway.with_favorite("dictionary_aqelɛi", "1");
    gateway.hold("1");
    let auth = AuthStatus::new(true);
    let tracker = tracker(&gateway, &auth);

    let background = tracker.clone();
    let pending = tokio::spawn(async move {
        background
            .reconcile(&[entry(Source::Aqelei, "1", "aman")])
            .await
    });

    let g = &gateway;
    eventually(move || async move { g.call_count() == 1 }).await;

    // No listener here, so nothing clears the map for us
    auth.set(false);
    gateway.release("1");
    pending.await.unwrap();

    assert!(tracker.snapshot().await.is_empty());
}

#[tokio::test]
async fn toggle_landing_after_logout_leaves_map_empty() {
    let gateway = MockGateway::new();
    gateway.hold("1");
    let auth = AuthStatus::new(true);
    let tracker = tracker(&gateway, &auth);
    let aman = entry(Source::Aqelei, "1", "aman");

    let background = tracker.clone();
    let toggled = aman.clone();
    let pending = tokio::spawn(async move { background.toggle(&toggled).await });

    let g = &gateway;
    eventually(move || async move { g.has_call(|call| matches!(call, Call::Add(_))) }).await;

    auth.set(false);
    gateway.release("1");

    assert_eq!(pending.await.unwrap(), ToggleOutcome::Added);
    assert!(!tracker.is_favorited(&aman.global_id).await);
    assert!(tracker.snapshot().await.is_empty());
}
