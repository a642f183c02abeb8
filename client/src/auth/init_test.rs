use super::*;
use crate::auth::guard::{GuardOutcome, RouteGuard, run_guard};
use crate::auth::store::AuthStore;
use crate::auth::tokens::TokenStore;
use crate::net::types::{UserType, normalize_user};
use crate::state::auth::{AUTH_STORAGE_KEY, AuthState, encode_snapshot};
use crate::state::toast::ToastState;
use crate::testing::{Harness, RecordingSleeper, cell};
use crate::util::persistence::KeyValueStore;
use serde_json::json;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    futures::executor::block_on(future)
}

#[test]
fn existing_session_initializes_without_check_or_delay() {
    let h = Harness::with_tokens("a", "r");
    let store = AuthStore::new(cell(AuthState::default()), cell(ToastState::default()), h.client.clone(), h.storage())
        .client_side(true);
    h.transport.ok(json!({"id": 1, "user_type": "doctor"}));
    assert!(block_on(store.check_auth()));
    let sleeper = RecordingSleeper::default();

    assert!(block_on(initialize_session(&store, &sleeper)));

    assert_eq!(h.transport.requests().len(), 1);
    assert!(sleeper.recorded().is_empty());
}

#[test]
fn cold_start_checks_once_and_settles() {
    let h = Harness::with_tokens("a", "r");
    h.transport.ok(json!({"user": {"id": 2, "user_type": "patient"}}));
    let state = cell(AuthState::default());
    let store = AuthStore::new(state.clone(), cell(ToastState::default()), h.client.clone(), h.storage())
        .client_side(true);
    let sleeper = RecordingSleeper::default();

    assert!(block_on(initialize_session(&store, &sleeper)));

    assert_eq!(sleeper.recorded(), vec![SETTLE_DELAY]);
    assert_eq!(state.borrow().user_type(), Some(UserType::Patient));
}

#[test]
fn cold_start_without_tokens_settles_unauthenticated() {
    let h = Harness::new();
    let store = AuthStore::new(cell(AuthState::default()), cell(ToastState::default()), h.client.clone(), h.storage())
        .client_side(true);
    let sleeper = RecordingSleeper::default();

    assert!(!block_on(initialize_session(&store, &sleeper)));

    assert!(h.transport.requests().is_empty());
    assert_eq!(sleeper.recorded(), vec![SETTLE_DELAY]);
}

fn persist_doctor_snapshot(h: &Harness) {
    let mut state = AuthState::default();
    state.sign_in(normalize_user(&json!({"id": 7, "user_type": "doctor"})).unwrap());
    h.storage.set(AUTH_STORAGE_KEY, &encode_snapshot(&state.snapshot()).unwrap());
}

#[test]
fn restored_session_without_tokens_is_signed_out() {
    let h = Harness::new();
    persist_doctor_snapshot(&h);
    let state = cell(AuthState::default());
    let store = AuthStore::new(state.clone(), cell(ToastState::default()), h.client.clone(), h.storage())
        .client_side(true);
    assert!(store.rehydrate());
    let sleeper = RecordingSleeper::default();

    assert!(!block_on(initialize_session(&store, &sleeper)));

    assert!(state.borrow().user().is_none());
    assert!(h.transport.requests().is_empty());
    assert_eq!(sleeper.recorded(), vec![SETTLE_DELAY]);
    let guard = cell(RouteGuard::new(UserType::Doctor));
    assert_eq!(
        block_on(run_guard(&guard, &store, &sleeper, true)),
        GuardOutcome::Redirected { cleared_tokens: false }
    );
}

#[test]
fn restored_session_with_tokens_is_revalidated_only_when_tokens_vanish() {
    let h = Harness::with_tokens("a", "r");
    persist_doctor_snapshot(&h);
    let store = AuthStore::new(cell(AuthState::default()), cell(ToastState::default()), h.client.clone(), h.storage())
        .client_side(true);
    assert!(store.rehydrate());
    let sleeper = RecordingSleeper::default();

    assert!(block_on(initialize_session(&store, &sleeper)));
    assert!(h.transport.requests().is_empty());
    assert!(sleeper.recorded().is_empty());

    h.tokens.clear_tokens();
    assert!(!block_on(initialize_session(&store, &sleeper)));
    assert!(!store.is_authenticated());
}
