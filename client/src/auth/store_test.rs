use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::RwSignal;
use serde_json::json;

use super::*;
use crate::auth::guard::{GuardOutcome, RouteGuard, run_guard};
use crate::auth::tokens::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStore};
use crate::net::error::ApiError;
use crate::net::transport::Body;
use crate::net::types::normalize_user;
use crate::state::auth::PersistedSession;
use crate::testing::{Harness, RecordingSleeper, cell};

type Store = AuthStore<Rc<RefCell<AuthState>>, Rc<RefCell<ToastState>>>;

struct Fixture {
    h: Harness,
    state: Rc<RefCell<AuthState>>,
    toasts: Rc<RefCell<ToastState>>,
    store: Store,
}

fn fixture(h: Harness) -> Fixture {
    let state = cell(AuthState::default());
    let toasts = cell(ToastState::default());
    let store = AuthStore::new(state.clone(), toasts.clone(), h.client.clone(), h.storage()).client_side(true);
    Fixture { h, state, toasts, store }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    futures::executor::block_on(future)
}

fn doctor_json() -> serde_json::Value {
    json!({"id": 7, "email": "doc@x.com", "first_name": "Ana", "last_name": "Diaz", "user_type": "doctor"})
}

fn assert_consistent(state: &AuthState) {
    assert_eq!(state.is_authenticated(), state.user().is_some());
}

fn last_toast(f: &Fixture) -> (ToastKind, String, Option<String>) {
    let toasts = f.toasts.borrow();
    let toast = toasts.items.last().expect("a toast");
    (toast.kind, toast.title.clone(), toast.description.clone())
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_stores_tokens_and_user() {
    let f = fixture(Harness::new());
    f.h.transport.ok(json!({"user": doctor_json(), "tokens": {"access": "acc", "refresh": "ref"}}));

    let user = block_on(f.store.login("doc@x.com", "password1")).unwrap();

    assert_eq!(user.full_name, "Ana Diaz");
    assert_eq!(f.h.tokens.access_token().as_deref(), Some("acc"));
    assert_eq!(f.h.tokens.refresh_token().as_deref(), Some("ref"));
    let state = f.state.borrow();
    assert!(state.has_role(UserType::Doctor));
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert_consistent(&state);
    drop(state);
    assert_eq!(
        last_toast(&f),
        (ToastKind::Success, "Connexion réussie".to_owned(), Some("Bienvenue Ana Diaz!".to_owned()))
    );
    let persisted = f.h.storage.get(AUTH_STORAGE_KEY).unwrap();
    assert_eq!(decode_snapshot(&persisted).unwrap().user.map(|u| u.id), Some(7));
}

#[test]
fn login_missing_refresh_token_fails_closed() {
    let f = fixture(Harness::new());
    f.h.transport.ok(json!({"user": doctor_json(), "tokens": {"access": "acc"}}));

    assert_eq!(block_on(f.store.login("doc@x.com", "password1")), None);

    let state = f.state.borrow();
    assert!(!state.is_authenticated());
    assert_eq!(state.user(), None);
    assert_eq!(state.error.as_deref(), Some(LOGIN_FAILED));
    assert_consistent(&state);
    drop(state);
    assert!(!f.h.tokens.has_tokens());
    assert_eq!(
        last_toast(&f),
        (ToastKind::Error, "Échec de connexion".to_owned(), Some("Vérifiez vos identifiants".to_owned()))
    );
}

#[test]
fn login_missing_user_fails_closed() {
    let f = fixture(Harness::new());
    f.h.transport.ok(json!({"tokens": {"access": "acc", "refresh": "ref"}}));
    assert_eq!(block_on(f.store.login("doc@x.com", "password1")), None);
    assert!(!f.state.borrow().is_authenticated());
    assert!(!f.h.tokens.has_tokens());
}

#[test]
fn login_rejected_credentials_surface_backend_message() {
    let f = fixture(Harness::new());
    f.h.transport.status(401, json!({"detail": "Identifiants invalides"}));

    assert_eq!(block_on(f.store.login("doc@x.com", "bad")), None);

    let state = f.state.borrow();
    assert!(!state.is_authenticated());
    assert_eq!(state.user(), None);
    assert_eq!(state.error.as_deref(), Some("Identifiants invalides"));
    drop(state);
    assert_eq!(
        last_toast(&f),
        (ToastKind::Error, "Erreur de connexion".to_owned(), Some("Identifiants invalides".to_owned()))
    );
    assert_eq!(f.h.transport.requests().len(), 1);
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_revokes_and_purges_tokens() {
    let f = fixture(Harness::with_tokens("acc", "ref"));
    f.state.borrow_mut().sign_in(normalize_user(&doctor_json()).unwrap());
    f.h.transport.ok(json!({"detail": "ok"}));

    block_on(f.store.logout());

    let request = &f.h.transport.requests()[0];
    assert_eq!(request.path, api::LOGOUT_PATH);
    assert_eq!(request.body, Body::Json(json!({"refresh_token": "ref"})));
    assert!(!f.h.tokens.has_tokens());
    assert!(!f.state.borrow().is_authenticated());
    assert_eq!(
        last_toast(&f),
        (ToastKind::Success, "Déconnexion réussie".to_owned(), Some("À bientôt !".to_owned()))
    );
}

#[test]
fn logout_failure_still_signs_out() {
    let f = fixture(Harness::with_tokens("acc", "ref"));
    f.state.borrow_mut().sign_in(normalize_user(&doctor_json()).unwrap());
    f.h.transport.reply(Err(ApiError::Network("offline".to_owned())));

    block_on(f.store.logout());

    let state = f.state.borrow();
    assert!(!state.is_authenticated());
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    drop(state);
    assert!(!f.h.tokens.has_tokens());
}

#[test]
fn logout_without_refresh_token_skips_request() {
    let f = fixture(Harness::new());
    block_on(f.store.logout());
    assert!(f.h.transport.requests().is_empty());
    assert_eq!(last_toast(&f).1, "Déconnexion réussie");
}

// =============================================================
// check_auth
// =============================================================

#[test]
fn check_auth_off_browser_is_inert() {
    let h = Harness::with_tokens("acc", "ref");
    let state = cell(AuthState::default());
    let store = AuthStore::new(state.clone(), cell(ToastState::default()), h.client.clone(), h.storage())
        .client_side(false);

    assert!(!block_on(store.check_auth()));
    assert!(h.transport.requests().is_empty());
    assert!(h.tokens.has_tokens());
}

#[test]
fn check_auth_without_access_token_makes_no_request() {
    let f = fixture(Harness::new());
    assert!(!block_on(f.store.check_auth()));
    assert!(f.h.transport.requests().is_empty());
    assert!(!f.state.borrow().is_authenticated());
}

#[test]
fn check_auth_accepts_wrapped_profile() {
    let f = fixture(Harness::with_tokens("acc", "ref"));
    f.h.transport.ok(json!({"user": doctor_json()}));

    assert!(block_on(f.store.check_auth()));

    assert_eq!(f.h.transport.paths(), vec![api::PROFILE_PATH]);
    let state = f.state.borrow();
    assert!(state.has_role(UserType::Doctor));
    assert!(!state.is_loading);
}

#[test]
fn check_auth_invalid_payload_clears_session_and_tokens() {
    let f = fixture(Harness::with_tokens("acc", "ref"));
    f.state.borrow_mut().sign_in(normalize_user(&doctor_json()).unwrap());
    f.h.transport.ok(json!({"detail": "no id here"}));

    assert!(!block_on(f.store.check_auth()));

    assert!(!f.state.borrow().is_authenticated());
    assert!(!f.h.tokens.has_tokens());
    assert_consistent(&f.state.borrow());
}

#[test]
fn check_auth_server_error_clears_tokens() {
    let f = fixture(Harness::with_tokens("acc", "ref"));
    f.h.transport.status(500, json!({}));

    assert!(!block_on(f.store.check_auth()));

    assert!(!f.h.tokens.has_tokens());
    assert!(!f.state.borrow().is_loading);
}

#[test]
fn check_auth_migrates_legacy_tokens_first() {
    let f = fixture(Harness::new());
    f.h.storage.set(ACCESS_TOKEN_KEY, "legacy-a");
    f.h.storage.set(REFRESH_TOKEN_KEY, "legacy-r");
    f.h.transport.ok(doctor_json());

    assert!(block_on(f.store.check_auth()));

    assert_eq!(f.h.transport.requests()[0].bearer.as_deref(), Some("legacy-a"));
    assert_eq!(f.h.storage.get(ACCESS_TOKEN_KEY), None);
}

// =============================================================
// set_user / clear_error / rehydrate
// =============================================================

#[test]
fn set_user_authenticates_without_touching_tokens() {
    let f = fixture(Harness::new());
    f.state.borrow_mut().reject("old");
    f.store.set_user(normalize_user(&doctor_json()).unwrap());

    assert!(f.state.borrow().is_authenticated());
    assert_eq!(f.state.borrow().error, None);
    assert!(!f.h.tokens.has_tokens());
    assert!(f.h.storage.get(AUTH_STORAGE_KEY).is_some());
}

#[test]
fn clear_error_only_resets_error() {
    let f = fixture(Harness::new());
    f.state.borrow_mut().reject("boom");
    f.store.clear_error();
    assert_eq!(f.state.borrow().error, None);
    assert!(!f.state.borrow().is_authenticated());
}

#[test]
fn rehydrate_restores_persisted_session_once() {
    let first = fixture(Harness::new());
    first.store.set_user(normalize_user(&doctor_json()).unwrap());
    let raw = first.h.storage.get(AUTH_STORAGE_KEY).unwrap();

    let second = fixture(Harness::new());
    second.h.storage.set(AUTH_STORAGE_KEY, &raw);
    assert!(second.store.rehydrate());
    assert!(second.state.borrow().has_role(UserType::Doctor));
    assert!(!second.store.rehydrate());
}

#[test]
fn probe_reflects_store() {
    let f = fixture(Harness::with_tokens("a", "r"));
    assert!(SessionProbe::has_tokens(&f.store));
    assert!(!SessionProbe::is_authenticated(&f.store));
    SessionProbe::clear_tokens(&f.store);
    assert!(!SessionProbe::has_tokens(&f.store));
}

// =============================================================
// session expiry
// =============================================================

#[test]
fn failed_refresh_signs_out_and_guard_redirects() {
    let h = Harness::with_tokens("acc", "ref");
    let state = RwSignal::new(AuthState::default());
    let client = h.client.clone().on_session_expired(session_expiry_hook(state, h.storage()));
    let store = AuthStore::new(state, cell(ToastState::default()), client, h.storage()).client_side(true);
    h.transport.ok(doctor_json());
    assert!(block_on(store.check_auth()));

    h.transport.status(401, json!({"detail": "expired"})).status(401, json!({"detail": "refresh expired"}));
    assert!(block_on(store.client().get("/api/patients/")).is_err());

    assert!(!state.read_state(AuthState::is_authenticated));
    assert!(!h.tokens.has_tokens());
    let persisted = decode_snapshot(&h.storage.get(AUTH_STORAGE_KEY).unwrap()).unwrap();
    assert!(persisted.user.is_none());
    let guard = cell(RouteGuard::new(UserType::Doctor));
    assert_eq!(
        block_on(run_guard(&guard, &store, &RecordingSleeper::default(), true)),
        GuardOutcome::Redirected { cleared_tokens: false }
    );
}

#[test]
fn expiry_hook_persists_signed_out_snapshot() {
    let h = Harness::new();
    let state = RwSignal::new(AuthState::default());
    state.update_state(|s| s.sign_in(normalize_user(&doctor_json()).unwrap()));
    let hook = session_expiry_hook(state, h.storage());

    hook();
    hook();

    assert!(state.read_state(|s| s.user().is_none()));
    let persisted = decode_snapshot(&h.storage.get(AUTH_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(persisted, PersistedSession::default());
}
