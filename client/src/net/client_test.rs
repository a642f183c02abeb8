use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::testing::Harness;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    futures::executor::block_on(future)
}

#[test]
fn attaches_bearer_from_token_store() {
    let h = Harness::with_tokens("acc", "ref");
    h.transport.ok(json!([]));
    block_on(h.client.get("/api/patients/")).unwrap();
    let requests = h.transport.requests();
    assert_eq!(requests[0].bearer.as_deref(), Some("acc"));
    assert_eq!(requests[0].method, Method::Get);
}

#[test]
fn no_bearer_without_tokens() {
    let h = Harness::new();
    h.transport.ok(Value::Null);
    block_on(h.client.get("/api/x/")).unwrap();
    assert_eq!(h.transport.requests()[0].bearer, None);
}

#[test]
fn refreshes_once_on_unauthorized_and_retries() {
    let h = Harness::with_tokens("stale", "ref");
    h.transport
        .status(401, json!({"detail": "Given token not valid"}))
        .ok(json!({"access": "fresh"}))
        .ok(json!({"id": 3}));

    let reply = block_on(h.client.get("/api/accounts/profile/")).unwrap();

    assert_eq!(reply, json!({"id": 3}));
    assert_eq!(
        h.transport.paths(),
        vec!["/api/accounts/profile/", TOKEN_REFRESH_PATH, "/api/accounts/profile/"]
    );
    let requests = h.transport.requests();
    assert_eq!(requests[1].body, Body::Json(json!({"refresh": "ref"})));
    assert_eq!(requests[2].bearer.as_deref(), Some("fresh"));
    assert_eq!(h.tokens.access_token().as_deref(), Some("fresh"));
    assert_eq!(h.tokens.refresh_token().as_deref(), Some("ref"));
}

#[test]
fn failed_refresh_clears_tokens_and_returns_original_error() {
    let h = Harness::with_tokens("stale", "expired");
    h.transport.status(401, json!({"detail": "expired"})).status(401, json!({"detail": "refresh expired"}));

    let err = block_on(h.client.get("/api/patients/")).unwrap_err();

    assert_eq!(err, ApiError::Status { status: 401, body: Some(json!({"detail": "expired"})) });
    assert!(!h.tokens.has_tokens());
    assert_eq!(h.transport.requests().len(), 2);
}

#[test]
fn second_unauthorized_is_not_refreshed_again() {
    let h = Harness::with_tokens("stale", "ref");
    h.transport.status(401, json!({})).ok(json!({"access": "fresh"})).status(401, json!({}));

    let err = block_on(h.client.get("/api/patients/")).unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(h.transport.requests().len(), 3);
}

#[test]
fn login_unauthorized_skips_refresh() {
    let h = Harness::with_tokens("a", "r");
    h.transport.status(401, json!({"detail": "bad credentials"}));
    let err = block_on(h.client.post(LOGIN_PATH, json!({}))).unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(h.transport.requests().len(), 1);
    assert!(h.tokens.has_tokens());
}

#[test]
fn unauthorized_without_refresh_token_is_returned() {
    let h = Harness::new();
    h.transport.status(401, json!({}));
    assert!(block_on(h.client.get("/api/x/")).unwrap_err().is_unauthorized());
    assert_eq!(h.transport.requests().len(), 1);
}

fn counting_client(h: &Harness) -> (ApiClient, Arc<AtomicUsize>) {
    let expired = Arc::new(AtomicUsize::new(0));
    let counter = expired.clone();
    let client = h.client.clone().on_session_expired(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (client, expired)
}

#[test]
fn failed_refresh_reports_expired_session() {
    let h = Harness::with_tokens("stale", "expired");
    let (client, expired) = counting_client(&h);
    h.transport.status(401, json!({})).status(401, json!({}));

    assert!(block_on(client.get("/api/patients/")).unwrap_err().is_unauthorized());

    assert_eq!(expired.load(Ordering::SeqCst), 1);
    assert!(!h.tokens.has_tokens());
}

#[test]
fn unauthorized_without_refresh_token_reports_expired_session() {
    let h = Harness::new();
    h.tokens.set_tokens("orphan", "");
    let (client, expired) = counting_client(&h);
    h.transport.status(401, json!({}));

    assert!(block_on(client.get("/api/x/")).unwrap_err().is_unauthorized());

    assert_eq!(expired.load(Ordering::SeqCst), 1);
    assert_eq!(h.tokens.access_token(), None);
    assert_eq!(h.transport.requests().len(), 1);
}

#[test]
fn recovered_or_login_unauthorized_keeps_session() {
    let h = Harness::with_tokens("stale", "ref");
    let (client, expired) = counting_client(&h);
    h.transport
        .status(401, json!({}))
        .ok(json!({"access": "fresh"}))
        .ok(json!([]))
        .status(401, json!({"detail": "bad credentials"}));

    block_on(client.get("/api/patients/")).unwrap();
    assert!(block_on(client.post(LOGIN_PATH, json!({}))).unwrap_err().is_unauthorized());

    assert_eq!(expired.load(Ordering::SeqCst), 0);
    assert!(h.tokens.has_tokens());
}

#[test]
fn decode_reports_shape_mismatch() {
    let result: Result<Vec<i64>, ApiError> = decode(json!({"not": "a list"}));
    assert!(matches!(result, Err(ApiError::Decode(_))));
}
