use super::*;
use crate::net::transport::{Body, FormValue, Method};
use crate::testing::Harness;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    futures::executor::block_on(future)
}

#[test]
fn login_posts_credentials() {
    let h = Harness::new();
    h.transport.ok(json!({"user": {"id": 1}, "tokens": {"access": "a", "refresh": "r"}}));
    let response = block_on(login(&h.client, "doc@x.com", "secret123")).unwrap();
    assert!(response.tokens.is_some());
    let request = &h.transport.requests()[0];
    assert_eq!(request.path, LOGIN_PATH);
    assert_eq!(request.body, Body::Json(json!({"email": "doc@x.com", "password": "secret123"})));
}

#[test]
fn login_tolerates_unexpected_shape() {
    let h = Harness::new();
    h.transport.ok(json!("ok"));
    assert_eq!(block_on(login(&h.client, "a@b.c", "x")).unwrap(), LoginResponse::default());
}

#[test]
fn logout_sends_refresh_token() {
    let h = Harness::new();
    h.transport.ok(Value::Null);
    block_on(logout(&h.client, "ref")).unwrap();
    assert_eq!(h.transport.requests()[0].body, Body::Json(json!({"refresh_token": "ref"})));
}

#[test]
fn set_initial_password_payload() {
    let h = Harness::new();
    h.transport.ok(json!({"message": "ok"}));
    block_on(set_initial_password(&h.client, "Password1", "Password1")).unwrap();
    let request = &h.transport.requests()[0];
    assert_eq!(request.path, SET_INITIAL_PASSWORD_PATH);
    assert_eq!(request.body, Body::Json(json!({"password": "Password1", "password_confirm": "Password1"})));
}

#[test]
fn segmentation_uploads_image_field() {
    let h = Harness::new();
    h.transport.ok(json!({"success": false, "error": "bad slice"}));
    let image = FilePayload { name: "scan.png".to_owned(), content_type: "image/png".to_owned(), bytes: vec![1, 2, 3] };

    let response = block_on(segment_brain_tumor(&h.client, &image)).unwrap();

    assert_eq!(response.error.as_deref(), Some("bad slice"));
    let request = &h.transport.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, SEGMENTATION_PATH);
    let Body::Multipart(fields) = &request.body else {
        panic!("expected multipart body");
    };
    assert_eq!(fields[0].name, "image");
    assert!(matches!(&fields[0].value, FormValue::File { bytes, .. } if bytes == &vec![1, 2, 3]));
}

#[test]
fn search_encodes_query() {
    let h = Harness::new();
    h.transport.ok(json!([]));
    block_on(search_patients(&h.client, "jean dupont")).unwrap();
    assert_eq!(h.transport.paths(), vec!["/api/patients/search/?q=jean%20dupont"]);
}

#[test]
fn my_record_decodes_patient() {
    let h = Harness::new();
    h.transport.ok(json!({"id": 42, "first_name": "Léa"}));
    assert_eq!(block_on(fetch_my_record(&h.client)).unwrap().id, 42);
}
