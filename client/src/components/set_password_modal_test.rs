use serde_json::json;

use super::*;

#[test]
fn backend_error_field_is_shown() {
    let err = ApiError::Status { status: 400, body: Some(json!({"error": "Mot de passe déjà défini"})) };
    assert_eq!(set_password_error(&err), "Mot de passe déjà défini");
}

#[test]
fn other_failures_use_generic_message() {
    assert_eq!(set_password_error(&ApiError::Network("offline".to_owned())), SET_PASSWORD_FAILED);
    let err = ApiError::Status { status: 500, body: Some(json!({"detail": "boom"})) };
    assert_eq!(set_password_error(&err), SET_PASSWORD_FAILED);
}
