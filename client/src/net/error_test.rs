use super::*;
use serde_json::json;

fn status(status: u16, body: Value) -> ApiError {
    ApiError::Status { status, body: Some(body) }
}

// =============================================================
// error_message
// =============================================================

#[test]
fn detail_field_wins() {
    let err = status(401, json!({"detail": "No active account found with the given credentials"}));
    assert_eq!(error_message(&err), "No active account found with the given credentials");
}

#[test]
fn message_then_error_fields_are_used() {
    assert_eq!(error_message(&status(400, json!({"message": "bad"}))), "bad");
    assert_eq!(error_message(&status(503, json!({"error": "model offline"}))), "model offline");
}

#[test]
fn non_field_errors_are_joined() {
    let err = status(400, json!({"non_field_errors": ["first", "second"]}));
    assert_eq!(error_message(&err), "first, second");
}

#[test]
fn nested_errors_map_is_flattened() {
    let err = status(400, json!({"errors": {"email": ["taken"], "phone": "required"}}));
    assert_eq!(error_message(&err), "email: taken | phone: required");
}

#[test]
fn top_level_field_errors_are_flattened() {
    let err = status(400, json!({"date": ["Date invalide"], "reason": ""}));
    assert_eq!(error_message(&err), "date: Date invalide");
}

#[test]
fn status_fallback_when_body_is_empty() {
    assert_eq!(error_message(&ApiError::Status { status: 404, body: None }), "Ressource non trouvée.");
    assert_eq!(error_message(&status(418, json!({}))), "Erreur 418");
    assert_eq!(error_message(&status(500, json!("<html>"))), "Erreur serveur. Veuillez réessayer plus tard.");
}

#[test]
fn network_message_is_passed_through() {
    assert_eq!(error_message(&ApiError::Network("connection refused".to_owned())), "connection refused");
    assert_eq!(error_message(&ApiError::Network(String::new())), "Erreur réseau");
}

#[test]
fn unavailable_uses_unknown_message() {
    assert_eq!(error_message(&ApiError::Unavailable), UNKNOWN_ERROR);
}

// =============================================================
// error_title / helpers
// =============================================================

#[test]
fn titles_follow_status_class() {
    assert_eq!(error_title(&status(422, json!({}))), "Erreur de validation");
    assert_eq!(error_title(&status(502, json!({}))), "Erreur serveur");
    assert_eq!(error_title(&ApiError::Network("x".to_owned())), "Erreur de connexion");
    assert_eq!(error_title(&ApiError::Decode("x".to_owned())), "Erreur");
}

#[test]
fn field_errors_flatten_lists_and_objects() {
    let errors = field_errors(&json!({
        "email": ["taken", "invalid"],
        "name": "required",
        "address": {"city": ["missing"]},
        "count": 3
    }));
    assert_eq!(errors.get("email").map(String::as_str), Some("taken, invalid"));
    assert_eq!(errors.get("name").map(String::as_str), Some("required"));
    assert_eq!(errors.get("address").map(String::as_str), Some(r#"{"city":["missing"]}"#));
    assert!(!errors.contains_key("count"));
}

#[test]
fn status_predicates() {
    assert!(status(401, json!({})).is_unauthorized());
    assert!(status(404, json!({})).is_not_found());
    assert_eq!(ApiError::Unavailable.status(), None);
}
