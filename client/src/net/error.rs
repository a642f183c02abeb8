//! Typed API failures and their user-facing rendering.
//!
//! ERROR HANDLING
//! ==============
//! Every REST call resolves to `Result<_, ApiError>`. Pages never show an
//! `ApiError` directly: `error_message` collapses Django REST Framework error
//! bodies (`detail`, `non_field_errors`, per-field lists) into one display
//! string, and `error_title` picks the toast heading.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub const UNKNOWN_ERROR: &str = "Une erreur inconnue s'est produite";

/// Failure of a single backend request.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: Option<Value> },
    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
    /// Called outside a browser (server-side render).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Extract the most specific human-readable message from an API failure.
pub fn error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status, body } => {
            body.as_ref().and_then(body_message).unwrap_or_else(|| status_message(*status))
        }
        ApiError::Network(message) if !message.trim().is_empty() => message.clone(),
        ApiError::Network(_) => "Erreur réseau".to_owned(),
        ApiError::Decode(_) => "Réponse invalide du serveur.".to_owned(),
        ApiError::Unavailable => UNKNOWN_ERROR.to_owned(),
    }
}

/// Toast heading for an API failure.
pub fn error_title(err: &ApiError) -> &'static str {
    match err {
        ApiError::Status { status, .. } if (400..500).contains(status) => "Erreur de validation",
        ApiError::Status { status, .. } if *status >= 500 => "Erreur serveur",
        ApiError::Network(_) => "Erreur de connexion",
        _ => "Erreur",
    }
}

/// Flatten a DRF validation body into `field -> message`.
pub fn field_errors(body: &Value) -> BTreeMap<String, String> {
    let Some(object) = body.as_object() else {
        return BTreeMap::new();
    };
    object
        .iter()
        .filter_map(|(field, messages)| {
            let text = match messages {
                Value::Array(items) => join_values(items),
                Value::String(text) => text.clone(),
                Value::Object(_) => messages.to_string(),
                _ => return None,
            };
            Some((field.clone(), text))
        })
        .collect()
}

const RESERVED_KEYS: [&str; 5] = ["detail", "message", "error", "errors", "non_field_errors"];

fn body_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;

    for key in ["detail", "message", "error"] {
        if let Some(Value::String(text)) = object.get(key) {
            if !text.is_empty() {
                return Some(text.clone());
            }
        }
    }

    if let Some(Value::Array(items)) = object.get("non_field_errors") {
        if !items.is_empty() {
            return Some(join_values(items));
        }
    }

    if let Some(Value::Object(errors)) = object.get("errors") {
        if let Some(joined) = join_fields(errors, |_| true) {
            return Some(joined);
        }
    }

    join_fields(object, |key| !RESERVED_KEYS.contains(&key))
}

fn join_fields(object: &Map<String, Value>, include: impl Fn(&str) -> bool) -> Option<String> {
    let parts: Vec<String> = object
        .iter()
        .filter(|(key, value)| include(key) && is_truthy(value))
        .map(|(key, value)| format!("{key}: {}", value_text(value)))
        .collect();
    if parts.is_empty() { None } else { Some(parts.join(" | ")) }
}

fn status_message(status: u16) -> String {
    match status {
        400 => "Requête invalide. Vérifiez vos données.".to_owned(),
        401 => "Non authentifié. Veuillez vous reconnecter.".to_owned(),
        403 => "Accès refusé. Vous n'avez pas les permissions nécessaires.".to_owned(),
        404 => "Ressource non trouvée.".to_owned(),
        409 => "Conflit. Cette ressource existe déjà ou a été modifiée.".to_owned(),
        500 => "Erreur serveur. Veuillez réessayer plus tard.".to_owned(),
        503 => "Service indisponible. Le serveur est actuellement hors ligne.".to_owned(),
        other => format!("Erreur {other}"),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => join_values(items),
        other => other.to_string(),
    }
}

fn join_values(items: &[Value]) -> String {
    items.iter().map(value_text).collect::<Vec<_>>().join(", ")
}
