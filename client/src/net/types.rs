//! Session and auth wire types.
//!
//! DESIGN
//! ======
//! Login and profile payloads are read as raw JSON and normalized here so a
//! partially filled backend user never panics the client: `normalize_user`
//! either yields a complete `AuthUser` or `None`, and callers treat `None` as
//! "not authenticated".

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Role carried by the backend `user_type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Doctor,
    Patient,
    Admin,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Patient => "patient",
            Self::Admin => "admin",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "doctor" => Some(Self::Doctor),
            "patient" => Some(Self::Patient),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Landing route after login.
    pub fn home_path(role: Option<Self>) -> &'static str {
        match role {
            Some(Self::Doctor) => "/espace-medecin",
            Some(Self::Patient) => "/espace-patient",
            _ => "/",
        }
    }
}

/// The authenticated user as the session keeps it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    /// `None` when the backend sent no recognizable role.
    #[serde(default)]
    pub user_type: Option<UserType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_license_number: Option<String>,
    #[serde(default)]
    pub password_needs_reset: bool,
}

impl AuthUser {
    pub fn greeting_name(&self) -> &str {
        if self.full_name.is_empty() { &self.email } else { &self.full_name }
    }
}

/// Build an `AuthUser` from a backend user object.
///
/// Requires an object with a non-zero `id`. A missing `full_name` is derived
/// from first and last name.
pub fn normalize_user(raw: &Value) -> Option<AuthUser> {
    let object = raw.as_object()?;
    let id = object.get("id").and_then(id_from_value).filter(|id| *id != 0)?;
    let text = |key: &str| object.get(key).and_then(Value::as_str).unwrap_or_default().to_owned();
    let optional = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    };

    let first_name = text("first_name");
    let last_name = text("last_name");
    let full_name = match optional("full_name") {
        Some(full) => full,
        None => format!("{first_name} {last_name}").trim().to_owned(),
    };

    Some(AuthUser {
        id,
        username: text("username"),
        email: text("email"),
        first_name,
        last_name,
        full_name,
        user_type: object.get("user_type").and_then(Value::as_str).and_then(UserType::parse),
        specialization: optional("specialization"),
        medical_license_number: optional("medical_license_number"),
        password_needs_reset: object
            .get("password_needs_reset")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Profile responses come either as `{user: {...}}` or as the user itself.
pub fn profile_user(payload: &Value) -> Option<AuthUser> {
    match payload.get("user") {
        Some(user) if user.is_object() => normalize_user(user),
        _ => normalize_user(payload),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TokenPair {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub tokens: Option<TokenPair>,
}

/// A login that produced everything needed for a session.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginSession {
    pub user: AuthUser,
    pub access: String,
    pub refresh: String,
}

impl LoginResponse {
    /// `None` unless both tokens are non-empty and the user payload is valid.
    pub fn into_session(self) -> Option<LoginSession> {
        let tokens = self.tokens?;
        let access = tokens.access.filter(|token| !token.is_empty())?;
        let refresh = tokens.refresh.filter(|token| !token.is_empty())?;
        let user = normalize_user(self.user.as_ref()?)?;
        Some(LoginSession { user, access, refresh })
    }
}

/// Brain-tumor segmentation reply.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SegmentationResponse {
    pub success: bool,
    pub original_image: Option<String>,
    pub segmentation_mask: Option<String>,
    pub comparison_image: Option<String>,
    pub processing_time: Option<f64>,
    pub error: Option<String>,
}

/// Base64-encoded PNGs returned by a successful segmentation.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentationResult {
    pub original_image: String,
    pub segmentation_mask: String,
    pub comparison_image: String,
    pub processing_time: f64,
}

pub const SEGMENTATION_FAILED: &str = "Failed to process image";

impl SegmentationResponse {
    /// # Errors
    ///
    /// Returns the backend's error text when `success` is false or an image
    /// is missing.
    pub fn into_result(self) -> Result<SegmentationResult, String> {
        if !self.success {
            return Err(self.error.unwrap_or_else(|| SEGMENTATION_FAILED.to_owned()));
        }
        match (self.original_image, self.segmentation_mask, self.comparison_image) {
            (Some(original_image), Some(segmentation_mask), Some(comparison_image)) => Ok(SegmentationResult {
                original_image,
                segmentation_mask,
                comparison_image,
                processing_time: self.processing_time.unwrap_or_default(),
            }),
            _ => Err(SEGMENTATION_FAILED.to_owned()),
        }
    }
}

/// A file picked in the browser, read into memory.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePayload {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| D::Error::custom("expected integer id"))
}
