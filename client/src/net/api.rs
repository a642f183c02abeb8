//! Named backend endpoints used outside the generic resource hooks.
//!
//! Client-side (hydrate) these go through `HttpTransport`; under SSR the
//! transport answers `ApiError::Unavailable`, so every call here is safe to
//! reach from server-rendered code.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics. Response shapes that only
//! the session layer interprets (login, profile) are returned as loosely
//! typed values and normalized in `net::types`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::{Value, json};

use super::client::{ApiClient, LOGIN_PATH, decode};
use super::error::ApiError;
use super::records::Patient;
use super::transport::FormField;
use super::types::{FilePayload, LoginResponse, SegmentationResponse};
use crate::util::url::percent_encode;

pub const LOGOUT_PATH: &str = "/api/accounts/logout/";
pub const PROFILE_PATH: &str = "/api/accounts/profile/";
pub const SET_INITIAL_PASSWORD_PATH: &str = "/api/accounts/set-initial-password/";
pub const SEGMENTATION_PATH: &str = "/api/health-predictions/brain-tumor/segment/";
pub const MY_RECORD_PATH: &str = "/api/patients/my-record/";

fn patient_search_path(query: &str) -> String {
    format!("/api/patients/search/?q={}", percent_encode(query))
}

/// `POST /api/accounts/login/`. Unknown response shapes decode to an empty
/// `LoginResponse`, which the auth store treats as a failed login.
///
/// # Errors
///
/// Returns the HTTP or transport error.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let reply = client.post(LOGIN_PATH, json!({ "email": email, "password": password })).await?;
    Ok(serde_json::from_value(reply).unwrap_or_default())
}

/// Revoke the refresh token server-side.
///
/// # Errors
///
/// Returns the HTTP or transport error.
pub async fn logout(client: &ApiClient, refresh_token: &str) -> Result<(), ApiError> {
    client.post(LOGOUT_PATH, json!({ "refresh_token": refresh_token })).await?;
    Ok(())
}

/// `GET /api/accounts/profile/`, raw.
///
/// # Errors
///
/// Returns the HTTP or transport error.
pub async fn fetch_profile(client: &ApiClient) -> Result<Value, ApiError> {
    client.get(PROFILE_PATH).await
}

/// # Errors
///
/// Returns the HTTP or transport error; validation errors come back as
/// `ApiError::Status` with a DRF body.
pub async fn set_initial_password(client: &ApiClient, password: &str, confirm: &str) -> Result<(), ApiError> {
    client
        .post(SET_INITIAL_PASSWORD_PATH, json!({ "password": password, "password_confirm": confirm }))
        .await?;
    Ok(())
}

/// Upload an MRI slice for segmentation.
///
/// # Errors
///
/// Returns the HTTP or transport error. A `success: false` reply is not an
/// error at this layer; see `SegmentationResponse::into_result`.
pub async fn segment_brain_tumor(client: &ApiClient, image: &FilePayload) -> Result<SegmentationResponse, ApiError> {
    let field = FormField::file("image", &image.name, &image.content_type, image.bytes.clone());
    decode(client.upload(SEGMENTATION_PATH, vec![field]).await?)
}

/// The signed-in patient's own record.
///
/// # Errors
///
/// Returns the HTTP error (`404` when the account has no record yet).
pub async fn fetch_my_record(client: &ApiClient) -> Result<Patient, ApiError> {
    client.get_json(MY_RECORD_PATH).await
}

/// Free-text patient search.
///
/// # Errors
///
/// Returns the HTTP or transport error.
pub async fn search_patients(client: &ApiClient, query: &str) -> Result<Value, ApiError> {
    client.get(&patient_search_path(query)).await
}
