//! Authenticated REST client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every store and hook talks to the backend through one `ApiClient`. It
//! attaches the bearer token from the `TokenStore` and, on a `401`, performs
//! a single refresh-and-retry before giving up and clearing the tokens.
//! Giving up also fires the session-expired hook so the auth state signs out
//! and the route guards redirect.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::error::ApiError;
use super::transport::{ApiRequest, Body, FormField, Method, Transport};
use crate::auth::tokens::TokenStore;

pub const TOKEN_REFRESH_PATH: &str = "/api/accounts/token/refresh/";
pub const LOGIN_PATH: &str = "/api/accounts/login/";

type SessionExpired = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    on_session_expired: Option<SessionExpired>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { transport, tokens, on_session_expired: None }
    }

    /// Called after a `401` that no token refresh could recover.
    #[must_use]
    pub fn on_session_expired(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Send a request with the current access token.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or the original `401` when there is no
    /// refresh token or the refresh itself fails. Both `401` cases end the
    /// session.
    pub async fn request(&self, method: Method, path: &str, body: Body) -> Result<Value, ApiError> {
        let request = ApiRequest::new(method, path, body);
        let first = self
            .transport
            .send(request.clone().with_bearer(self.tokens.access_token()))
            .await;

        match first {
            Err(err) if err.is_unauthorized() && may_refresh(path) => {
                let Some(refresh) = self.tokens.refresh_token() else {
                    log::warn!("unauthorized without refresh token");
                    self.expire_session();
                    return Err(err);
                };
                match self.refresh_access(&refresh).await {
                    Ok(access) => self.transport.send(request.with_bearer(Some(access))).await,
                    Err(refresh_err) => {
                        log::warn!("token refresh failed: {refresh_err}");
                        self.expire_session();
                        Err(err)
                    }
                }
            }
            other => other,
        }
    }

    fn expire_session(&self) {
        self.tokens.clear_tokens();
        if let Some(hook) = &self.on_session_expired {
            hook();
        }
    }

    async fn refresh_access(&self, refresh: &str) -> Result<String, ApiError> {
        let request = ApiRequest::new(Method::Post, TOKEN_REFRESH_PATH, Body::Json(json!({ "refresh": refresh })));
        let reply = self.transport.send(request).await?;
        let access = reply
            .get("access")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Decode("refresh response without access token".to_owned()))?
            .to_owned();
        // Rotating backends return a new refresh token as well.
        let next_refresh = reply.get("refresh").and_then(Value::as_str).unwrap_or(refresh);
        self.tokens.set_tokens(&access, next_refresh);
        log::debug!("access token refreshed");
        Ok(access)
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Get, path, Body::Empty).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        decode(self.get(path).await?)
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post(&self, path: &str, payload: Value) -> Result<Value, ApiError> {
        self.request(Method::Post, path, Body::Json(payload)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put(&self, path: &str, payload: Value) -> Result<Value, ApiError> {
        self.request(Method::Put, path, Body::Json(payload)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn patch(&self, path: &str, payload: Value) -> Result<Value, ApiError> {
        self.request(Method::Patch, path, Body::Json(payload)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::Delete, path, Body::Empty).await
    }

    /// Multipart POST.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn upload(&self, path: &str, fields: Vec<FormField>) -> Result<Value, ApiError> {
        self.request(Method::Post, path, Body::Multipart(fields)).await
    }
}

/// Deserialize a response body into a typed value.
///
/// # Errors
///
/// Returns `ApiError::Decode` when the shape does not match.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(ApiError::decode)
}

fn may_refresh(path: &str) -> bool {
    path != TOKEN_REFRESH_PATH && path != LOGIN_PATH
}
