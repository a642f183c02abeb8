//! HTTP transport seam.
//!
//! DESIGN
//! ======
//! `ApiClient` builds `ApiRequest` values and hands them to a `Transport`.
//! In the browser `HttpTransport` sends them with `gloo-net`; under SSR it
//! answers `ApiError::Unavailable`; tests script replies through a mock.
//! Bodies are always decoded into `serde_json::Value` so callers decide how
//! strictly to type the payload.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
    Text(String),
    File { filename: String, content_type: String, bytes: Vec<u8> },
}

/// One `multipart/form-data` part.
#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

impl FormField {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self { name: name.to_owned(), value: FormValue::Text(value.into()) }
    }

    pub fn file(name: &str, filename: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_owned(),
            value: FormValue::File {
                filename: filename.to_owned(),
                content_type: content_type.to_owned(),
                bytes,
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

impl Body {
    /// Serialize any payload into a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` when the payload cannot be represented as JSON.
    pub fn from_json<T: serde::Serialize>(payload: &T) -> Result<Self, ApiError> {
        serde_json::to_value(payload).map(Self::Json).map_err(ApiError::decode)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/api/patients/`.
    pub path: String,
    pub body: Body,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, body: Body) -> Self {
        Self { method, path: path.into(), body, bearer: None }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// Send one request and decode the response body.
    ///
    /// Empty bodies (e.g. `204 No Content`) decode to `Value::Null`.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// Decode a raw response body. Non-JSON text is kept as a JSON string so
/// error rendering can still fall back to the status message.
pub(crate) fn parse_body(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_owned())))
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Browser transport backed by `fetch`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn from_config() -> Self {
        Self::new(crate::config::api_base_url())
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let url = self.url(&request.path);
            let mut builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Patch => Request::patch(&url),
                Method::Delete => Request::delete(&url),
            };
            if let Some(token) = request.bearer.as_deref() {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let prepared = match &request.body {
                Body::Empty => builder.build(),
                Body::Json(payload) => builder.json(payload),
                Body::Multipart(fields) => builder.body(form_data(fields)?),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;

            let resp = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let body = parse_body(&text);
            if resp.ok() {
                Ok(body.unwrap_or(Value::Null))
            } else {
                Err(ApiError::Status { status, body })
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "hydrate")]
fn form_data(fields: &[FormField]) -> Result<web_sys::FormData, ApiError> {
    let js_err = |e: wasm_bindgen::JsValue| ApiError::Network(format!("{e:?}"));
    let form = web_sys::FormData::new().map_err(js_err)?;
    for field in fields {
        match &field.value {
            FormValue::Text(text) => form.append_with_str(&field.name, text).map_err(js_err)?,
            FormValue::File { filename, content_type, bytes } => {
                let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(content_type);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                    .map_err(js_err)?;
                form.append_with_blob_and_filename(&field.name, &blob, filename)
                    .map_err(js_err)?;
            }
        }
    }
    Ok(form)
}
