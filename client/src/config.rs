//! Build-time client configuration.
//!
//! The WASM bundle cannot read the process environment at runtime, so the
//! backend location and cookie policy are baked in with `option_env!` and
//! fall back to local-development defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Base URL of the REST backend, without a trailing slash.
pub fn api_base_url() -> String {
    normalize_base_url(option_env!("PORTAL_API_URL"))
}

/// Whether token cookies carry the `Secure` attribute.
pub fn cookie_secure() -> bool {
    parse_bool(option_env!("PORTAL_COOKIE_SECURE")).unwrap_or(false)
}

pub(crate) fn normalize_base_url(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default().trim_end_matches('/');
    if trimmed.is_empty() { DEFAULT_API_URL.to_owned() } else { trimmed.to_owned() }
}

pub(crate) fn parse_bool(raw: Option<&str>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
