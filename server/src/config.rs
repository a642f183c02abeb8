//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("leptos configuration: {0}")]
    Leptos(String),

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },

    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Compress responses (gzip). On by default.
    pub compression: bool,
    /// Per-request tracing spans. On by default.
    pub trace_requests: bool,
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `COMPRESSION`: boolean, default on
    /// - `TRACE_REQUESTS`: boolean, default on
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnv` when a value is present but unparseable.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let port = match lookup("PORT").map(|raw| raw.trim().to_owned()) {
            None => DEFAULT_PORT,
            Some(raw) if raw.is_empty() => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| ServerError::InvalidEnv { var: "PORT", value: raw })?,
        };
        let bind_addr = lookup("BIND_ADDR")
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let compression = env_bool(lookup("COMPRESSION").as_deref(), true);
        let trace_requests = env_bool(lookup("TRACE_REQUESTS").as_deref(), true);
        Ok(Self { bind_addr, port, compression, trace_requests })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Parse a boolean env value, falling back to `default` when unset or
/// unrecognized.
pub fn env_bool(raw: Option<&str>, default: bool) -> bool {
    raw.and_then(parse_bool).unwrap_or(default)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
