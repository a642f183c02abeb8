//! SSR host for the healthcare portal.
//!
//! Serves the Leptos app (server-rendered, then hydrated by the WASM bundle
//! under `/pkg`) and a `/healthz` probe. All data lives behind the external
//! REST backend the browser talks to directly.

mod config;
mod routes;

use config::{ServerConfig, ServerError};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "ignoring unreadable .env");
        }
    }

    let config = ServerConfig::from_env()?;
    let app = routes::app(&config)?;
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;

    tracing::info!(%addr, "portal listening");
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
