//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Leptos SSR routes and the hydration bundle under `/pkg` share one Axum
//! router with the `/healthz` probe. The portal's REST API is a separate
//! backend; nothing here proxies it.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, ServerError};

fn probe_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Leptos SSR frontend plus static assets and probes.
///
/// # Errors
///
/// Returns `ServerError::Leptos` if the Leptos configuration cannot be
/// loaded (missing or malformed `[workspace.metadata.leptos]` section).
pub fn app(config: &ServerConfig) -> Result<Router, ServerError> {
    let conf = get_configuration(None).map_err(|e| ServerError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(portal_client::app::App);
    tracing::debug!(count = routes.len(), "leptos routes generated");

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || portal_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    let mut router = probe_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")));
    if config.compression {
        router = router.layer(CompressionLayer::new());
    }
    if config.trace_requests {
        router = router.layer(TraceLayer::new_for_http());
    }
    Ok(router)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
