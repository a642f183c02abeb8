//! # portal-client
//!
//! Leptos + WASM front-end for the patient/doctor healthcare portal.
//!
//! The crate owns the client-side session lifecycle (token storage, auth
//! store, initialization gate, role guards) and the list-state hooks that
//! wrap each backend REST collection. All business logic lives behind the
//! REST API; this crate only keeps the browser's view of it consistent.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod hooks;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

/// WASM entry point: install panic/log hooks and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
