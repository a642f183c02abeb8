//! Networking modules for the portal's REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` moves bytes, `client` adds bearer auth and token refresh,
//! `api` names the one-off endpoints, `resources` describes the CRUD
//! collections, and `types`/`records` define the wire schema.

pub mod api;
pub mod client;
pub mod error;
pub mod records;
pub mod resources;
pub mod transport;
pub mod types;
