//! Session lifecycle: token storage, the auth store, the initialization
//! gate, and role-based route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! `store::AuthStore` is the only writer of `AuthState`. `init` decides when
//! a page mount has finished its first session check, and `guard` decides
//! what a protected layout shows or where it navigates.

pub mod guard;
pub mod init;
pub mod store;
pub mod tokens;
