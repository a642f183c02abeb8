//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render portal chrome (guarded layouts, toasts, modals) and
//! read or write shared state through `PortalContext`.

pub mod layout;
pub mod session_bar;
pub mod set_password_modal;
pub mod toast_host;
