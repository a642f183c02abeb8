//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (cookies, storage,
//! timers, downloads) from page and component logic so the session and
//! resource layers stay testable off-browser.

pub mod cookies;
pub mod files;
pub mod persistence;
pub mod timer;
pub mod url;
pub mod validation;
