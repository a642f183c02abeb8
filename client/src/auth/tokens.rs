//! Access/refresh token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The REST client reads the bearer token from a `TokenStore`; the auth
//! store writes it after login and clears it on logout or a failed session
//! check. In the browser tokens live in cookies so they survive reloads.
//!
//! TRADE-OFFS
//! ==========
//! Tokens are opaque strings: no JWT decoding or expiry check happens
//! client-side. An expired access token is discovered by the backend's `401`.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use std::sync::{Mutex, PoisonError};

use crate::util::persistence::KeyValueStore;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const ACCESS_TOKEN_DAYS: i64 = 1;
pub const REFRESH_TOKEN_DAYS: i64 = 7;

pub trait TokenStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn set_tokens(&self, access: &str, refresh: &str);
    fn clear_tokens(&self);

    /// True only when both tokens are present.
    fn has_tokens(&self) -> bool {
        self.access_token().is_some() && self.refresh_token().is_some()
    }
}

/// Cookie-backed tokens (`access_token` for 1 day, `refresh_token` for 7).
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieTokenStore {
    secure: bool,
}

impl CookieTokenStore {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn from_config() -> Self {
        Self::new(crate::config::cookie_secure())
    }

    #[cfg(feature = "hydrate")]
    fn document() -> Option<web_sys::HtmlDocument> {
        use wasm_bindgen::JsCast;
        web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
    }

    fn read(name: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let header = Self::document()?.cookie().ok()?;
            crate::util::cookies::parse_cookie(&header, name)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = name;
            None
        }
    }

    fn write(line: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(document) = Self::document() {
                if document.set_cookie(line).is_err() {
                    log::warn!("cookie write rejected");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = line;
        }
    }
}

impl TokenStore for CookieTokenStore {
    fn access_token(&self) -> Option<String> {
        Self::read(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Option<String> {
        Self::read(REFRESH_TOKEN_KEY)
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        use crate::util::cookies::set_cookie_line;
        Self::write(&set_cookie_line(ACCESS_TOKEN_KEY, access, ACCESS_TOKEN_DAYS, self.secure));
        Self::write(&set_cookie_line(REFRESH_TOKEN_KEY, refresh, REFRESH_TOKEN_DAYS, self.secure));
    }

    fn clear_tokens(&self) {
        use crate::util::cookies::expire_cookie_line;
        Self::write(&expire_cookie_line(ACCESS_TOKEN_KEY));
        Self::write(&expire_cookie_line(REFRESH_TOKEN_KEY));
    }
}

#[derive(Debug, Default)]
struct TokenSlots {
    access: Option<String>,
    refresh: Option<String>,
}

/// In-process tokens for non-browser targets.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slots: Mutex<TokenSlots>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let store = Self::new();
        store.set_tokens(access, refresh);
        store
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, TokenSlots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.slots().access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.slots().refresh.clone()
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        let mut slots = self.slots();
        slots.access = Some(access.to_owned()).filter(|t| !t.is_empty());
        slots.refresh = Some(refresh.to_owned()).filter(|t| !t.is_empty());
    }

    fn clear_tokens(&self) {
        *self.slots() = TokenSlots::default();
    }
}

/// Move tokens left in `localStorage` by older builds into `tokens`.
///
/// Only runs when both legacy keys are present; returns whether it did.
pub fn migrate_legacy_tokens(storage: &dyn KeyValueStore, tokens: &dyn TokenStore) -> bool {
    let (Some(access), Some(refresh)) = (storage.get(ACCESS_TOKEN_KEY), storage.get(REFRESH_TOKEN_KEY)) else {
        return false;
    };
    if access.is_empty() || refresh.is_empty() {
        return false;
    }
    tokens.set_tokens(&access, &refresh);
    storage.remove(ACCESS_TOKEN_KEY);
    storage.remove(REFRESH_TOKEN_KEY);
    log::info!("migrated legacy localStorage tokens to cookies");
    true
}
