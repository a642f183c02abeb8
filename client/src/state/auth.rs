//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards, the login page, and user-aware components to
//! coordinate redirects and identity-dependent rendering.
//!
//! DESIGN
//! ======
//! `is_authenticated` and `user_type` are derived from `user` rather than
//! stored, so the two can never disagree. Every mutation goes through a
//! named transition. The persisted snapshot keeps the legacy
//! `{state: {user, isAuthenticated, userType}, version: 0}` layout under
//! `auth-storage` so sessions saved by older builds restore cleanly.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{AuthUser, UserType};

pub const AUTH_STORAGE_KEY: &str = "auth-storage";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    user: Option<AuthUser>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.user.as_ref().and_then(|user| user.user_type)
    }

    pub fn has_role(&self, role: UserType) -> bool {
        self.user_type() == Some(role)
    }

    pub fn start_login(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn sign_in(&mut self, user: AuthUser) {
        self.user = Some(user);
        self.is_loading = false;
        self.error = None;
    }

    /// Failed login: drop any user and record why.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.user = None;
        self.is_loading = false;
        self.error = Some(message.into());
    }

    /// Session check failed or found no session. Keeps `error` untouched.
    pub fn clear_session(&mut self) {
        self.user = None;
        self.is_loading = false;
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.is_loading = false;
        self.error = None;
    }

    pub fn set_user(&mut self, user: AuthUser) {
        self.user = Some(user);
        self.error = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn snapshot(&self) -> PersistedSession {
        PersistedSession {
            user: self.user.clone(),
            is_authenticated: self.is_authenticated(),
            user_type: self.user_type(),
        }
    }

    /// Restore a persisted user. Inconsistent snapshots are ignored.
    pub fn restore(&mut self, snapshot: PersistedSession) -> bool {
        match snapshot.user {
            Some(user) if snapshot.is_authenticated && snapshot.user_type == user.user_type => {
                self.user = Some(user);
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub user_type: Option<UserType>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    state: PersistedSession,
    #[serde(default)]
    version: u32,
}

/// Serialize the snapshot in its storage envelope.
pub fn encode_snapshot(snapshot: &PersistedSession) -> Option<String> {
    serde_json::to_string(&Envelope { state: snapshot.clone(), version: 0 }).ok()
}

pub fn decode_snapshot(raw: &str) -> Option<PersistedSession> {
    serde_json::from_str::<Envelope>(raw).ok().map(|envelope| envelope.state)
}
