//! Auth store: login, logout, session checks, and snapshot persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `AuthStore` is built per page from `PortalContext` and shared by the
//! login form, the initialization gate, and the route guards. It owns no
//! state itself: it drives transitions on an `AuthState` cell, pushes toasts,
//! and keeps tokens and the persisted snapshot in step.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error. Failures become `AuthState::error`, a
//! toast, and a `None`/`false` result. A failed session check also clears
//! the stored tokens so guards stop retrying. When the `ApiClient` gives up
//! on a `401`, `session_expiry_hook` signs the session out the same way.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use async_trait::async_trait;

use super::guard::SessionProbe;
use super::tokens::migrate_legacy_tokens;
use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::error::error_message;
use crate::net::types::{AuthUser, UserType, profile_user};
use crate::state::StateCell;
use crate::state::auth::{AUTH_STORAGE_KEY, AuthState, decode_snapshot, encode_snapshot};
use crate::state::toast::{ToastKind, ToastState, notify};
use crate::util::persistence::KeyValueStore;

pub const LOGIN_FAILED: &str = "Login failed";

#[derive(Clone)]
pub struct AuthStore<C, N> {
    state: C,
    toasts: N,
    client: ApiClient,
    storage: Arc<dyn KeyValueStore>,
    client_side: bool,
}

impl<C, N> AuthStore<C, N>
where
    C: StateCell<AuthState>,
    N: StateCell<ToastState>,
{
    pub fn new(state: C, toasts: N, client: ApiClient, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { state, toasts, client, storage, client_side: cfg!(feature = "hydrate") }
    }

    /// Whether browser-only work (session checks, legacy migration) runs.
    #[must_use]
    pub fn client_side(mut self, enabled: bool) -> Self {
        self.client_side = enabled;
        self
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn persist(&self) {
        persist_snapshot(&self.state, self.storage.as_ref());
    }

    fn transition(&self, f: impl FnOnce(&mut AuthState)) {
        self.state.update_state(f);
        self.persist();
    }

    /// Load the persisted user if the state has none yet.
    pub fn rehydrate(&self) -> bool {
        if self.state.read_state(AuthState::is_authenticated) {
            return false;
        }
        let Some(snapshot) = self.storage.get(AUTH_STORAGE_KEY).as_deref().and_then(decode_snapshot) else {
            return false;
        };
        let mut restored = false;
        self.state.update_state(|state| restored = state.restore(snapshot));
        if restored {
            log::debug!("auth: restored persisted session");
        }
        restored
    }

    /// Authenticate with email and password. Never retries.
    pub async fn login(&self, email: &str, password: &str) -> Option<AuthUser> {
        self.state.update_state(AuthState::start_login);
        log::info!("auth: login attempt for {email}");

        match api::login(&self.client, email, password).await {
            Ok(response) => {
                if let Some(session) = response.into_session() {
                    self.client.tokens().set_tokens(&session.access, &session.refresh);
                    let user = session.user;
                    self.transition(|state| state.sign_in(user.clone()));
                    notify(
                        &self.toasts,
                        ToastKind::Success,
                        "Connexion réussie",
                        Some(&format!("Bienvenue {}!", user.greeting_name())),
                    );
                    log::info!("auth: signed in as user {}", user.id);
                    return Some(user);
                }
                log::warn!("auth: login response missing tokens or user");
                self.transition(|state| state.reject(LOGIN_FAILED));
                notify(&self.toasts, ToastKind::Error, "Échec de connexion", Some("Vérifiez vos identifiants"));
                None
            }
            Err(err) => {
                let message = error_message(&err);
                log::warn!("auth: login failed: {err}");
                self.transition(|state| state.reject(message.clone()));
                notify(&self.toasts, ToastKind::Error, "Erreur de connexion", Some(&message));
                None
            }
        }
    }

    /// Sign out locally, revoking the refresh token server-side when possible.
    pub async fn logout(&self) {
        self.state.update_state(|state| state.is_loading = true);
        let tokens = self.client.tokens();
        match tokens.refresh_token() {
            Some(refresh) => {
                if let Err(err) = api::logout(&self.client, &refresh).await {
                    log::warn!("auth: logout request failed: {err}");
                }
            }
            None => log::debug!("auth: no refresh token, skipping logout request"),
        }
        tokens.clear_tokens();
        self.transition(AuthState::sign_out);
        notify(&self.toasts, ToastKind::Success, "Déconnexion réussie", Some("À bientôt !"));
    }

    /// Validate the stored access token against the profile endpoint.
    pub async fn check_auth(&self) -> bool {
        if !self.client_side {
            return false;
        }
        let tokens = self.client.tokens();
        migrate_legacy_tokens(self.storage.as_ref(), tokens.as_ref());

        if tokens.access_token().is_none() {
            self.transition(AuthState::clear_session);
            return false;
        }

        self.state.update_state(|state| state.is_loading = true);
        let user = match api::fetch_profile(&self.client).await {
            Ok(payload) => profile_user(&payload),
            Err(err) => {
                log::warn!("auth: profile check failed: {err}");
                None
            }
        };

        match user {
            Some(user) => {
                log::debug!("auth: session valid for user {}", user.id);
                self.transition(|state| {
                    state.set_user(user);
                    state.is_loading = false;
                });
                true
            }
            None => {
                self.transition(AuthState::clear_session);
                tokens.clear_tokens();
                false
            }
        }
    }

    /// Replace the user directly, e.g. after the initial password is set.
    pub fn set_user(&self, user: AuthUser) {
        self.transition(|state| state.set_user(user));
    }

    pub fn clear_error(&self) {
        self.transition(AuthState::clear_error);
    }
}

fn persist_snapshot(state: &impl StateCell<AuthState>, storage: &dyn KeyValueStore) {
    let snapshot = state.read_state(AuthState::snapshot);
    if let Some(raw) = encode_snapshot(&snapshot) {
        storage.set(AUTH_STORAGE_KEY, &raw);
    }
}

/// Hook for `ApiClient::on_session_expired`: drop the user and persist.
///
/// Takes the cell rather than an `AuthStore` because the store owns the
/// client the hook is installed on.
pub fn session_expiry_hook<C>(state: C, storage: Arc<dyn KeyValueStore>) -> impl Fn() + Send + Sync + 'static
where
    C: StateCell<AuthState> + Send + Sync,
{
    move || {
        if state.read_state(AuthState::is_authenticated) {
            log::info!("auth: session expired, signing out");
        }
        state.update_state(AuthState::clear_session);
        persist_snapshot(&state, storage.as_ref());
    }
}

#[async_trait(?Send)]
impl<C, N> SessionProbe for AuthStore<C, N>
where
    C: StateCell<AuthState>,
    N: StateCell<ToastState>,
{
    fn is_authenticated(&self) -> bool {
        self.state.read_state(AuthState::is_authenticated)
    }

    fn user_type(&self) -> Option<UserType> {
        self.state.read_state(AuthState::user_type)
    }

    fn has_tokens(&self) -> bool {
        self.client.tokens().has_tokens()
    }

    async fn recheck(&self) -> bool {
        self.check_auth().await
    }

    fn clear_tokens(&self) {
        self.client.tokens().clear_tokens();
    }
}
