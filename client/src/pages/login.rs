//! Login page: email + password, then a role-based redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! Serves `/` and `/login`. A visitor who already holds a session (restored
//! from the persisted snapshot or confirmed by the profile check) is sent
//! straight to their space instead of seeing the form.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::auth::init::use_auth_initialization;
use crate::net::types::{AuthUser, UserType};
use crate::state::auth::AuthState;
use crate::util::validation::{FieldErrors, validate_login_input};

/// Trim and validate the form before any network call.
///
/// # Errors
///
/// Returns per-field messages keyed by `email` / `password`.
pub fn prepare_credentials(email: &str, password: &str) -> Result<(String, String), FieldErrors> {
    validate_login_input(email, password)?;
    Ok((email.trim().to_owned(), password.to_owned()))
}

/// Where a signed-in user lands.
pub fn landing_path(user: Option<&AuthUser>) -> &'static str {
    UserType::home_path(user.and_then(|u| u.user_type))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<crate::app::PortalContext>();
    let auth = ctx.auth;
    let _initialized = use_auth_initialization();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let field_errors = RwSignal::new(FieldErrors::new());

    #[cfg(feature = "hydrate")]
    {
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::use_navigate;

        let navigate = use_navigate();
        Effect::new(move || {
            let target = auth.with(|state| state.is_authenticated().then(|| landing_path(state.user())));
            if let Some(target) = target {
                navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.with_untracked(|state| state.is_loading) {
            return;
        }
        let credentials = prepare_credentials(&email.get_untracked(), &password.get_untracked());
        let (email_value, password_value) = match credentials {
            Ok(credentials) => credentials,
            Err(errors) => {
                field_errors.set(errors);
                return;
            }
        };
        field_errors.set(FieldErrors::new());

        #[cfg(feature = "hydrate")]
        {
            let store = ctx.auth_store();
            leptos::task::spawn_local(async move {
                // Redirect is handled by the session effect above.
                let _ = store.login(&email_value, &password_value).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, password_value);
        }
    };

    let field_error = move |name: &'static str| field_errors.with(|errors| errors.get(name).copied());
    let busy = move || auth.with(|state: &AuthState| state.is_loading);

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Espace Santé"</h1>
                <p class="login-card__subtitle">"Connectez-vous à votre espace"</p>
                <form class="login-form" on:submit=on_submit novalidate>
                    <label for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        class="login-input"
                        type="email"
                        placeholder="vous@exemple.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    {move || field_error("email").map(|msg| view! { <p class="login-field-error">{msg}</p> })}
                    <label for="login-password">"Mot de passe"</label>
                    <input
                        id="login-password"
                        class="login-input"
                        type="password"
                        placeholder="••••••••"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    {move || field_error("password").map(|msg| view! { <p class="login-field-error">{msg}</p> })}
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Connexion..." } else { "Se connecter" }}
                    </button>
                </form>
                <Show when=move || auth.with(|state| state.error.is_some())>
                    <p class="login-message">{move || auth.with(|state| state.error.clone().unwrap_or_default())}</p>
                </Show>
            </div>
        </div>
    }
}
