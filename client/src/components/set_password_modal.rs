//! First-login modal forcing a patient to choose a password.

#[cfg(test)]
#[path = "set_password_modal_test.rs"]
mod set_password_modal_test;

use leptos::prelude::*;

use crate::net::error::ApiError;

pub const SET_PASSWORD_FAILED: &str = "Une erreur est survenue lors de la définition du mot de passe";

/// The backend reports password-rule violations under `error`.
pub fn set_password_error(err: &ApiError) -> String {
    match err {
        ApiError::Status { body: Some(body), .. } => body
            .get("error")
            .and_then(|value| value.as_str())
            .filter(|text| !text.is_empty())
            .map_or_else(|| SET_PASSWORD_FAILED.to_owned(), str::to_owned),
        _ => SET_PASSWORD_FAILED.to_owned(),
    }
}

/// Blocking modal; `on_done` runs after the password is accepted and the
/// session user no longer needs a reset.
#[component]
pub fn SetPasswordModal(on_done: Callback<()>) -> impl IntoView {
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (pw, pw_confirm) = (password.get_untracked(), confirm.get_untracked());
        if let Err(message) = crate::util::validation::validate_new_password(&pw, &pw_confirm) {
            error.set(Some(message.to_owned()));
            return;
        }
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let store = expect_context::<crate::app::PortalContext>().auth_store();
            leptos::task::spawn_local(async move {
                match crate::net::api::set_initial_password(store.client(), &pw, &pw_confirm).await {
                    Ok(()) => {
                        let user = store.state().with_untracked(|state| state.user().cloned());
                        if let Some(mut user) = user {
                            user.password_needs_reset = false;
                            store.set_user(user);
                        }
                        on_done.run(());
                    }
                    Err(err) => error.set(Some(set_password_error(&err))),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = on_done;
        }
    };

    view! {
        <div class="dialog-backdrop">
            <div class="dialog dialog--password" role="dialog" aria-modal="true">
                <h2>"Définir votre mot de passe"</h2>
                <p class="dialog__subtitle">"Première connexion - Configuration requise"</p>
                <div class="dialog__alert">
                    <p class="dialog__alert-title">"Action requise"</p>
                    <p>
                        "Votre compte a été créé par votre médecin. Veuillez définir un mot de passe sécurisé pour accéder à votre espace patient."
                    </p>
                </div>
                <Show when=move || error.get().is_some()>
                    <p class="dialog__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <form class="dialog__form" on:submit=on_submit>
                    <label for="new-password">"Nouveau mot de passe"</label>
                    <input
                        id="new-password"
                        type="password"
                        placeholder="Entrez votre mot de passe"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label for="new-password-confirm">"Confirmer le mot de passe"</label>
                    <input
                        id="new-password-confirm"
                        type="password"
                        placeholder="Confirmez votre mot de passe"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="dialog__button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Définition en cours..." } else { "Définir le mot de passe" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
