//! Top bar for the signed-in areas: greeting, section links, logout.

use leptos::prelude::*;

/// Greeting line for the signed-in user.
pub fn greeting(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Bonjour, {name}"),
        None => "Bonjour".to_owned(),
    }
}

#[component]
pub fn SessionBar(links: Vec<(&'static str, &'static str)>) -> impl IntoView {
    let ctx = expect_context::<crate::app::PortalContext>();
    let auth = ctx.auth;

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let store = ctx.auth_store();
            // The guarded layout sees the session disappear and redirects.
            leptos::task::spawn_local(async move { store.logout().await });
        }
    };

    view! {
        <header class="session-bar">
            <span class="session-bar__greeting">
                {move || auth.with(|state| greeting(state.user().map(|user| user.greeting_name())))}
            </span>
            <nav class="session-bar__links">
                {links
                    .into_iter()
                    .map(|(href, label)| view! { <a href=href class="session-bar__link">{label}</a> })
                    .collect_view()}
            </nav>
            <button class="session-bar__logout" on:click=on_logout>"Déconnexion"</button>
        </header>
    }
}
