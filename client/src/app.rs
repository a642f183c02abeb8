//! Root application component with routing and the shared portal context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `PortalContext` is the one place session state, toasts, the API client
//! and local persistence are created. Pages and layouts pull it with
//! `expect_context` and build their stores and hooks from it, so nothing in
//! the crate reaches for a global.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::auth::store::{AuthStore, session_expiry_hook};
use crate::auth::tokens::{CookieTokenStore, TokenStore};
use crate::components::layout::{DoctorLayout, PatientLayout};
use crate::components::toast_host::ToastHost;
use crate::net::client::ApiClient;
use crate::net::transport::{HttpTransport, Transport};
use crate::pages::{
    brain_tumor::BrainTumorPage, doctor::DoctorHomePage, login::LoginPage, patient::PatientHomePage,
    patient_detail::PatientDetailPage,
};
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::persistence::{KeyValueStore, LocalStorage};

pub type SignalAuthStore = AuthStore<RwSignal<AuthState>, RwSignal<ToastState>>;

/// Shared handles for one mounted application.
#[derive(Clone)]
pub struct PortalContext {
    pub auth: RwSignal<AuthState>,
    pub toasts: RwSignal<ToastState>,
    pub client: ApiClient,
    pub storage: Arc<dyn KeyValueStore>,
}

impl PortalContext {
    /// Browser wiring: HTTP transport, cookie tokens, `localStorage`.
    /// Under SSR the same types are inert.
    ///
    /// An unrecoverable `401` anywhere clears `auth`, which the route guards
    /// track, so they redirect to the login page.
    pub fn browser() -> Self {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::from_config());
        let tokens: Arc<dyn TokenStore> = Arc::new(CookieTokenStore::from_config());
        let auth = RwSignal::new(AuthState::default());
        let storage: Arc<dyn KeyValueStore> = Arc::new(LocalStorage);
        let client = ApiClient::new(transport, tokens).on_session_expired(session_expiry_hook(auth, storage.clone()));
        Self { auth, toasts: RwSignal::new(ToastState::default()), client, storage }
    }

    pub fn auth_store(&self) -> SignalAuthStore {
        AuthStore::new(self.auth, self.toasts, self.client.clone(), self.storage.clone())
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="fr">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(PortalContext::browser());

    view! {
        <Stylesheet id="leptos" href="/pkg/portal.css"/>
        <Title text="Espace Santé"/>

        <Router>
            <ToastHost/>
            <Routes fallback=|| "Page introuvable.".into_view()>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <ParentRoute path=StaticSegment("espace-medecin") view=DoctorLayout>
                    <Route path=StaticSegment("") view=DoctorHomePage/>
                    <Route path=StaticSegment("patients") view=DoctorHomePage/>
                    <Route path=(StaticSegment("patients"), ParamSegment("id")) view=PatientDetailPage/>
                    <Route path=StaticSegment("analyse-tumeur") view=BrainTumorPage/>
                </ParentRoute>
                <ParentRoute path=StaticSegment("espace-patient") view=PatientLayout>
                    <Route path=StaticSegment("") view=PatientHomePage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
