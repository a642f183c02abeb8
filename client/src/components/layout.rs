//! Role-guarded layouts for the doctor and patient areas.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each layout owns one `RouteGuard` signal. An effect re-runs the guard
//! whenever the initialization flag or the session changes; the guard
//! itself decides whether to wait, recheck, render the nested route or
//! send the user to `/login`.

use leptos::prelude::*;
use leptos_router::components::Outlet;

use crate::auth::guard::{GuardView, RouteGuard};
use crate::auth::init::use_auth_initialization;
use crate::net::types::UserType;

#[component]
pub fn DoctorLayout() -> impl IntoView {
    view! { <RoleLayout required=UserType::Doctor/> }
}

#[component]
pub fn PatientLayout() -> impl IntoView {
    view! { <RoleLayout required=UserType::Patient/> }
}

/// Renders the nested route only once the session carries `required`.
#[component]
pub fn RoleLayout(required: UserType) -> impl IntoView {
    let ctx = expect_context::<crate::app::PortalContext>();
    let initialized = use_auth_initialization();
    let guard = RwSignal::new(RouteGuard::new(required));

    #[cfg(feature = "hydrate")]
    {
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::use_navigate;

        use crate::auth::guard::{GuardOutcome, LOGIN_PATH, run_guard};
        use crate::util::timer::BrowserSleeper;

        let navigate = use_navigate();
        let ctx = ctx.clone();
        Effect::new(move || {
            let ready = initialized.get();
            ctx.auth.track();
            let store = ctx.auth_store();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let outcome = run_guard(&guard, &store, &BrowserSleeper, ready).await;
                if let GuardOutcome::Redirected { cleared_tokens } = outcome {
                    log::info!("{} layout: redirecting to login (tokens cleared: {cleared_tokens})", required.as_str());
                    navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ctx, initialized);
    }

    let placeholder = move || guard.with(RouteGuard::view).placeholder().unwrap_or_default();

    view! {
        <Show
            when=move || guard.with(RouteGuard::view) == GuardView::Children
            fallback=move || view! { <div class="guard-placeholder">{placeholder}</div> }
        >
            <div class="portal-layout" class:portal-layout--doctor=move || required == UserType::Doctor>
                <Outlet/>
            </div>
        </Show>
    }
}
