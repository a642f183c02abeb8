//! Toast stack with per-kind auto-dismiss.

use leptos::prelude::*;

use crate::state::toast::{Toast, ToastState};

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<crate::app::PortalContext>().toasts;

    // Arm one timer per toast as it appears.
    #[cfg(feature = "hydrate")]
    {
        let armed = StoredValue::new(0_u64);
        Effect::new(move || {
            let fresh = toasts.with(|state| state.pending_since(armed.get_value()));
            for toast in fresh {
                armed.set_value(toast.id);
                let id = toast.id;
                gloo_timers::callback::Timeout::new(toast.kind.duration_ms(), move || {
                    toasts.update(|state| state.dismiss(id));
                })
                .forget();
            }
        });
    }

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.get().items
                key=|toast: &Toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() role="status">
                            <div class="toast__body">
                                <strong class="toast__title">{toast.title.clone()}</strong>
                                {toast.description.clone().map(|text| {
                                    view! { <p class="toast__description">{text}</p> }
                                })}
                            </div>
                            <button
                                class="toast__close"
                                aria-label="Fermer"
                                on:click=move |_| toasts.update(|state: &mut ToastState| state.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
