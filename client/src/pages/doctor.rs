//! Doctor home: the patient roster with search and delete.

use leptos::prelude::*;

use crate::components::session_bar::SessionBar;
use crate::hooks::use_collection;
use crate::net::records::Patient;

pub const DOCTOR_LINKS: [(&str, &str); 2] =
    [("/espace-medecin/patients", "Mes patients"), ("/espace-medecin/analyse-tumeur", "Analyse de tumeur")];

pub fn patient_detail_path(id: i64) -> String {
    format!("/espace-medecin/patients/{id}")
}

#[component]
pub fn DoctorHomePage() -> impl IntoView {
    let patients = use_collection::<Patient>();
    let list = *patients.list();
    let query = RwSignal::new(String::new());
    let pending_delete = RwSignal::new(None::<i64>);

    let search_hook = patients.clone();
    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let hook = search_hook.clone();
        let text = query.get_untracked();
        leptos::task::spawn_local(async move {
            hook.search(&text).await;
        });
    };

    let delete_hook = patients.clone();
    let on_confirm_delete = move |_| {
        let Some(id) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        let hook = delete_hook.clone();
        leptos::task::spawn_local(async move {
            hook.delete(id).await;
        });
    };

    view! {
        <SessionBar links=DOCTOR_LINKS.to_vec()/>
        <section class="page page--patients">
            <h1>"Mes patients"</h1>
            <form class="search-form" on:submit=on_search>
                <input
                    class="search-input"
                    type="search"
                    placeholder="Rechercher un patient..."
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <button type="submit">"Rechercher"</button>
            </form>
            <Show when=move || list.with(|l| l.is_loading)>
                <p class="page__loading">"Chargement..."</p>
            </Show>
            <Show when=move || list.with(|l| l.error.is_some())>
                <p class="page__error">{move || list.with(|l| l.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || list.with(|l| !l.is_loading && l.items.is_empty())>
                <p class="page__empty">"Aucun patient trouvé"</p>
            </Show>
            <ul class="patient-list">
                <For
                    each=move || list.get().items
                    key=|patient: &Patient| patient.id
                    children=move |patient: Patient| {
                        let id = patient.id;
                        view! {
                            <li class="patient-card">
                                <a class="patient-card__name" href=patient_detail_path(id)>{patient.display_name()}</a>
                                <span class="patient-card__contact">{patient.phone.clone()}</span>
                                <button class="patient-card__delete" on:click=move |_| pending_delete.set(Some(id))>
                                    "Supprimer"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
            <Show when=move || pending_delete.get().is_some()>
                <div class="dialog-backdrop" on:click=move |_| pending_delete.set(None)>
                    <div class="dialog" on:click=|ev| ev.stop_propagation()>
                        <h2>"Supprimer le patient ?"</h2>
                        <p>"Cette action est irréversible."</p>
                        <button on:click=move |_| pending_delete.set(None)>"Annuler"</button>
                        <button class="dialog__danger" on:click=on_confirm_delete.clone()>"Supprimer"</button>
                    </div>
                </div>
            </Show>
        </section>
    }
}
