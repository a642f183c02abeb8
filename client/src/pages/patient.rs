//! Patient home: medications, documents, referral letters.
//!
//! SYSTEM CONTEXT
//! ==============
//! First-login patients (`password_needs_reset`) get the set-password modal
//! on top of the page until they choose one.

#[cfg(test)]
#[path = "patient_test.rs"]
mod patient_test;

use leptos::prelude::*;

use crate::components::session_bar::SessionBar;
use crate::components::set_password_modal::SetPasswordModal;
use crate::hooks::documents::DocumentUpload;
use crate::hooks::use_collection;
use crate::net::records::{DOCUMENT_TYPES, Medicament, MedicamentDraft, PatientDocument, ReferralPdf};
use crate::util::files::describe;
use crate::util::validation::FieldErrors;

pub const PATIENT_LINKS: [(&str, &str); 1] = [("/espace-patient", "Mon espace")];

/// One-line dosage summary, e.g. `500mg · 3x/jour · 7 jours`.
pub fn medicament_summary(medicament: &Medicament) -> String {
    let mut parts = vec![medicament.dosage.clone(), medicament.frequency.clone()];
    match medicament.duration_days {
        Some(1) => parts.push("1 jour".to_owned()),
        Some(days) => parts.push(format!("{days} jours")),
        None => {}
    }
    parts.retain(|part| !part.trim().is_empty());
    parts.join(" · ")
}

pub fn document_type_label(code: &str) -> &str {
    DOCUMENT_TYPES.iter().find(|(value, _)| *value == code).map_or(code, |(_, label)| *label)
}

#[component]
pub fn PatientHomePage() -> impl IntoView {
    let ctx = expect_context::<crate::app::PortalContext>();
    let auth = ctx.auth;
    let needs_password = move || auth.with(|state| state.user().is_some_and(|user| user.password_needs_reset));
    let dismissed = RwSignal::new(false);

    view! {
        <SessionBar links=PATIENT_LINKS.to_vec()/>
        <Show when=move || needs_password() && !dismissed.get()>
            <SetPasswordModal on_done=Callback::new(move |()| dismissed.set(true))/>
        </Show>
        <div class="page page--patient">
            <MedicamentsSection/>
            <DocumentsSection/>
            <ReferralsSection/>
        </div>
    }
}

#[component]
fn MedicamentsSection() -> impl IntoView {
    let medicaments = use_collection::<Medicament>();
    let list = *medicaments.list();
    let draft = RwSignal::new(MedicamentDraft::default());
    let errors = RwSignal::new(FieldErrors::new());

    let add_hook = medicaments.clone();
    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let hook = add_hook.clone();
        let current = draft.get_untracked();
        leptos::task::spawn_local(async move {
            match hook.add(&current).await {
                Ok(Some(_)) => {
                    draft.set(MedicamentDraft::default());
                    errors.set(FieldErrors::new());
                }
                Ok(None) => {}
                Err(field_errors) => errors.set(field_errors),
            }
        });
    };

    let field = move |name: &'static str| errors.with(|e| e.get(name).copied());
    let text_input = move |name: &'static str, label: &'static str, kind: &'static str| {
        view! {
            <label>
                {label}
                <input
                    type=kind
                    prop:value=move || draft.with(|d| medicament_field(d, name))
                    on:input=move |ev| draft.update(|d| set_medicament_field(d, name, event_target_value(&ev)))
                />
            </label>
            {move || field(name).map(|msg| view! { <p class="form__error">{msg}</p> })}
        }
    };

    let delete_hook = medicaments.clone();
    view! {
        <section class="patient-section">
            <h2>"Mes médicaments"</h2>
            <Show when=move || list.with(|l| l.is_loading)>
                <p class="page__loading">"Chargement..."</p>
            </Show>
            <ul class="medicament-list">
                <For
                    each=move || list.get().items
                    key=|m: &Medicament| m.id
                    children=move |m: Medicament| {
                        let id = m.id;
                        let hook = delete_hook.clone();
                        view! {
                            <li class="medicament">
                                <strong>{m.name.clone()}</strong>
                                <span>{medicament_summary(&m)}</span>
                                <button on:click=move |_| {
                                    let hook = hook.clone();
                                    leptos::task::spawn_local(async move {
                                        hook.delete(id).await;
                                    });
                                }>"Supprimer"</button>
                            </li>
                        }
                    }
                />
            </ul>
            <form class="medicament-form" on:submit=on_add>
                {text_input("name", "Nom", "text")}
                {text_input("dosage", "Dosage", "text")}
                {text_input("frequency", "Fréquence", "text")}
                {text_input("start_date", "Date de début", "date")}
                {text_input("duration_days", "Durée (jours)", "number")}
                <button type="submit">"Ajouter"</button>
            </form>
        </section>
    }
}

fn medicament_field(draft: &MedicamentDraft, name: &str) -> String {
    match name {
        "name" => draft.name.clone(),
        "dosage" => draft.dosage.clone(),
        "frequency" => draft.frequency.clone(),
        "start_date" => draft.start_date.clone(),
        "duration_days" => draft.duration_days.map(|d| d.to_string()).unwrap_or_default(),
        _ => String::new(),
    }
}

fn set_medicament_field(draft: &mut MedicamentDraft, name: &str, value: String) {
    match name {
        "name" => draft.name = value,
        "dosage" => draft.dosage = value,
        "frequency" => draft.frequency = value,
        "start_date" => draft.start_date = value,
        "duration_days" => draft.duration_days = value.trim().parse().ok(),
        _ => {}
    }
}

#[component]
fn DocumentsSection() -> impl IntoView {
    let documents = use_collection::<PatientDocument>();
    let list = *documents.list();
    let form = RwSignal::new(DocumentUpload::default());
    let uploading = RwSignal::new(false);

    let on_pick = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let Some(file) = crate::util::files::first_selected(&input) else {
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::util::files::read_file(&file).await {
                    Ok(payload) => form.update(|f| f.file = Some(payload)),
                    Err(err) => log::warn!("document read failed: {err}"),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let upload_hook = documents.clone();
    let on_upload = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if uploading.get_untracked() {
            return;
        }
        uploading.set(true);
        let hook = upload_hook.clone();
        let current = form.get_untracked();
        leptos::task::spawn_local(async move {
            if hook.upload(&current).await {
                form.set(DocumentUpload::default());
            }
            uploading.set(false);
        });
    };

    view! {
        <section class="patient-section">
            <h2>"Mes documents"</h2>
            <ul class="document-list">
                <For
                    each=move || list.get().items
                    key=|d: &PatientDocument| d.id
                    children=move |d: PatientDocument| {
                        view! {
                            <li class="document">
                                <strong>{d.title.clone()}</strong>
                                <span class="document__type">{document_type_label(&d.document_type).to_owned()}</span>
                                {d.file_url.clone().map(|url| view! { <a href=url target="_blank">"Ouvrir"</a> })}
                            </li>
                        }
                    }
                />
            </ul>
            <form class="document-form" on:submit=on_upload>
                <input
                    type="text"
                    placeholder="Titre"
                    prop:value=move || form.with(|f| f.title.clone())
                    on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                />
                <textarea
                    placeholder="Description"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
                <select on:change=move |ev| form.update(|f| f.document_type = event_target_value(&ev))>
                    {DOCUMENT_TYPES
                        .iter()
                        .map(|(value, label)| {
                            let value = *value;
                            view! {
                                <option value=value selected=move || form.with(|f| f.document_type == value)>
                                    {*label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <input type="file" on:change=on_pick/>
                <span class="document-form__file">
                    {move || form.with(|f| f.file.as_ref().map(describe).unwrap_or_default())}
                </span>
                <button type="submit" disabled=move || uploading.get()>
                    {move || if uploading.get() { "Téléchargement..." } else { "Téléverser" }}
                </button>
            </form>
        </section>
    }
}

#[component]
fn ReferralsSection() -> impl IntoView {
    let referrals = use_collection::<ReferralPdf>();
    let list = *referrals.list();

    view! {
        <section class="patient-section">
            <h2>"Lettres d'orientation"</h2>
            <Show when=move || list.with(|l| l.items.is_empty() && !l.is_loading)>
                <p class="page__empty">"Aucune lettre d'orientation"</p>
            </Show>
            <ul class="referral-list">
                <For
                    each=move || list.get().items
                    key=|r: &ReferralPdf| r.id
                    children=move |r: ReferralPdf| {
                        view! {
                            <li class="referral">
                                <span>{format!("{} → {}", r.assigned_by_name, r.specialist_name)}</span>
                                {r.pdf_url.clone().map(|url| view! { <a href=url target="_blank">"Télécharger le PDF"</a> })}
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}
