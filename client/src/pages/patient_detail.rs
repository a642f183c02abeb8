//! Doctor view of a single patient record.
//!
//! An unknown id sends the doctor back to the roster instead of showing an
//! empty page.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::session_bar::SessionBar;
use crate::hooks::patients::{PATIENTS_LIST_ROUTE, PatientLookup};
use crate::hooks::use_resource;
use crate::net::records::Patient;
use crate::pages::doctor::DOCTOR_LINKS;

/// Label/value rows shown on the record card; blanks are dropped.
pub fn record_rows(patient: &Patient) -> Vec<(&'static str, String)> {
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        ("Date de naissance", patient.date_of_birth.clone()),
        ("Sexe", patient.gender.clone()),
        ("Téléphone", patient.phone.clone()),
        ("Email", optional(&patient.email)),
        ("Adresse", patient.address.clone()),
        ("Groupe sanguin", optional(&patient.blood_type)),
        ("Allergies", optional(&patient.allergies)),
        ("Antécédents", optional(&patient.medical_history)),
        ("Traitements en cours", optional(&patient.current_medications)),
        ("Contact d'urgence", patient.emergency_contact_name.clone()),
        ("Téléphone d'urgence", patient.emergency_contact_phone.clone()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .collect()
}

#[component]
pub fn PatientDetailPage() -> impl IntoView {
    let patients = use_resource::<Patient>();
    let params = use_params_map();
    let lookup = RwSignal::new(None::<PatientLookup>);

    #[cfg(feature = "hydrate")]
    {
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::use_navigate;

        let navigate = use_navigate();
        Effect::new(move || {
            let id = params.with(|p| p.get("id").and_then(|raw| raw.parse::<i64>().ok()));
            let hook = patients.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let outcome = match id {
                    Some(id) => hook.lookup(id).await,
                    None => PatientLookup::Missing,
                };
                if outcome == PatientLookup::Missing {
                    navigate(PATIENTS_LIST_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                lookup.set(Some(outcome));
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (patients, params);
    }

    view! {
        <SessionBar links=DOCTOR_LINKS.to_vec()/>
        <section class="page page--patient-detail">
            <a class="page__back" href=PATIENTS_LIST_ROUTE>"← Retour à la liste"</a>
            {move || match lookup.get() {
                None => view! { <p class="page__loading">"Chargement..."</p> }.into_any(),
                Some(PatientLookup::Missing) => view! { <p class="page__loading">"Redirection..."</p> }.into_any(),
                Some(PatientLookup::Failed(message)) => view! { <p class="page__error">{message}</p> }.into_any(),
                Some(PatientLookup::Found(patient)) => view! {
                    <article class="patient-record">
                        <h1>{patient.display_name()}</h1>
                        <dl>
                            {record_rows(&patient)
                                .into_iter()
                                .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                                .collect_view()}
                        </dl>
                    </article>
                }
                .into_any(),
            }}
        </section>
    }
}
