//! Patient-specific hook operations.

#[cfg(test)]
#[path = "patients_test.rs"]
mod patients_test;

use super::collection::ResourceHook;
use crate::net::api;
use crate::net::records::Patient;
use crate::state::StateCell;
use crate::state::resource::{ResourceList, decode_items};
use crate::state::toast::ToastState;

pub const PATIENTS_LIST_ROUTE: &str = "/espace-medecin/patients";

/// Result of opening a patient record page.
#[derive(Clone, Debug, PartialEq)]
pub enum PatientLookup {
    Found(Patient),
    /// No such patient; the page navigates back to the list.
    Missing,
    Failed(String),
}

impl<C, N> ResourceHook<Patient, C, N>
where
    C: StateCell<ResourceList<Patient>>,
    N: StateCell<ToastState>,
{
    pub async fn lookup(&self, id: i64) -> PatientLookup {
        match self.fetch_one(id).await {
            Ok(patient) => PatientLookup::Found(patient),
            Err(err) if err.is_not_found() => PatientLookup::Missing,
            Err(err) => PatientLookup::Failed(crate::net::error::error_message(&err)),
        }
    }

    /// Replace the list with search matches. An empty query reloads all.
    pub async fn search(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return self.fetch_all().await;
        }
        self.list().update_state(ResourceList::begin);
        match api::search_patients(self.client(), query).await {
            Ok(payload) => {
                let items = decode_items::<Patient>(payload, "Patient");
                self.list().update_state(|list| list.replace(items));
                true
            }
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }
}
