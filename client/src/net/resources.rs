//! REST collection descriptors.
//!
//! Each backend collection the portal edits is described once by a
//! `RestResource` impl: where to list it, where to create/update/delete, how
//! updates are sent, and which toasts a successful mutation shows. The
//! generic `ResourceHook` does the rest.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use serde::de::DeserializeOwned;

use super::records::{
    Appointment, Consultation, DayOff, ExceptionalSchedule, Medicament, Patient, PatientDocument,
    ReferralPdf, TimeSlot, WeeklySchedule,
};
use super::transport::Method;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

pub trait RestResource: Clone + DeserializeOwned + Send + Sync + 'static {
    /// GET endpoint populating the list (may differ from the collection).
    const LIST_PATH: &'static str;
    /// Collection endpoint: POST target and prefix of item paths.
    const COLLECTION_PATH: &'static str;
    const UPDATE_METHOD: Method = Method::Patch;
    /// Short French label used in toasts and logs.
    const LABEL: &'static str;

    fn id(&self) -> i64;

    fn item_path(id: i64) -> String {
        format!("{}{id}/", Self::COLLECTION_PATH)
    }

    /// Title and description of the success toast, `None` for silent mutations.
    fn notice(mutation: Mutation) -> Option<(String, String)> {
        let outcome = match mutation {
            Mutation::Create => "création réussie",
            Mutation::Update => "mise à jour réussie",
            Mutation::Delete => "suppression réussie",
        };
        Some((format!("{} : {outcome}", Self::LABEL), String::new()))
    }

    /// Description of the error toast shown when the list fails to load.
    fn load_failure_toast(message: &str) -> Option<String> {
        let _ = message;
        None
    }
}

impl RestResource for Patient {
    const LIST_PATH: &'static str = "/api/patients/";
    const COLLECTION_PATH: &'static str = "/api/patients/";
    const UPDATE_METHOD: Method = Method::Put;
    const LABEL: &'static str = "Patient";

    fn id(&self) -> i64 {
        self.id
    }

    fn notice(mutation: Mutation) -> Option<(String, String)> {
        match mutation {
            Mutation::Create => Some(("Patient créé".to_owned(), "Le patient a été créé avec succès".to_owned())),
            Mutation::Update => None,
            Mutation::Delete => {
                Some(("Patient supprimé".to_owned(), "Le patient a été supprimé avec succès".to_owned()))
            }
        }
    }
}

impl RestResource for Appointment {
    const LIST_PATH: &'static str = "/api/appointments/appointments/";
    const COLLECTION_PATH: &'static str = "/api/appointments/appointments/";
    const UPDATE_METHOD: Method = Method::Put;
    const LABEL: &'static str = "Rendez-vous";

    fn id(&self) -> i64 {
        self.id
    }

    fn notice(mutation: Mutation) -> Option<(String, String)> {
        match mutation {
            Mutation::Create => {
                Some(("Rendez-vous créé".to_owned(), "Le rendez-vous a été créé avec succès".to_owned()))
            }
            Mutation::Update | Mutation::Delete => None,
        }
    }
}

impl RestResource for Consultation {
    const LIST_PATH: &'static str = "/api/consultations/api/consultations/";
    const COLLECTION_PATH: &'static str = "/api/consultations/api/consultations/";
    const UPDATE_METHOD: Method = Method::Put;
    const LABEL: &'static str = "Consultation";

    fn id(&self) -> i64 {
        self.id
    }
}

impl RestResource for TimeSlot {
    const LIST_PATH: &'static str = "/api/appointments/doctor-availability/";
    const COLLECTION_PATH: &'static str = "/api/appointments/doctor-availability/";
    const UPDATE_METHOD: Method = Method::Put;
    const LABEL: &'static str = "Créneau";

    fn id(&self) -> i64 {
        self.id
    }
}

impl RestResource for WeeklySchedule {
    const LIST_PATH: &'static str = "/api/appointments/weekly-schedules/my_schedule/";
    const COLLECTION_PATH: &'static str = "/api/appointments/weekly-schedules/";
    const LABEL: &'static str = "Horaire";

    fn id(&self) -> i64 {
        self.id
    }
}

impl RestResource for DayOff {
    const LIST_PATH: &'static str = "/api/appointments/days-off/my_days_off/";
    const COLLECTION_PATH: &'static str = "/api/appointments/days-off/";
    const LABEL: &'static str = "Jour de congé";

    fn id(&self) -> i64 {
        self.id
    }
}

impl RestResource for ExceptionalSchedule {
    const LIST_PATH: &'static str = "/api/appointments/exceptional-schedules/my_exceptional_schedules/";
    const COLLECTION_PATH: &'static str = "/api/appointments/exceptional-schedules/";
    const LABEL: &'static str = "Horaire exceptionnel";

    fn id(&self) -> i64 {
        self.id
    }
}

impl RestResource for Medicament {
    const LIST_PATH: &'static str = "/api/patients/my-medicaments/";
    const COLLECTION_PATH: &'static str = "/api/patients/medicaments/";
    const LABEL: &'static str = "Médicament";

    fn id(&self) -> i64 {
        self.id
    }

    fn notice(mutation: Mutation) -> Option<(String, String)> {
        let title = match mutation {
            Mutation::Create => "Médicament ajouté avec succès",
            Mutation::Update => "Médicament mis à jour",
            Mutation::Delete => "Médicament supprimé",
        };
        Some((title.to_owned(), String::new()))
    }

    fn load_failure_toast(_message: &str) -> Option<String> {
        Some("Impossible de charger vos médicaments".to_owned())
    }
}

impl RestResource for PatientDocument {
    const LIST_PATH: &'static str = "/api/medical-documents/documents/my_documents/";
    const COLLECTION_PATH: &'static str = "/api/medical-documents/documents/";
    const LABEL: &'static str = "Document";

    fn id(&self) -> i64 {
        self.id
    }

    fn load_failure_toast(message: &str) -> Option<String> {
        Some(message.to_owned())
    }
}

impl RestResource for ReferralPdf {
    const LIST_PATH: &'static str = "/api/medical-documents/referral-pdfs/";
    const COLLECTION_PATH: &'static str = "/api/medical-documents/referral-pdfs/";
    const LABEL: &'static str = "Lettre d'orientation";

    fn id(&self) -> i64 {
        self.id
    }
}
