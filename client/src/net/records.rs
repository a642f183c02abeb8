//! Backend record and draft shapes for the portal's REST collections.
//!
//! DESIGN
//! ======
//! Records are decoded leniently: every struct is `#[serde(default)]` and
//! nullable backend columns are `Option`, so a missing optional field never
//! drops an item from a list. Unknown fields are ignored. Drafts carry only
//! what the client sends on create/update.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: String,
    pub age: Option<u32>,
    pub gender: String,
    pub address: String,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
    pub current_medications: Option<String>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relation: String,
    pub insurance_provider: Option<String>,
    pub insurance_number: Option<String>,
    pub doctor: Option<i64>,
    pub doctor_name: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Patient {
    pub fn display_name(&self) -> String {
        match self.full_name.as_deref().map(str::trim) {
            Some(full) if !full.is_empty() => full.to_owned(),
            _ => format!("{} {}", self.first_name, self.last_name).trim().to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSlot {
    pub id: i64,
    pub doctor: i64,
    pub doctor_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
    pub duration_minutes: u32,
    pub is_past: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkSlotsDraft {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub slot_duration: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appointment {
    pub id: i64,
    pub patient: i64,
    pub doctor: i64,
    pub time_slot: Option<i64>,
    pub consultation_type: String,
    pub status: String,
    pub status_display: String,
    pub reason_for_visit: String,
    pub symptoms: String,
    pub priority: String,
    pub contact_phone: String,
    pub patient_notes: String,
    pub doctor_notes: String,
    pub appointment_datetime: String,
    pub is_upcoming: bool,
    pub is_today: bool,
    pub can_cancel: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub patient: i64,
    pub doctor: i64,
    pub time_slot: i64,
    pub consultation_type: String,
    pub reason_for_visit: String,
    pub symptoms: String,
    pub priority: String,
    pub contact_phone: String,
    pub patient_notes: String,
}

/// Booking on a slot the backend materializes on demand.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualSlotBooking {
    pub patient: i64,
    pub doctor: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub consultation_type: String,
    pub reason_for_visit: String,
    pub symptoms: String,
    pub priority: String,
    pub contact_phone: String,
    pub patient_notes: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consultation {
    pub id: i64,
    pub appointment: Option<i64>,
    pub status: String,
    pub status_display: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration_minutes: Option<u32>,
    pub chief_complaint: String,
    pub history_of_present_illness: String,
    pub vital_signs: Map<String, Value>,
    pub physical_examination: String,
    pub assessment: String,
    pub diagnosis: String,
    pub treatment_plan: String,
    pub prescriptions: String,
    pub follow_up_instructions: String,
    pub next_appointment_recommended: bool,
    pub follow_up_date: Option<String>,
    pub doctor_notes: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Medicament {
    pub id: i64,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: String,
    pub duration_days: Option<u32>,
    pub instructions: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicamentDraft {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: String,
    pub duration_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub status: String,
}

impl Default for MedicamentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            dosage: String::new(),
            frequency: String::new(),
            start_date: String::new(),
            duration_days: None,
            instructions: None,
            status: "active".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientDocument {
    pub id: i64,
    pub patient: i64,
    pub patient_name: String,
    pub uploaded_by_name: String,
    pub document_type: String,
    pub title: String,
    pub description: String,
    pub file_url: Option<String>,
    pub file_size: Option<String>,
    pub file_extension: Option<String>,
    pub is_visible_to_all_doctors: bool,
    pub uploaded_at: String,
}

/// Document categories accepted by the upload endpoint, with their labels.
pub const DOCUMENT_TYPES: [(&str, &str); 6] = [
    ("medical_test", "Résultat de test médical"),
    ("prescription", "Ordonnance"),
    ("medical_image", "Image médicale"),
    ("report", "Rapport médical"),
    ("insurance", "Document d'assurance"),
    ("other", "Autre"),
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferralPdf {
    pub id: i64,
    pub patient_name: String,
    pub specialist_name: String,
    pub assigned_by_name: String,
    pub pdf_url: Option<String>,
    pub generated_at: String,
    pub referral_reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklySchedule {
    pub id: i64,
    pub doctor: i64,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u8,
    pub day_name: Option<String>,
    pub is_available: bool,
    pub morning_start: Option<String>,
    pub morning_end: Option<String>,
    pub afternoon_start: Option<String>,
    pub afternoon_end: Option<String>,
    pub appointment_duration: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyScheduleDraft {
    pub day_of_week: u8,
    pub is_available: bool,
    pub morning_start: Option<String>,
    pub morning_end: Option<String>,
    pub afternoon_start: Option<String>,
    pub afternoon_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_duration: Option<u32>,
}

/// Defaults applied to every weekday by the schedule initializer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afternoon_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afternoon_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_duration: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayOff {
    pub id: i64,
    pub doctor: i64,
    pub date: String,
    pub is_full_day: bool,
    pub unavailable_start: Option<String>,
    pub unavailable_end: Option<String>,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DayOffDraft {
    pub date: String,
    pub is_full_day: bool,
    pub unavailable_start: Option<String>,
    pub unavailable_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExceptionalSchedule {
    pub id: i64,
    pub doctor: i64,
    pub date: String,
    pub morning_start: Option<String>,
    pub morning_end: Option<String>,
    pub afternoon_start: Option<String>,
    pub afternoon_end: Option<String>,
    pub appointment_duration: u32,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExceptionalScheduleDraft {
    pub date: String,
    pub morning_start: Option<String>,
    pub morning_end: Option<String>,
    pub afternoon_start: Option<String>,
    pub afternoon_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityCheck {
    pub available: bool,
    pub day_off: Option<DayOff>,
}
