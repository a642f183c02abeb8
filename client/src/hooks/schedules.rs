//! Weekly schedule, days off and exceptional schedules.
//!
//! All three share the collection hook; the extra endpoints here are the
//! doctor-scoped reads and the schedule bootstrap/bulk edit.

#[cfg(test)]
#[path = "schedules_test.rs"]
mod schedules_test;

use serde_json::{Value, json};

use super::collection::ResourceHook;
use crate::net::error::ApiError;
use crate::net::records::{
    AvailabilityCheck, DayOff, ExceptionalSchedule, ScheduleDefaults, WeeklySchedule, WeeklyScheduleDraft,
};
use crate::net::resources::RestResource;
use crate::state::StateCell;
use crate::state::resource::{ResourceList, decode_items};
use crate::state::toast::ToastState;
use crate::util::url::percent_encode;

/// The schedule endpoints wrap their rows in `{"schedules": [...]}`.
fn unwrap_schedules(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if map.contains_key("schedules") => map.remove("schedules").unwrap_or(Value::Null),
        other => other,
    }
}

impl<C, N> ResourceHook<WeeklySchedule, C, N>
where
    C: StateCell<ResourceList<WeeklySchedule>>,
    N: StateCell<ToastState>,
{
    /// Create one row per weekday from shared defaults.
    pub async fn initialize(&self, defaults: &ScheduleDefaults) -> bool {
        let path = format!("{}initialize_schedule/", WeeklySchedule::COLLECTION_PATH);
        let payload = match serde_json::to_value(defaults) {
            Ok(payload) => payload,
            Err(err) => {
                self.report(&ApiError::decode(err));
                return false;
            }
        };
        self.list().update_state(ResourceList::begin);
        self.replace_from(self.client().post(&path, payload).await, ("Horaires initialisés", "Votre semaine type a été créée"))
    }

    pub async fn bulk_update(&self, schedules: &[WeeklyScheduleDraft]) -> bool {
        let path = format!("{}bulk_update/", WeeklySchedule::COLLECTION_PATH);
        let payload = json!({ "schedules": schedules });
        self.list().update_state(ResourceList::begin);
        self.replace_from(self.client().put(&path, payload).await, ("Horaires mis à jour", "Vos horaires ont été enregistrés"))
    }

    pub async fn fetch_for_doctor(&self, doctor_id: i64) -> bool {
        self.fetch_from(&format!("{}doctor_schedule/?doctor_id={doctor_id}", WeeklySchedule::COLLECTION_PATH)).await
    }

    fn replace_from(&self, response: Result<Value, ApiError>, notice: (&str, &str)) -> bool {
        match response {
            Ok(payload) => {
                let rows = decode_items::<WeeklySchedule>(unwrap_schedules(payload), WeeklySchedule::LABEL);
                self.list().update_state(|list| list.replace(rows));
                self.success(notice.0, Some(notice.1));
                true
            }
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }
}

impl<C, N> ResourceHook<DayOff, C, N>
where
    C: StateCell<ResourceList<DayOff>>,
    N: StateCell<ToastState>,
{
    pub async fn fetch_upcoming(&self) -> bool {
        self.fetch_from(&format!("{}?upcoming=true", DayOff::LIST_PATH)).await
    }

    pub async fn fetch_for_doctor(&self, doctor_id: i64) -> bool {
        self.fetch_from(&format!("{}doctor_days_off/?doctor_id={doctor_id}", DayOff::COLLECTION_PATH)).await
    }

    /// Ask whether the current doctor works on `date`. Failures are toasted
    /// and yield `None`; the list is left alone either way.
    pub async fn check_availability(&self, date: &str) -> Option<AvailabilityCheck> {
        let path = format!("{}check_availability/?date={}", DayOff::COLLECTION_PATH, percent_encode(date));
        match self.client().get_json::<AvailabilityCheck>(&path).await {
            Ok(check) => Some(check),
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }
}

impl<C, N> ResourceHook<ExceptionalSchedule, C, N>
where
    C: StateCell<ResourceList<ExceptionalSchedule>>,
    N: StateCell<ToastState>,
{
    pub async fn fetch_for_doctor(&self, doctor_id: i64) -> bool {
        let path = format!("{}doctor_exceptional_schedules/?doctor_id={doctor_id}", ExceptionalSchedule::COLLECTION_PATH);
        self.fetch_from(&path).await
    }
}
