//! Appointment lifecycle actions.

#[cfg(test)]
#[path = "appointments_test.rs"]
mod appointments_test;

use serde_json::json;

use super::collection::ResourceHook;
use crate::net::client::decode;
use crate::net::error::ApiError;
use crate::net::records::{Appointment, VirtualSlotBooking};
use crate::net::resources::RestResource;
use crate::state::StateCell;
use crate::state::resource::ResourceList;
use crate::state::toast::ToastState;

fn action_path(id: i64, action: &str) -> String {
    format!("{}{action}/", Appointment::item_path(id))
}

impl<C, N> ResourceHook<Appointment, C, N>
where
    C: StateCell<ResourceList<Appointment>>,
    N: StateCell<ToastState>,
{
    pub async fn cancel(&self, id: i64, reason: Option<&str>) -> Option<Appointment> {
        self.apply_action(
            &action_path(id, "cancel"),
            json!({ "reason": reason }),
            Some(("Rendez-vous annulé", "Le rendez-vous a été annulé avec succès")),
        )
        .await
    }

    pub async fn complete(&self, id: i64, doctor_notes: Option<&str>) -> Option<Appointment> {
        self.apply_action(
            &action_path(id, "complete"),
            json!({ "doctor_notes": doctor_notes }),
            Some(("Rendez-vous terminé", "Le rendez-vous a été marqué comme terminé")),
        )
        .await
    }

    pub async fn reschedule(&self, id: i64, new_time_slot_id: i64) -> Option<Appointment> {
        self.apply_action(&action_path(id, "reschedule"), json!({ "new_time_slot_id": new_time_slot_id }), None)
            .await
    }

    /// Book on a slot the backend creates on the fly, appending the result.
    pub async fn book(&self, booking: &VirtualSlotBooking) -> Option<Appointment> {
        let path = format!("{}book_with_virtual_slot/", Appointment::COLLECTION_PATH);
        let payload = match serde_json::to_value(booking) {
            Ok(payload) => payload,
            Err(err) => {
                self.report(&ApiError::decode(err));
                return None;
            }
        };
        self.list().update_state(ResourceList::begin);
        match self.client().post(&path, payload).await.and_then(decode::<Appointment>) {
            Ok(appointment) => {
                self.list().update_state(|list| list.apply_created(appointment.clone()));
                self.success("Rendez-vous créé", Some("Le rendez-vous a été créé avec succès"));
                Some(appointment)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }
}
