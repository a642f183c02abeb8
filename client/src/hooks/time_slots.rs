//! Doctor availability slots.

use super::collection::ResourceHook;
use crate::net::error::ApiError;
use crate::net::records::{BulkSlotsDraft, TimeSlot};
use crate::net::resources::RestResource;
use crate::state::StateCell;
use crate::state::resource::ResourceList;
use crate::state::toast::ToastState;

impl<C, N> ResourceHook<TimeSlot, C, N>
where
    C: StateCell<ResourceList<TimeSlot>>,
    N: StateCell<ToastState>,
{
    /// Cut a time range into equal slots server-side, then reload the list
    /// since the response only reports a count.
    pub async fn bulk_create(&self, draft: &BulkSlotsDraft) -> bool {
        let path = format!("{}create_bulk_slots/", TimeSlot::COLLECTION_PATH);
        let payload = match serde_json::to_value(draft) {
            Ok(payload) => payload,
            Err(err) => {
                self.report(&ApiError::decode(err));
                return false;
            }
        };
        self.list().update_state(ResourceList::begin);
        match self.client().post(&path, payload).await {
            Ok(_) => {
                self.success("Créneaux créés", Some("Les créneaux ont été générés avec succès"));
                self.fetch_all().await
            }
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    pub async fn fetch_for_date(&self, date: &str) -> bool {
        let path = format!("{}?date={}", TimeSlot::LIST_PATH, crate::util::url::percent_encode(date));
        self.fetch_from(&path).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{Harness, cell};

    #[test]
    fn bulk_create_refetches_the_list() {
        let h = Harness::new();
        let toasts = cell(ToastState::default());
        let hook = ResourceHook::<TimeSlot, _, _>::new(cell(ResourceList::default()), toasts.clone(), h.client.clone());
        h.transport
            .ok(json!({"created": 2}))
            .ok(json!([{"id": 1, "start_time": "09:00"}, {"id": 2, "start_time": "09:30"}]));
        let draft = BulkSlotsDraft {
            date: "2025-06-02".to_owned(),
            start_time: "09:00".to_owned(),
            end_time: "10:00".to_owned(),
            slot_duration: 30,
        };

        assert!(futures::executor::block_on(hook.bulk_create(&draft)));

        assert_eq!(
            h.transport.paths(),
            ["/api/appointments/doctor-availability/create_bulk_slots/", "/api/appointments/doctor-availability/"]
        );
        assert_eq!(hook.items().len(), 2);
        assert_eq!(toasts.borrow().items[0].title, "Créneaux créés");
    }

    #[test]
    fn date_filter_is_encoded_in_query() {
        let h = Harness::new();
        let hook = ResourceHook::<TimeSlot, _, _>::new(cell(ResourceList::default()), cell(ToastState::default()), h.client.clone());
        h.transport.ok(json!({"results": []}));

        futures::executor::block_on(hook.fetch_for_date("2025-06-02"));

        assert_eq!(h.transport.paths(), ["/api/appointments/doctor-availability/?date=2025-06-02"]);
    }
}
