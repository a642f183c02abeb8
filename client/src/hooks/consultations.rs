//! Consultation start/complete actions.

use serde_json::{Value, json};

use super::collection::ResourceHook;
use crate::net::records::Consultation;
use crate::net::resources::RestResource;
use crate::state::StateCell;
use crate::state::resource::ResourceList;
use crate::state::toast::ToastState;

impl<C, N> ResourceHook<Consultation, C, N>
where
    C: StateCell<ResourceList<Consultation>>,
    N: StateCell<ToastState>,
{
    pub async fn start(&self, id: i64) -> Option<Consultation> {
        let path = format!("{}start_consultation/", Consultation::item_path(id));
        self.apply_action(&path, json!({}), Some(("Consultation démarrée", "La consultation est en cours"))).await
    }

    /// Close the consultation with the final clinical fields.
    pub async fn complete(&self, id: i64, completion: Value) -> Option<Consultation> {
        let path = format!("{}complete_consultation/", Consultation::item_path(id));
        self.apply_action(&path, completion, Some(("Consultation terminée", "La consultation a été clôturée"))).await
    }
}
