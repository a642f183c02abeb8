//! Patient medication list.

use super::collection::ResourceHook;
use crate::net::records::{Medicament, MedicamentDraft};
use crate::state::StateCell;
use crate::state::resource::ResourceList;
use crate::state::toast::ToastState;
use crate::util::validation::{FieldErrors, validate_medicament};

impl<C, N> ResourceHook<Medicament, C, N>
where
    C: StateCell<ResourceList<Medicament>>,
    N: StateCell<ToastState>,
{
    /// Validate locally, then create.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages without issuing a request.
    pub async fn add(&self, draft: &MedicamentDraft) -> Result<Option<Medicament>, FieldErrors> {
        validate_medicament(draft)?;
        Ok(self.create(draft).await)
    }
}
