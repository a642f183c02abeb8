//! Patient documents: listing and multipart upload.
//!
//! DESIGN
//! ======
//! Uploads are addressed to the signed-in patient's record, so the record is
//! fetched first and its id goes into the form. A successful upload is
//! appended when the response decodes as a document, otherwise the list is
//! reloaded.

#[cfg(test)]
#[path = "documents_test.rs"]
mod documents_test;

use super::collection::ResourceHook;
use crate::net::api;
use crate::net::client::decode;
use crate::net::records::PatientDocument;
use crate::net::resources::RestResource;
use crate::net::transport::FormField;
use crate::net::types::FilePayload;
use crate::state::StateCell;
use crate::state::resource::ResourceList;
use crate::state::toast::ToastState;
use crate::util::validation::validate_document_upload;

pub const UPLOAD_SUCCESS: &str = "Document téléchargé avec succès!";

/// Upload form as filled in by the patient.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentUpload {
    pub title: String,
    pub description: String,
    pub document_type: String,
    pub file: Option<FilePayload>,
}

impl Default for DocumentUpload {
    fn default() -> Self {
        Self { title: String::new(), description: String::new(), document_type: "other".to_owned(), file: None }
    }
}

impl DocumentUpload {
    fn fields(&self, patient_id: i64, file: &FilePayload) -> Vec<FormField> {
        vec![
            FormField::text("patient", patient_id.to_string()),
            FormField::text("title", self.title.trim()),
            FormField::text("description", self.description.as_str()),
            FormField::text("document_type", self.document_type.as_str()),
            FormField::file("file", &file.name, &file.content_type, file.bytes.clone()),
            FormField::text("is_visible_to_all_doctors", "true"),
        ]
    }
}

impl<C, N> ResourceHook<PatientDocument, C, N>
where
    C: StateCell<ResourceList<PatientDocument>>,
    N: StateCell<ToastState>,
{
    pub async fn upload(&self, form: &DocumentUpload) -> bool {
        if let Err(message) = validate_document_upload(&form.title, form.file.as_ref().map(FilePayload::size)) {
            self.report_message(message);
            return false;
        }
        let Some(file) = form.file.as_ref() else {
            return false;
        };

        self.list().update_state(ResourceList::begin);
        let record = match api::fetch_my_record(self.client()).await {
            Ok(record) => record,
            Err(err) => {
                self.report(&err);
                return false;
            }
        };

        match self.client().upload(PatientDocument::COLLECTION_PATH, form.fields(record.id, file)).await {
            Ok(payload) => {
                log::info!("document uploaded for patient {}", record.id);
                self.success(UPLOAD_SUCCESS, None);
                match decode::<PatientDocument>(payload) {
                    Ok(document) if document.id != 0 => {
                        self.list().update_state(|list| list.apply_created(document));
                        true
                    }
                    _ => {
                        self.fetch_all().await;
                        true
                    }
                }
            }
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }
}
