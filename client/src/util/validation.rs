//! Form validation run before anything is sent to the backend.
//!
//! Each validator returns the first failing rule per field as a static
//! French message, ready for inline rendering.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;

use crate::net::records::MedicamentDraft;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const SEGMENTATION_IMAGE_TYPES: [&str; 5] = ["image/png", "image/jpeg", "image/jpg", "image/bmp", "image/gif"];

/// Field name to message, for inline form errors.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

fn into_result(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// # Errors
///
/// Returns per-field messages for `email` and `password`.
pub fn validate_login_input(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    let email = email.trim();
    if email.is_empty() {
        errors.insert("email", "L'email est requis");
    } else if !is_valid_email(email) {
        errors.insert("email", "Format d'email invalide");
    }
    if password.is_empty() {
        errors.insert("password", "Le mot de passe est requis");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert("password", "Le mot de passe doit contenir au moins 8 caractères");
    }
    into_result(errors)
}

/// Rules for a user-chosen password.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Le mot de passe doit contenir au moins 8 caractères");
    }
    let has_lower = password.chars().any(char::is_lowercase);
    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err("Le mot de passe doit contenir au moins une majuscule, une minuscule et un chiffre");
    }
    if password != confirm {
        return Err("Les mots de passe ne correspondent pas");
    }
    Ok(())
}

fn is_valid_date(raw: &str) -> bool {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    time::Date::parse(raw.trim(), format).is_ok()
}

/// # Errors
///
/// Returns per-field messages.
pub fn validate_medicament(draft: &MedicamentDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if draft.name.trim().chars().count() < 2 {
        errors.insert("name", "Le nom du médicament doit contenir au moins 2 caractères");
    }
    if draft.dosage.trim().is_empty() {
        errors.insert("dosage", "Le dosage est requis");
    }
    if draft.frequency.trim().is_empty() {
        errors.insert("frequency", "La fréquence est requise");
    }
    if !is_valid_date(&draft.start_date) {
        errors.insert("start_date", "Date invalide");
    }
    if draft.duration_days == Some(0) {
        errors.insert("duration_days", "La durée doit être d'au moins 1 jour");
    }
    into_result(errors)
}

/// # Errors
///
/// Returns a message when the file is not an accepted image or exceeds 10 MB.
pub fn validate_segmentation_image(content_type: &str, size: u64) -> Result<(), &'static str> {
    if !SEGMENTATION_IMAGE_TYPES.contains(&content_type) {
        return Err("Please upload a valid image file (PNG, JPG, JPEG, BMP, or GIF)");
    }
    if size > MAX_UPLOAD_BYTES {
        return Err("File size must be less than 10MB");
    }
    Ok(())
}

/// # Errors
///
/// Returns the message to toast when the upload form is incomplete.
pub fn validate_document_upload(title: &str, file_size: Option<u64>) -> Result<(), &'static str> {
    let Some(size) = file_size else {
        return Err("Veuillez sélectionner un fichier");
    };
    if size > MAX_UPLOAD_BYTES {
        return Err("Le fichier ne doit pas dépasser 10 MB");
    }
    if title.trim().is_empty() {
        return Err("Veuillez entrer un titre");
    }
    Ok(())
}
