// src/validation.rs
use validator::Validate;

use crate::models::feedback::FieldError;
use crate::models::registration::RegistrationForm;

// (struct field, id elemen form) dalam urutan tampil di halaman
const FIELDS: [(&str, &str); 6] = [
    ("name", "fullName"),
    ("program", "program"),
    ("nik", "nik"),
    ("phone", "phone"),
    ("address", "address"),
    ("terms", "terms"),
];

/// Holds the invalid markers of one form. Every validation pass starts from a
/// clean slate.
#[derive(Debug, Default)]
pub struct FormValidator {
    markers: Vec<FieldError>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks every field independently and marks each failing one.
    pub fn validate(&mut self, form: &RegistrationForm) -> bool {
        self.reset();

        let Err(errors) = form.validate() else {
            return true;
        };

        let field_errors = errors.field_errors();
        for (key, field_id) in FIELDS {
            let Some(first) = field_errors.get(key).and_then(|errs| errs.first()) else {
                continue;
            };
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            self.mark_invalid(field_id, message);
        }

        self.markers.is_empty()
    }

    pub fn mark_invalid(&mut self, field_id: &str, message: impl Into<String>) {
        let message = message.into();
        match self.markers.iter_mut().find(|m| m.field == field_id) {
            Some(marker) => marker.message = message,
            None => self.markers.push(FieldError {
                field: field_id.to_string(),
                message,
            }),
        }
    }

    pub fn reset(&mut self) {
        self.markers.clear();
    }

    pub fn is_invalid(&self, field_id: &str) -> bool {
        self.markers.iter().any(|m| m.field == field_id)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.markers
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.markers
    }
}
