// src/models/feedback.rs
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedDetails {
    pub name: String,
    pub program: String,
    pub whatsapp: String,
}

/// Dialog the landing page renders after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "dialog", rename_all = "snake_case")]
pub enum Feedback {
    Success {
        title: String,
        reset_form: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        whatsapp_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        redirect_delay_ms: Option<u64>,
    },
    Warning {
        title: String,
        heading: String,
        message: String,
        details: SavedDetails,
    },
    Error {
        message: String,
    },
}

impl Feedback {
    pub fn is_success(&self) -> bool {
        matches!(self, Feedback::Success { .. })
    }
}
