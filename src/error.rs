use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::models::feedback::FieldError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Data pendaftaran tidak valid")]
    Validation(Vec<FieldError>),

    #[error("Pendaftaran sedang diproses, mohon tunggu")]
    SubmissionInProgress,

    #[error("Konfigurasi tidak valid: {0}")]
    Config(String),

    #[error("Landing page tidak ditemukan")]
    PageNotFound,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::SubmissionInProgress => StatusCode::CONFLICT,
            AppError::PageNotFound => StatusCode::NOT_FOUND,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => json!({
                "success": false,
                "message": self.to_string(),
                "errors": errors,
            }),
            _ => json!({
                "success": false,
                "message": self.to_string(),
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Failure of one delivery attempt against the remote endpoint.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("endpoint answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = e.status() {
            TransportError::Status(status)
        } else {
            TransportError::Network(e)
        }
    }
}

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("pending queue io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pending queue is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}
