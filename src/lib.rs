//! Registration gateway for the TikTakTop course landing page.
//!
//! Validates registrations, delivers them to the remote spreadsheet endpoint
//! through an ordered chain of transports, and keeps undeliverable ones in a
//! local pending queue that is replayed at start-up.

pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod presentation;
pub mod probe;
pub mod queue;
pub mod state;
pub mod submission;
pub mod sync;
pub mod transport;
pub mod utils;
pub mod validation;

use actix_web::web::{self, FormConfig, JsonConfig};

/// Payload limits and error handlers shared by the server and tests.
pub fn configure_payloads(cfg: &mut web::ServiceConfig) {
    let json_config = JsonConfig::default()
        .limit(64 * 1024)
        .content_type_required(false) // Kadang header content-type tidak tepat
        .error_handler(|err, _req| {
            log::error!("JSON payload error: {}", err);
            actix_web::error::ErrorBadRequest(format!("Payload error: {}", err))
        });

    let form_config = FormConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            log::error!("Form payload error: {}", err);
            actix_web::error::ErrorBadRequest(format!("Form error: {}", err))
        });

    cfg.app_data(json_config).app_data(form_config);
}
