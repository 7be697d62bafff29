// src/controllers/registration_controller.rs
use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{
    FromRequest, HttpMessage, HttpRequest, HttpResponse, Responder, get, http::StatusCode, post,
    web,
};
use serde_json::json;

use crate::error::AppError;
use crate::models::registration::RegistrationForm;
use crate::state::AppState;
use crate::submission::OutcomeKind;

/// Registration body decoded by its Content-Type: urlencoded goes through
/// `web::Form`, everything else (missing header included) through `web::Json`.
/// Only the extractor that matches ever reads the payload.
pub struct RegistrationBody(pub RegistrationForm);

impl FromRequest for RegistrationBody {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if req
            .content_type()
            .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        {
            let form = web::Form::<RegistrationForm>::from_request(req, payload);
            Box::pin(async move { Ok(Self(form.await?.into_inner())) })
        } else {
            let json = web::Json::<RegistrationForm>::from_request(req, payload);
            Box::pin(async move { Ok(Self(json.await?.into_inner())) })
        }
    }
}

// Form dikirim sebagai JSON (fetch) atau urlencoded (submit biasa)
#[post("/api/registrations")]
pub async fn create_registration(
    state: web::Data<AppState>,
    RegistrationBody(form): RegistrationBody,
) -> Result<impl Responder, AppError> {
    let outcome = state.controller.submit_form(&form).await?;
    let feedback = state.presenter.feedback(&outcome);

    let status = match outcome.kind() {
        OutcomeKind::Succeeded => StatusCode::CREATED,
        OutcomeKind::Queued => StatusCode::ACCEPTED,
        OutcomeKind::Reported => StatusCode::BAD_GATEWAY,
    };

    Ok(HttpResponse::build(status).json(json!({
        "success": feedback.is_success(),
        "outcome": outcome.kind(),
        "feedback": feedback,
    })))
}

// Sumber indikator loading di halaman
#[get("/api/registrations/status")]
pub async fn get_submission_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "submitting": state.controller.is_submitting(),
        "state": state.controller.state(),
    }))
}

#[get("/api/connection")]
pub async fn get_connection(state: web::Data<AppState>) -> HttpResponse {
    match state.connection() {
        Some(report) => HttpResponse::Ok().json(report),
        None => HttpResponse::Ok().json(json!({
            "checked_at": null,
            "status": null,
            "error": null,
        })),
    }
}
