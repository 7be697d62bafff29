// src/controllers/home_controller.rs
use actix_web::{HttpResponse, get, http::header::ContentType, web};
use chrono::{Datelike, Local};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::update_copyright_year;

// Landing page dengan tahun copyright terkini
#[get("/")]
pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let path = state.config.static_dir.join("index.html");
    let html = tokio::fs::read_to_string(&path).await.map_err(|e| {
        log::error!("Gagal membaca {:?}: {:?}", path, e);
        AppError::PageNotFound
    })?;

    let html = update_copyright_year(
        &html,
        &state.config.copyright_placeholder_year,
        Local::now().year(),
    );

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
