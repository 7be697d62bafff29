// main.rs
use actix_cors::Cors;
use actix_files::Files;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;

use tiktaktop_registration::config::Config;
use tiktaktop_registration::state::AppState;
use tiktaktop_registration::{configure_payloads, controllers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting up...");

    let state = match Config::load().and_then(AppState::new) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Gagal inisialisasi aplikasi: {}", e);
            std::process::exit(1);
        }
    };

    // Tugas saat start: tes koneksi dan kirim ulang antrean lokal
    actix_web::rt::spawn({
        let state = state.clone();
        async move {
            state.run_connection_probe().await;
        }
    });
    actix_web::rt::spawn({
        let state = state.clone();
        async move {
            match state.sync_pending().await {
                Ok(report) => log::info!(
                    "Sinkronisasi antrean selesai: {} dicoba, {} terkirim, {} tersisa",
                    report.attempted,
                    report.delivered,
                    report.retained
                ),
                Err(e) => log::error!("Gagal membaca antrean lokal: {}", e),
            }
        }
    });

    let bind = (state.config.host.clone(), state.config.port);
    log::info!("listening on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&state.config.allowed_origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .configure(configure_payloads)
            .wrap(cors)
            .wrap(Logger::default())
            .configure(controllers::configure)
            .service(Files::new("/static", &state.config.static_dir))
    })
    .bind(bind)?
    .run()
    .await
}
