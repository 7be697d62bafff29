#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::json;
use tiktaktop_registration::config::Config;
use tiktaktop_registration::models::registration::RegistrationRecord;

/// How the stand-in spreadsheet endpoint answers POSTs.
#[derive(Clone, Copy)]
pub enum Mode {
    Accept,
    Reject,
    Html,
    FailJsonOnly,
    Down,
    Slow(Duration),
}

#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub content_type: String,
    pub query: String,
    pub body: String,
}

struct Shared {
    mode: Mode,
    hits: Mutex<Vec<Hit>>,
}

pub struct FakeEndpoint {
    pub url: String,
    shared: Arc<Shared>,
    handle: ServerHandle,
}

impl FakeEndpoint {
    pub async fn start(mode: Mode) -> Self {
        let shared = Arc::new(Shared {
            mode,
            hits: Mutex::new(Vec::new()),
        });
        let data = web::Data::from(shared.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(endpoint))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            url: format!("http://{addr}/exec"),
            shared,
            handle,
        }
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.shared.hits.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<Hit> {
        self.hits().into_iter().filter(|h| h.method == "POST").collect()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn endpoint(req: HttpRequest, body: web::Bytes, shared: web::Data<Shared>) -> HttpResponse {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    shared.hits.lock().unwrap().push(Hit {
        method: req.method().to_string(),
        content_type: content_type.clone(),
        query: req.query_string().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    if req.method() == Method::GET {
        return HttpResponse::Ok().json(json!({ "status": "✅ API connected" }));
    }

    let accepted = || HttpResponse::Ok().json(json!({ "success": true, "message": "Data tersimpan" }));
    match shared.mode {
        Mode::Accept => accepted(),
        Mode::Reject => {
            HttpResponse::Ok().json(json!({ "success": false, "message": "NIK sudah terdaftar" }))
        }
        Mode::Html => HttpResponse::Ok().body("<html><body>Moved</body></html>"),
        Mode::FailJsonOnly if content_type.starts_with("application/json") => {
            HttpResponse::InternalServerError().finish()
        }
        Mode::FailJsonOnly => accepted(),
        Mode::Down => HttpResponse::ServiceUnavailable().finish(),
        Mode::Slow(delay) => {
            tokio::time::sleep(delay).await;
            accepted()
        }
    }
}

pub fn config(endpoint: &str, dir: &Path) -> Config {
    let mut config = Config::for_endpoint(endpoint);
    config.pending_queue_path = dir.join("pending.json");
    config.static_dir = dir.join("public");
    config.request_timeout = Duration::from_secs(5);
    config.replay_interval = Duration::from_millis(10);
    config
}

pub fn record(name: &str) -> RegistrationRecord {
    RegistrationRecord {
        name: name.into(),
        program: "Web Dev".into(),
        nik: "1234567890123456".into(),
        phone: "081234567890".into(),
        address: "Jl. Mawar No. 10".into(),
        timestamp: chrono::Utc::now(),
    }
}
