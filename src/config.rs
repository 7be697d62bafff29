// src/config.rs
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use crate::error::AppError;

pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbyxOku_tvcEF88FQCCQoNcpI81WcJaZkqAGB-06qhOBFSkxw7FTZopjeaNwT8CSRTae/exec";

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub pending_queue_path: PathBuf,
    pub replay_interval: Duration,
    pub prune_replayed: bool,
    pub course_name: String,
    pub whatsapp_notify: bool,
    pub whatsapp_delay_ms: u64,
    pub static_dir: PathBuf,
    pub copyright_placeholder_year: String,
    pub allowed_origin: String,
}

impl Config {
    /// Reads every setting from the environment, falling back to defaults.
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            endpoint: try_load("REGISTRATION_ENDPOINT", DEFAULT_ENDPOINT)?,
            host: try_load("HOST", "127.0.0.1")?,
            port: try_load("PORT", "8000")?,
            request_timeout: Duration::from_secs(try_load("REQUEST_TIMEOUT_SECS", "10")?),
            pending_queue_path: try_load("PENDING_QUEUE_PATH", "data/pending_registrations.json")?,
            replay_interval: Duration::from_millis(try_load("REPLAY_INTERVAL_MS", "1000")?),
            prune_replayed: try_load("PRUNE_REPLAYED", "true")?,
            course_name: try_load("COURSE_NAME", "TikTakTop Course")?,
            whatsapp_notify: try_load("WHATSAPP_NOTIFY", "true")?,
            whatsapp_delay_ms: try_load("WHATSAPP_DELAY_MS", "2000")?,
            static_dir: try_load("STATIC_DIR", "./public")?,
            copyright_placeholder_year: try_load("COPYRIGHT_PLACEHOLDER_YEAR", "2023")?,
            allowed_origin: try_load("ALLOWED_ORIGIN", "http://localhost:3000")?,
        })
    }

    /// Settings for a gateway talking to `endpoint`, everything else at defaults.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            host: "127.0.0.1".into(),
            port: 8000,
            request_timeout: Duration::from_secs(10),
            pending_queue_path: PathBuf::from("data/pending_registrations.json"),
            replay_interval: Duration::from_secs(1),
            prune_replayed: true,
            course_name: "TikTakTop Course".into(),
            whatsapp_notify: true,
            whatsapp_delay_ms: 2000,
            static_dir: PathBuf::from("./public"),
            copyright_placeholder_year: "2023".into(),
            allowed_origin: "http://localhost:3000".into(),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        log::info!("{key} tidak diatur, memakai default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e| {
        log::warn!("Nilai {key} tidak valid: {e}");
        AppError::Config(format!("{key}: {e}"))
    })
}
