// src/probe.rs
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;

use crate::error::TransportError;
use crate::models::remote::ConnectionStatus;

/// Last thing the connectivity probe saw.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    pub checked_at: DateTime<Utc>,
    pub status: Option<String>,
    pub error: Option<String>,
}

pub async fn probe_connection(
    client: &Client,
    endpoint: &str,
) -> Result<ConnectionStatus, TransportError> {
    log::info!("Menguji koneksi API...");

    let response = client
        .get(endpoint)
        .query(&[("test", "connection")])
        .send()
        .await?
        .error_for_status()?;
    let status: ConnectionStatus = response.json().await?;

    log::info!("API Status: {}", status.status);
    if status.status.contains('✅') {
        log::info!("API terhubung dengan baik");
    }
    Ok(status)
}

/// Probes once and folds the result into a report; failures are only logged.
pub async fn check_connection(client: &Client, endpoint: &str) -> ConnectionReport {
    match probe_connection(client, endpoint).await {
        Ok(ConnectionStatus { status }) => ConnectionReport {
            checked_at: Utc::now(),
            status: Some(status),
            error: None,
        },
        Err(e) => {
            log::warn!("Tes koneksi API gagal: {e}");
            ConnectionReport {
                checked_at: Utc::now(),
                status: None,
                error: Some(e.to_string()),
            }
        }
    }
}
