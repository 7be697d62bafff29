// src/transport.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, multipart::Form};

use crate::error::TransportError;
use crate::models::registration::RegistrationRecord;
use crate::models::remote::RemoteReply;
use crate::utils::iso_millis;

/// One way of delivering a registration to the remote endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, record: &RegistrationRecord) -> Result<RemoteReply, TransportError>;
}

pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

// Kirim sebagai JSON (metode utama)
pub struct JsonTransport {
    client: Client,
    endpoint: String,
}

impl JsonTransport {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for JsonTransport {
    fn name(&self) -> &'static str {
        "json"
    }

    async fn deliver(&self, record: &RegistrationRecord) -> Result<RemoteReply, TransportError> {
        let response = self.client.post(&self.endpoint).json(record).send().await?;
        read_reply(self.name(), response).await
    }
}

// Kirim sebagai multipart form (cadangan)
pub struct MultipartTransport {
    client: Client,
    endpoint: String,
}

impl MultipartTransport {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for MultipartTransport {
    fn name(&self) -> &'static str {
        "multipart"
    }

    async fn deliver(&self, record: &RegistrationRecord) -> Result<RemoteReply, TransportError> {
        let form = Form::new()
            .text("name", record.name.clone())
            .text("program", record.program.clone())
            .text("nik", record.nik.clone())
            .text("phone", record.phone.clone())
            .text("address", record.address.clone())
            .text("timestamp", iso_millis::format(&record.timestamp));

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;
        read_reply(self.name(), response).await
    }
}

async fn read_reply(transport: &str, response: Response) -> Result<RemoteReply, TransportError> {
    let status = response.status();
    log::debug!("[{transport}] response status: {status}");

    if !status.is_success() {
        return Err(TransportError::Status(status));
    }

    // Respon sudah diterima, body yang rusak tetap dianggap terkirim
    match response.text().await {
        Ok(body) => Ok(RemoteReply::from_body(&body)),
        Err(e) => {
            log::warn!("[{transport}] gagal membaca body respon: {e}");
            Ok(RemoteReply::Unparsed)
        }
    }
}
