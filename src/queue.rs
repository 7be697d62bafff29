// src/queue.rs
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::QueueError;
use crate::models::registration::{PendingRegistration, RegistrationRecord};

/// Registrations that could not be delivered, kept as one JSON array on disk.
/// Each change rewrites the whole document.
pub struct PendingQueue {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PendingQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Vec<PendingRegistration>, QueueError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    pub async fn append(
        &self,
        record: RegistrationRecord,
    ) -> Result<PendingRegistration, QueueError> {
        let _guard = self.lock.lock().await;

        let mut entries = self.read().await?;
        let entry = PendingRegistration::new(record);
        entries.push(entry.clone());
        self.write(&entries).await?;

        log::info!(
            "Data {} disimpan ke antrean lokal ({} total)",
            entry.id,
            entries.len()
        );
        Ok(entry)
    }

    /// Drops the given entries and returns how many were removed.
    pub async fn remove(&self, ids: &[Uuid]) -> Result<usize, QueueError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let _guard = self.lock.lock().await;

        let mut entries = self.read().await?;
        let before = entries.len();
        entries.retain(|e| !ids.contains(&e.id));
        let removed = before - entries.len();
        if removed > 0 {
            self.write(&entries).await?;
        }
        Ok(removed)
    }

    async fn read(&self) -> Result<Vec<PendingRegistration>, QueueError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    async fn write(&self, entries: &[PendingRegistration]) -> Result<(), QueueError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
