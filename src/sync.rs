// src/sync.rs
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::error::QueueError;
use crate::models::remote::RemoteReply;
use crate::queue::PendingQueue;
use crate::transport::Transport;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub attempted: usize,
    pub delivered: usize,
    pub retained: usize,
}

/// Replays every queued registration once through `transport`, one at a time.
/// Attempts start `interval` apart, counted from the start of the previous
/// attempt; one that runs longer than `interval` delays the next until it
/// finishes, never overlaps it. With `prune` set, entries the endpoint answered are dropped
/// from the queue. Failed entries always stay.
pub async fn replay_pending(
    queue: &PendingQueue,
    transport: &dyn Transport,
    interval: Duration,
    prune: bool,
) -> Result<SyncReport, QueueError> {
    let entries = queue.load().await?;
    let mut report = SyncReport::default();

    if entries.is_empty() {
        return Ok(report);
    }
    log::info!("Mengirim ulang {} data dari antrean lokal", entries.len());

    let mut next_start = Instant::now();
    for entry in &entries {
        tokio::time::sleep_until(next_start).await;
        next_start = Instant::now() + interval;
        report.attempted += 1;

        match transport.deliver(&entry.record).await {
            Ok(reply) => {
                if let RemoteReply::Rejected { message } = &reply {
                    log::warn!("Data antrean {} ditolak endpoint: {:?}", entry.id, message);
                } else {
                    log::info!("Data antrean {} berhasil dikirim ulang", entry.id);
                }
                report.delivered += 1;

                if prune {
                    if let Err(e) = queue.remove(&[entry.id]).await {
                        log::error!("Gagal menghapus {} dari antrean: {}", entry.id, e);
                    }
                }
            }
            Err(e) => {
                log::warn!("Kirim ulang {} gagal: {}", entry.id, e);
            }
        }
    }

    report.retained = queue.load().await?.len();
    Ok(report)
}
