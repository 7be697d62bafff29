// src/state.rs
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::Client;

use crate::config::Config;
use crate::error::{AppError, QueueError};
use crate::presentation::Presenter;
use crate::probe::{ConnectionReport, check_connection};
use crate::queue::PendingQueue;
use crate::submission::{SubmissionController, SubmissionPipeline};
use crate::sync::{SyncReport, replay_pending};
use crate::transport::build_client;

pub struct AppState {
    pub config: Config,
    pub client: Client,
    pub controller: SubmissionController,
    pub presenter: Presenter,
    connection: RwLock<Option<ConnectionReport>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = build_client(config.request_timeout)
            .map_err(|e| AppError::Config(format!("HTTP client: {e}")))?;
        let pipeline = SubmissionPipeline::from_config(&config)
            .map_err(|e| AppError::Config(format!("HTTP client: {e}")))?;
        Ok(Self::with_pipeline(config, client, pipeline))
    }

    pub fn with_pipeline(config: Config, client: Client, pipeline: SubmissionPipeline) -> Self {
        let queue = Arc::new(PendingQueue::new(&config.pending_queue_path));
        Self {
            controller: SubmissionController::new(pipeline, queue),
            presenter: Presenter::from_config(&config),
            connection: RwLock::new(None),
            client,
            config,
        }
    }

    pub fn connection(&self) -> Option<ConnectionReport> {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn run_connection_probe(&self) -> ConnectionReport {
        let report = check_connection(&self.client, &self.config.endpoint).await;
        *self
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(report.clone());
        report
    }

    /// Replays the pending queue over the primary transport.
    pub async fn sync_pending(&self) -> Result<SyncReport, QueueError> {
        let Some(primary) = self.controller.pipeline().primary() else {
            return Ok(SyncReport::default());
        };
        replay_pending(
            self.controller.queue(),
            primary.as_ref(),
            self.config.replay_interval,
            self.config.prune_replayed,
        )
        .await
    }
}
