// src/submission.rs
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, TransportError};
use crate::models::registration::{PendingRegistration, RegistrationForm, RegistrationRecord};
use crate::models::remote::RemoteReply;
use crate::queue::PendingQueue;
use crate::transport::{JsonTransport, MultipartTransport, Transport, build_client};
use crate::validation::FormValidator;

/// Ordered delivery strategies, tried until one gets a reply.
pub struct SubmissionPipeline {
    transports: Vec<Arc<dyn Transport>>,
}

#[derive(Debug)]
pub struct Delivered {
    pub transport: &'static str,
    pub reply: RemoteReply,
}

impl SubmissionPipeline {
    pub fn new(transports: Vec<Arc<dyn Transport>>) -> Self {
        Self { transports }
    }

    /// JSON first, multipart as fallback, both against the configured endpoint.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_client(config.request_timeout)?;
        Ok(Self::new(vec![
            Arc::new(JsonTransport::new(client.clone(), &config.endpoint)) as Arc<dyn Transport>,
            Arc::new(MultipartTransport::new(client, &config.endpoint)),
        ]))
    }

    pub fn primary(&self) -> Option<Arc<dyn Transport>> {
        self.transports.first().cloned()
    }

    pub async fn dispatch(
        &self,
        record: &RegistrationRecord,
    ) -> Result<Delivered, Vec<(&'static str, TransportError)>> {
        let mut failures = Vec::with_capacity(self.transports.len());

        for transport in &self.transports {
            log::info!("Mengirim data {} via {}", record.nik, transport.name());
            match transport.deliver(record).await {
                Ok(reply) => {
                    return Ok(Delivered {
                        transport: transport.name(),
                        reply,
                    });
                }
                Err(e) => {
                    log::warn!("Pengiriman via {} gagal: {}", transport.name(), e);
                    failures.push((transport.name(), e));
                }
            }
        }

        Err(failures)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Succeeded,
    Queued,
    Reported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "outcome", rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Done(OutcomeKind),
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    Succeeded {
        record: RegistrationRecord,
        transport: &'static str,
        reply: RemoteReply,
    },
    Queued {
        entry: PendingRegistration,
    },
    Reported {
        record: RegistrationRecord,
        message: Option<String>,
    },
}

impl SubmissionOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            SubmissionOutcome::Succeeded { .. } => OutcomeKind::Succeeded,
            SubmissionOutcome::Queued { .. } => OutcomeKind::Queued,
            SubmissionOutcome::Reported { .. } => OutcomeKind::Reported,
        }
    }
}

/// Runs one registration at a time through validation, the transport chain
/// and, as a last resort, the pending queue.
pub struct SubmissionController {
    state: Mutex<SubmissionState>,
    pipeline: SubmissionPipeline,
    queue: Arc<PendingQueue>,
}

impl SubmissionController {
    pub fn new(pipeline: SubmissionPipeline, queue: Arc<PendingQueue>) -> Self {
        Self {
            state: Mutex::new(SubmissionState::Idle),
            pipeline,
            queue,
        }
    }

    pub fn pipeline(&self) -> &SubmissionPipeline {
        &self.pipeline
    }

    pub fn queue(&self) -> &Arc<PendingQueue> {
        &self.queue
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    pub async fn submit_form(
        &self,
        form: &RegistrationForm,
    ) -> Result<SubmissionOutcome, AppError> {
        if self.is_submitting() {
            log::warn!("Pendaftaran lain masih diproses, permintaan diabaikan");
            return Err(AppError::SubmissionInProgress);
        }

        let form = form.normalized();
        let mut validator = FormValidator::new();
        if !validator.validate(&form) {
            log::info!("Validasi gagal: {} field", validator.errors().len());
            return Err(AppError::Validation(validator.into_errors()));
        }

        let in_flight = self.begin()?;
        let outcome = self.submit(form.into_record(Utc::now())).await;
        in_flight.finish(outcome.kind());
        Ok(outcome)
    }

    fn begin(&self) -> Result<InFlight<'_>, AppError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == SubmissionState::Submitting {
            return Err(AppError::SubmissionInProgress);
        }
        *state = SubmissionState::Submitting;
        Ok(InFlight {
            state: &self.state,
            outcome: None,
        })
    }

    async fn submit(&self, record: RegistrationRecord) -> SubmissionOutcome {
        let failures = match self.pipeline.dispatch(&record).await {
            Ok(Delivered {
                reply: RemoteReply::Rejected { message },
                transport,
            }) => {
                log::warn!("Endpoint menolak data via {transport}: {message:?}");
                return SubmissionOutcome::Reported { record, message };
            }
            Ok(Delivered { transport, reply }) => {
                log::info!("Data berhasil dikirim via {transport}");
                return SubmissionOutcome::Succeeded {
                    record,
                    transport,
                    reply,
                };
            }
            Err(failures) => failures,
        };

        log::warn!(
            "Semua metode pengiriman gagal ({}), menyimpan ke antrean lokal",
            failures.len()
        );
        match self.queue.append(record.clone()).await {
            Ok(entry) => SubmissionOutcome::Queued { entry },
            Err(e) => {
                log::error!("Gagal menyimpan data ke antrean lokal: {e}");
                SubmissionOutcome::Reported {
                    record,
                    message: None,
                }
            }
        }
    }
}

// Mengembalikan state saat keluar dari Submitting, termasuk saat future di-drop
struct InFlight<'a> {
    state: &'a Mutex<SubmissionState>,
    outcome: Option<OutcomeKind>,
}

impl InFlight<'_> {
    fn finish(mut self, outcome: OutcomeKind) {
        self.outcome = Some(outcome);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = match self.outcome {
            Some(outcome) => SubmissionState::Done(outcome),
            None => SubmissionState::Idle,
        };
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::error::TransportError;
    use crate::models::registration::RegistrationRecord;
    use crate::models::remote::RemoteReply;
    use crate::transport::Transport;

    #[derive(Clone)]
    pub enum Behavior {
        Reply(RemoteReply),
        Fail,
    }

    pub struct FakeTransport {
        pub name: &'static str,
        pub behavior: Behavior,
        pub calls: AtomicUsize,
        pub delivered: std::sync::Mutex<Vec<RegistrationRecord>>,
        pub gate: Option<Arc<Notify>>,
    }

    impl FakeTransport {
        pub fn new(name: &'static str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                name,
                behavior,
                calls: AtomicUsize::new(0),
                delivered: std::sync::Mutex::new(Vec::new()),
                gate: None,
            })
        }

        pub fn gated(name: &'static str, behavior: Behavior, gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self {
                name,
                behavior,
                calls: AtomicUsize::new(0),
                delivered: std::sync::Mutex::new(Vec::new()),
                gate: Some(gate),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn deliver(
            &self,
            record: &RegistrationRecord,
        ) -> Result<RemoteReply, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.delivered.lock().unwrap().push(record.clone());
            match &self.behavior {
                Behavior::Reply(reply) => Ok(reply.clone()),
                Behavior::Fail => Err(TransportError::Timeout),
            }
        }
    }

    pub fn accepted() -> Behavior {
        Behavior::Reply(RemoteReply::Accepted {
            message: Some("Data berhasil disimpan".into()),
        })
    }
}
