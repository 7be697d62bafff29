// src/presentation.rs
use crate::config::Config;
use crate::models::feedback::{Feedback, SavedDetails};
use crate::submission::SubmissionOutcome;
use crate::utils::whatsapp_link;

pub const GENERIC_ERROR: &str = "Gagal mengirim data. Silakan coba lagi.";

/// Turns submission outcomes into the dialogs shown on the landing page.
#[derive(Debug, Clone)]
pub struct Presenter {
    course_name: String,
    whatsapp_notify: bool,
    whatsapp_delay_ms: u64,
}

impl Presenter {
    pub fn new(
        course_name: impl Into<String>,
        whatsapp_notify: bool,
        whatsapp_delay_ms: u64,
    ) -> Self {
        Self {
            course_name: course_name.into(),
            whatsapp_notify,
            whatsapp_delay_ms,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.course_name.clone(),
            config.whatsapp_notify,
            config.whatsapp_delay_ms,
        )
    }

    pub fn feedback(&self, outcome: &SubmissionOutcome) -> Feedback {
        match outcome {
            SubmissionOutcome::Succeeded { record, .. } => {
                let (whatsapp_url, redirect_delay_ms) = if self.whatsapp_notify {
                    (
                        Some(whatsapp_link(record, &self.course_name)),
                        Some(self.whatsapp_delay_ms),
                    )
                } else {
                    (None, None)
                };
                Feedback::Success {
                    title: format!(
                        "Selamat {}! Pendaftaran {} berhasil.",
                        record.name, record.program
                    ),
                    reset_form: true,
                    whatsapp_url,
                    redirect_delay_ms,
                }
            }
            SubmissionOutcome::Queued { entry } => Feedback::Warning {
                title: "Data Disimpan Sementara".into(),
                heading: "Data Anda Aman!".into(),
                message: "Koneksi internet terdeteksi lambat. Data telah disimpan secara lokal \
                          dan akan dikirim otomatis saat koneksi membaik."
                    .into(),
                details: SavedDetails {
                    name: entry.record.name.clone(),
                    program: entry.record.program.clone(),
                    whatsapp: entry.record.phone.clone(),
                },
            },
            SubmissionOutcome::Reported { message, .. } => Feedback::Error {
                message: message.clone().unwrap_or_else(|| GENERIC_ERROR.into()),
            },
        }
    }
}
