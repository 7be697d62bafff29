// src/models/registration.rs
use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::iso_millis;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^08[0-9]{8,13}$").expect("phone pattern compiles"));

// Data mentah dari form pendaftaran
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegistrationForm {
    #[serde(default, rename = "fullName")]
    #[validate(length(min = 3, message = "Nama lengkap minimal 3 karakter"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Pilih program kursus"))]
    pub program: String,

    #[serde(default)]
    #[validate(length(equal = 16, message = "NIK harus 16 digit"))]
    pub nik: String,

    #[serde(default)]
    #[validate(custom(function = "whatsapp_number"))]
    pub phone: String,

    #[serde(default)]
    #[validate(length(min = 10, message = "Alamat minimal 10 karakter"))]
    pub address: String,

    #[serde(default, deserialize_with = "checkbox")]
    #[validate(custom(function = "consent_given"))]
    pub terms: bool,
}

impl RegistrationForm {
    /// Trims every text field and strips all whitespace from the phone number.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            program: self.program.trim().to_string(),
            nik: self.nik.trim().to_string(),
            phone: self.phone.chars().filter(|c| !c.is_whitespace()).collect(),
            address: self.address.trim().to_string(),
            terms: self.terms,
        }
    }

    pub fn into_record(self, timestamp: DateTime<Utc>) -> RegistrationRecord {
        RegistrationRecord {
            name: self.name,
            program: self.program,
            nik: self.nik,
            phone: self.phone,
            address: self.address,
            timestamp,
        }
    }
}

fn whatsapp_number(phone: &str) -> Result<(), ValidationError> {
    if PHONE_PATTERN.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message(Cow::Borrowed(
            "Format WhatsApp: 08xxxxxxxxxx (10-15 digit)",
        )))
    }
}

fn consent_given(terms: &bool) -> Result<(), ValidationError> {
    if *terms {
        Ok(())
    } else {
        Err(ValidationError::new("terms").with_message(Cow::Borrowed(
            "Anda harus menyetujui syarat dan ketentuan",
        )))
    }
}

// Checkbox HTML dikirim sebagai "on", JSON sebagai boolean
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Checkbox {
        Flag(bool),
        Text(String),
    }

    Ok(match Option::<Checkbox>::deserialize(deserializer)? {
        Some(Checkbox::Flag(flag)) => flag,
        Some(Checkbox::Text(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        ),
        None => false,
    })
}

/// A validated registration, the only shape ever sent to the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub name: String,
    pub program: String,
    pub nik: String,
    pub phone: String,
    pub address: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// Entry of the pending queue. Field names match the stored JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRegistration {
    #[serde(flatten)]
    pub record: RegistrationRecord,
    #[serde(with = "iso_millis")]
    pub saved_at: DateTime<Utc>,
    pub id: Uuid,
}

impl PendingRegistration {
    pub fn new(record: RegistrationRecord) -> Self {
        Self {
            record,
            saved_at: Utc::now(),
            id: Uuid::new_v4(),
        }
    }
}
