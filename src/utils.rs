// src/utils.rs
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use crate::models::registration::RegistrationRecord;

// Karakter yang dibiarkan apa adanya oleh encodeURIComponent
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// Opening tag whose class list holds `copyright` as a whole token
static COPYRIGHT_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<([a-z][a-z0-9]*)\b[^>]*\sclass\s*=\s*"(?:[^"]*\s)?copyright(?:\s[^"]*)?"[^>]*>"#)
        .expect("copyright pattern compiles")
});

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").expect("paragraph pattern compiles")
});

/// Serializes timestamps the way `Date.toISOString()` does.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

// Nomor lokal 08xx menjadi 628xx untuk wa.me
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.strip_prefix('0') {
        Some(rest) => format!("62{}", rest),
        None => digits,
    }
}

pub fn whatsapp_message(record: &RegistrationRecord, course_name: &str) -> String {
    format!(
        "Halo {name}!

Terima kasih telah mendaftar di *{course}*.

📋 **Detail Pendaftaran:**
👤 Nama: {name}
📚 Program: {program}
📱 WhatsApp: {phone}

Tim kami akan menghubungi Anda dalam 1x24 jam untuk konfirmasi.

Salam hangat,
{course} Team",
        name = record.name,
        course = course_name,
        program = record.program,
        phone = record.phone,
    )
}

/// Deep-link that opens WhatsApp with the confirmation message pre-filled.
pub fn whatsapp_link(record: &RegistrationRecord, course_name: &str) -> String {
    let message = whatsapp_message(record, course_name);
    format!(
        "https://wa.me/{}?text={}",
        normalize_phone(&record.phone),
        utf8_percent_encode(&message, URI_COMPONENT)
    )
}

/// Replaces the first `placeholder` inside the first paragraph nested in a
/// `.copyright` element with `year`. Markup outside that paragraph is left
/// untouched, and a page without such a paragraph comes back unchanged.
pub fn update_copyright_year(html: &str, placeholder: &str, year: i32) -> String {
    for open in COPYRIGHT_OPEN.captures_iter(html) {
        let (Some(tag), Some(whole)) = (open.get(1), open.get(0)) else {
            continue;
        };
        let body_start = whole.end();
        let Some(body_end) = closing_tag(html, body_start, tag.as_str()) else {
            continue;
        };
        let Some(text) = PARAGRAPH
            .captures(&html[body_start..body_end])
            .and_then(|caps| caps.get(1))
        else {
            continue;
        };

        let (start, end) = (body_start + text.start(), body_start + text.end());
        return format!(
            "{}{}{}",
            &html[..start],
            html[start..end].replacen(placeholder, &year.to_string(), 1),
            &html[end..]
        );
    }
    html.to_string()
}

/// Byte offset of the `</tag>` that closes an element whose content starts at `from`.
/// Nested elements with the same tag name are skipped.
fn closing_tag(html: &str, from: usize, tag: &str) -> Option<usize> {
    let pattern = Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(tag))).ok()?;
    let mut depth = 1usize;
    for caps in pattern.captures_iter(&html[from..]) {
        let whole = caps.get(0)?;
        if caps.get(1).is_some_and(|slash| slash.is_empty()) {
            depth += 1;
            continue;
        }
        depth -= 1;
        if depth == 0 {
            return Some(from + whole.start());
        }
    }
    None
}
