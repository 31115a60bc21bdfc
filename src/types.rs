//! Shared data-model types for persisted state and the translation REST API.
//!
//! # Serialization strategy
//!
//! Persisted records keep the key and field names of the storage schema
//! (`nova_timers_v1`, `nova_clock_prefs_v1`, …) so an existing storage
//! file is read back unchanged across versions. Transient runtime state
//! (e.g. a timer's fired marker) is deliberately **not** serialized; it is
//! recomputed every tick from the stored time-of-day.

use serde::{Deserialize, Serialize};

// ── Persisted: Timers ──────────────────────────────────────────────────────────

/// One stored alarm-style timer.
///
/// `time` is a wall-clock `"HH:MM"` string compared verbatim against the
/// formatted current minute; it is never parsed into a duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEntry {
    pub label: String,
    pub time: String,
    #[serde(default)]
    pub recurring: bool,
}

// ── Persisted: Clock preferences ───────────────────────────────────────────────

/// 12- or 24-hour clock display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    #[default]
    #[serde(rename = "12")]
    TwelveHour,
    #[serde(rename = "24")]
    TwentyFourHour,
}

/// Stored clock preferences (`nova_clock_prefs_v1`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ClockPrefs {
    pub format: ClockFormat,
}

// ── REST: MyMemory translation response ────────────────────────────────────────

/// Response envelope from `GET api.mymemory.translated.net/get`.
///
/// Only the translated text is consumed; the status code and match fields
/// the API also returns are ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    #[serde(rename = "responseData")]
    pub response_data: Option<TranslateResponseData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponseData {
    #[serde(rename = "translatedText")]
    pub translated_text: Option<String>,
}
