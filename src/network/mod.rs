//! Network layer: inter-thread message types for the translation worker.

pub mod client;

/// A translation request sent from the UI thread to the background worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateJob {
    pub text: String,
    pub from: String,
    pub to: String,
}

/// Result of one translation request.
///
/// There is no request identity: a second request may be started before the
/// first completes, and whichever response arrives last wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    Translated(String),
    /// The API answered but without a usable translation.
    TranslationError,
    /// The request never produced a usable response.
    NetworkError,
}

/// Messages sent from the background worker to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    Translation(TranslateOutcome),
}
