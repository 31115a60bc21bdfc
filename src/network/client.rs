//! Background REST client for the MyMemory translation endpoint.

use std::sync::mpsc::Sender as StdSender;

use tokio::sync::mpsc::Receiver;

use crate::network::{AppMessage, TranslateJob, TranslateOutcome};
use crate::types::TranslateResponse;

const ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Long-running async loop: receives [`TranslateJob`]s from the UI thread,
/// performs the REST call, and forwards the outcome back.
///
/// Exits cleanly when either channel closes (UI shut down). No request is
/// cancelled or retried; overlapping requests resolve in arrival order.
pub async fn run_translate_loop(
    tx: &StdSender<AppMessage>,
    ctx: &egui::Context,
    mut job_rx: Receiver<TranslateJob>,
) {
    let client = reqwest::Client::new();
    log::info!("translation worker started");

    while let Some(job) = job_rx.recv().await {
        let outcome = translate(&client, &job).await;
        if tx.send(AppMessage::Translation(outcome)).is_err() {
            break; // UI shut down
        }
        ctx.request_repaint();
    }

    log::info!("translation worker stopped");
}

/// One request against the MyMemory API, mapped onto [`TranslateOutcome`].
async fn translate(client: &reqwest::Client, job: &TranslateJob) -> TranslateOutcome {
    let langpair = format!("{}|{}", job.from, job.to);
    let response = match client
        .get(ENDPOINT)
        .query(&[("q", job.text.as_str()), ("langpair", langpair.as_str())])
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            log::warn!("translation request error: {e}");
            return TranslateOutcome::NetworkError;
        }
    };

    if !response.status().is_success() {
        log::warn!("translation endpoint returned {}", response.status());
        return TranslateOutcome::NetworkError;
    }

    match response.json::<TranslateResponse>().await {
        Ok(parsed) => outcome_from_response(parsed),
        Err(e) => {
            log::warn!("translation response parse error: {e}");
            TranslateOutcome::TranslationError
        }
    }
}

fn outcome_from_response(response: TranslateResponse) -> TranslateOutcome {
    match response
        .response_data
        .and_then(|data| data.translated_text)
        .filter(|text| !text.is_empty())
    {
        Some(text) => TranslateOutcome::Translated(text),
        None => TranslateOutcome::TranslationError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_response_yields_the_translation() {
        let raw = r#"{"responseData":{"translatedText":"Bonjour"},"responseStatus":200}"#;
        let parsed: TranslateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            outcome_from_response(parsed),
            TranslateOutcome::Translated("Bonjour".into())
        );
    }

    #[test]
    fn missing_translation_maps_to_translation_error() {
        let raw = r#"{"responseData":{"translatedText":null},"responseStatus":"403"}"#;
        let parsed: TranslateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(outcome_from_response(parsed), TranslateOutcome::TranslationError);
    }

    #[test]
    fn empty_translation_maps_to_translation_error() {
        let raw = r#"{"responseData":{"translatedText":""}}"#;
        let parsed: TranslateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(outcome_from_response(parsed), TranslateOutcome::TranslationError);
    }
}
