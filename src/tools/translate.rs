//! Nova Translate: language pair selection, input/output areas, and a
//! status line, backed by the background translation worker.

use crate::dock::registry::ToolDescriptor;
use crate::network::{AppMessage, TranslateJob, TranslateOutcome};
use crate::ui::panel::{ToolContext, ToolView};

pub const TOOL_ID: &str = "nova-translate";

/// Source languages; `auto` asks the backend to detect.
const FROM_LANGUAGES: &[(&str, &str)] = &[
    ("auto", "Detect"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("pt", "Portuguese"),
];

const TO_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("pt", "Portuguese"),
];

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(TOOL_ID, "Nova Translate", || {
        Ok(Box::new(TranslateView::default()))
    })
    .with_icon("🌐")
}

pub struct TranslateView {
    from: String,
    to: String,
    input: String,
    output: String,
    status: String,
}

impl Default for TranslateView {
    fn default() -> Self {
        Self {
            from: "auto".into(),
            to: "es".into(),
            input: String::new(),
            output: String::new(),
            status: "Ready".into(),
        }
    }
}

impl TranslateView {
    fn input_id(&self) -> egui::Id {
        egui::Id::new("nova-translate-input")
    }

    /// Validate the current input and stage the UI for a request.
    ///
    /// Empty input clears the output and produces no job. Otherwise the
    /// output is cleared, the status flips to "Translating…", and the job
    /// to hand to the worker is returned.
    fn prepare_submission(&mut self) -> Option<TranslateJob> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            self.output.clear();
            return None;
        }
        self.status = "Translating…".into();
        self.output.clear();
        Some(TranslateJob {
            text,
            from: self.from.clone(),
            to: self.to.clone(),
        })
    }

    /// Apply a worker outcome. Failures touch only the status line; the
    /// output keeps whatever the triggering action left in it.
    fn apply_outcome(&mut self, outcome: &TranslateOutcome) {
        match outcome {
            TranslateOutcome::Translated(text) => {
                self.output = text.clone();
                self.status = "Translated".into();
            }
            TranslateOutcome::TranslationError => self.status = "Translation error".into(),
            TranslateOutcome::NetworkError => self.status = "Network error".into(),
        }
    }

    fn language_selector(
        ui: &mut egui::Ui,
        id: &str,
        current: &mut String,
        languages: &[(&str, &str)],
    ) {
        let selected = languages
            .iter()
            .find(|(code, _)| code == current)
            .map(|(_, label)| *label)
            .unwrap_or(current.as_str());
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for (code, label) in languages {
                    ui.selectable_value(current, (*code).to_string(), *label);
                }
            });
    }
}

impl ToolView for TranslateView {
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolContext<'_>) {
        ui.horizontal(|ui| {
            Self::language_selector(ui, "nova-translate-from", &mut self.from, FROM_LANGUAGES);
            ui.label("→");
            Self::language_selector(ui, "nova-translate-to", &mut self.to, TO_LANGUAGES);
            if ui.button("Translate").clicked() {
                if let Some(job) = self.prepare_submission() {
                    if let Err(e) = ctx.job_tx.try_send(job) {
                        log::warn!("translation job not queued: {e}");
                        self.status = "Network error".into();
                    }
                }
            }
        });

        let input_id = self.input_id();
        ui.add(
            egui::TextEdit::multiline(&mut self.input)
                .id(input_id)
                .hint_text("Type text to translate...")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        ui.add(
            egui::TextEdit::multiline(&mut self.output)
                .interactive(false)
                .hint_text("Translation appears here...")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        ui.small(self.status.as_str());
    }

    fn first_focus(&self) -> Option<egui::Id> {
        Some(self.input_id())
    }

    fn handle_message(&mut self, msg: &AppMessage) {
        let AppMessage::Translation(outcome) = msg;
        self.apply_outcome(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_clears_output_and_sends_nothing() {
        let mut view = TranslateView::default();
        view.output = "stale".into();
        view.input = "   ".into();
        assert_eq!(view.prepare_submission(), None);
        assert!(view.output.is_empty());
    }

    #[test]
    fn submission_trims_input_and_carries_the_language_pair() {
        let mut view = TranslateView {
            from: "en".into(),
            to: "fr".into(),
            input: "  hello  ".into(),
            ..Default::default()
        };
        let job = view.prepare_submission().unwrap();
        assert_eq!(job.text, "hello");
        assert_eq!(job.from, "en");
        assert_eq!(job.to, "fr");
        assert_eq!(view.status, "Translating…");
        assert!(view.output.is_empty());
    }

    #[test]
    fn failed_translation_does_not_populate_the_output() {
        let mut view = TranslateView::default();
        view.input = "hello".into();
        view.prepare_submission().unwrap();

        view.apply_outcome(&TranslateOutcome::NetworkError);
        assert_eq!(view.status, "Network error");
        assert!(view.output.is_empty());

        view.apply_outcome(&TranslateOutcome::TranslationError);
        assert_eq!(view.status, "Translation error");
        assert!(view.output.is_empty());
    }

    #[test]
    fn successful_translation_sets_output_and_status() {
        let mut view = TranslateView::default();
        view.apply_outcome(&TranslateOutcome::Translated("Hola".into()));
        assert_eq!(view.output, "Hola");
        assert_eq!(view.status, "Translated");
    }

    #[test]
    fn late_response_overwrites_an_earlier_one() {
        // No request identity: last arrival wins.
        let mut view = TranslateView::default();
        view.apply_outcome(&TranslateOutcome::Translated("first".into()));
        view.apply_outcome(&TranslateOutcome::Translated("second".into()));
        assert_eq!(view.output, "second");
    }
}
