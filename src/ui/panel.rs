//! The `ToolView` trait and the shared `ToolContext` passed to each panel.
//!
//! To add a new tool:
//! 1. Create a view struct implementing `ToolView`.
//! 2. Build a [`ToolDescriptor`](crate::dock::registry::ToolDescriptor)
//!    whose factory returns it.
//! 3. Register the descriptor; the dock icon and panel appear automatically.

use crate::network::{AppMessage, TranslateJob};
use crate::storage::Storage;
use crate::tools::settings::Settings;
use crate::types::{ClockPrefs, TimerEntry};
use tokio::sync::mpsc::Sender as TokioSender;

/// Mutable view of shared application state handed to every panel's `ui`
/// call. Panels persist their own changes through `storage`.
pub struct ToolContext<'a> {
    pub storage: &'a mut Storage,
    pub timers: &'a mut Vec<TimerEntry>,
    pub clock_prefs: &'a mut ClockPrefs,
    pub settings: &'a mut Settings,
    /// Channel into the background translation worker.
    pub job_tx: &'a TokioSender<TranslateJob>,
}

/// Trait implemented by every tool panel body.
///
/// A view is constructed exactly once, when its descriptor is registered,
/// and owns all widget state for its panel. The orchestrator draws the
/// panel chrome (header, close button) and calls `ui` for the body of the
/// currently open panel each frame.
pub trait ToolView {
    /// Draw the panel body.
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolContext<'_>);

    /// Widget to focus once the open animation would have finished.
    fn first_focus(&self) -> Option<egui::Id> {
        None
    }

    /// Background-worker message dispatch. Views that expect no messages
    /// keep the default no-op.
    fn handle_message(&mut self, _msg: &AppMessage) {}
}
