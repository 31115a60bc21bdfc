//! Panel open/close state machine.
//!
//! One binary state per registered tool id, plus the cross-panel invariant
//! that at most one panel is open system-wide. The invariant is enforced
//! inside the `open` transition (close-others-on-open), not as a post-hoc
//! check. The controller is pure state; drawing and the dock icon's
//! "active" highlight are derived from it each frame.

use std::collections::HashMap;

/// Delay between opening a panel and focusing its first control, in
/// seconds. Approximates the slide-up animation; a fixed delay, not an
/// animation-completion signal.
pub const FOCUS_DELAY_SECS: f64 = 0.32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

/// A scheduled focus request for a just-opened panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFocus {
    pub id: String,
    /// Absolute time (same clock as `open`'s `now`) at which to focus.
    pub due: f64,
}

#[derive(Default)]
pub struct PanelController {
    states: HashMap<String, PanelState>,
    pending_focus: Option<PendingFocus>,
}

impl PanelController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `id`, closing any other open panel first, and schedule a focus
    /// request for `now + FOCUS_DELAY_SECS`.
    pub fn open(&mut self, id: &str, now: f64) {
        let others: Vec<String> = self
            .states
            .iter()
            .filter(|(k, s)| **s == PanelState::Open && k.as_str() != id)
            .map(|(k, _)| k.clone())
            .collect();
        for other in others {
            self.close(&other);
        }

        self.states.insert(id.to_string(), PanelState::Open);
        self.pending_focus = Some(PendingFocus {
            id: id.to_string(),
            due: now + FOCUS_DELAY_SECS,
        });
    }

    /// Close `id` unconditionally. Idempotent: closing a closed panel
    /// changes nothing observable.
    pub fn close(&mut self, id: &str) {
        self.states.insert(id.to_string(), PanelState::Closed);
        if self
            .pending_focus
            .as_ref()
            .is_some_and(|pending| pending.id == id)
        {
            self.pending_focus = None;
        }
    }

    /// Close `id` if open, otherwise open it.
    pub fn toggle(&mut self, id: &str, now: f64) {
        if self.is_open(id) {
            self.close(id);
        } else {
            self.open(id, now);
        }
    }

    /// Close every open panel (outside-click / escape dismissal).
    pub fn close_all(&mut self) {
        for state in self.states.values_mut() {
            *state = PanelState::Closed;
        }
        self.pending_focus = None;
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.states.get(id) == Some(&PanelState::Open)
    }

    /// The currently open panel, if any. At most one exists by the `open`
    /// invariant.
    pub fn open_id(&self) -> Option<&str> {
        self.states
            .iter()
            .find(|(_, s)| **s == PanelState::Open)
            .map(|(k, _)| k.as_str())
    }

    /// If a scheduled focus request has come due, hand it out (once).
    pub fn take_due_focus(&mut self, now: f64) -> Option<String> {
        if self.pending_focus.as_ref().is_some_and(|p| now >= p.due) {
            return self.pending_focus.take().map(|p| p.id);
        }
        None
    }
}
