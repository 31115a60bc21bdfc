//! Clock & Timers: clock format preference, stored alarm timers, and the
//! per-minute firing schedule polled by the orchestrator.

use std::collections::HashSet;

use crate::dock::registry::ToolDescriptor;
use crate::storage::{CLOCK_PREFS_KEY, TIMERS_KEY};
use crate::types::{ClockFormat, TimerEntry};
use crate::ui::panel::{ToolContext, ToolView};

pub const TOOL_ID: &str = "clock-panel";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(TOOL_ID, "Clock & Timers", || Ok(Box::new(ClockView::default())))
        .with_icon("🕒")
}

// ── Firing schedule ────────────────────────────────────────────────────────────

/// Derived, non-persisted firing state for the stored timers.
///
/// Polled once per second with the current `"HH:MM"` minute key. A timer
/// fires when its time equals the key and it has not fired within this
/// minute yet; the fired set is cleared as soon as the minute changes, so a
/// matching timer fires exactly once per matching minute rather than once
/// per second.
#[derive(Default)]
pub struct TimerSchedule {
    minute: String,
    fired: HashSet<(String, String)>,
}

impl TimerSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `minute` and return the timers that fire on this tick.
    pub fn tick(&mut self, timers: &[TimerEntry], minute: &str) -> Vec<TimerEntry> {
        if self.minute != minute {
            self.minute = minute.to_string();
            self.fired.clear();
        }

        let mut due = Vec::new();
        for timer in timers {
            if timer.time != minute {
                continue;
            }
            let key = (timer.label.clone(), timer.time.clone());
            if self.fired.insert(key) {
                due.push(timer.clone());
            }
        }
        due
    }
}

/// Accept exactly `HH:MM` with `00 ≤ HH ≤ 23` and `00 ≤ MM ≤ 59`.
pub fn is_valid_hhmm(s: &str) -> bool {
    let Some((h, m)) = s.split_once(':') else {
        return false;
    };
    if h.len() != 2 || m.len() != 2 {
        return false;
    }
    // `u8::from_str` accepts a leading sign, so digits must be checked first.
    if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (Ok(h), Ok(m)) = (h.parse::<u8>(), m.parse::<u8>()) else {
        return false;
    };
    h < 24 && m < 60
}

// ── Panel view ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ClockView {
    label_draft: String,
    time_draft: String,
}

impl ClockView {
    fn label_id(&self) -> egui::Id {
        egui::Id::new("nova-timer-label")
    }

    fn add_timer(&mut self, ctx: &mut ToolContext<'_>) {
        let label = if self.label_draft.trim().is_empty() {
            "Timer".to_string()
        } else {
            self.label_draft.trim().to_string()
        };
        ctx.timers.push(TimerEntry {
            label,
            time: self.time_draft.clone(),
            recurring: false,
        });
        ctx.storage.set(TIMERS_KEY, &*ctx.timers);
        self.label_draft.clear();
        self.time_draft.clear();
    }
}

impl ToolView for ClockView {
    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolContext<'_>) {
        ui.heading("Clock Settings");
        ui.horizontal(|ui| {
            ui.label("12/24");
            let before = ctx.clock_prefs.format;
            egui::ComboBox::from_id_salt("nova-clock-format")
                .selected_text(match ctx.clock_prefs.format {
                    ClockFormat::TwelveHour => "12-hour",
                    ClockFormat::TwentyFourHour => "24-hour",
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut ctx.clock_prefs.format,
                        ClockFormat::TwelveHour,
                        "12-hour",
                    );
                    ui.selectable_value(
                        &mut ctx.clock_prefs.format,
                        ClockFormat::TwentyFourHour,
                        "24-hour",
                    );
                });
            if ctx.clock_prefs.format != before {
                ctx.storage.set(CLOCK_PREFS_KEY, &*ctx.clock_prefs);
            }
        });

        ui.add_space(6.0);
        ui.heading("Timers");
        ui.horizontal(|ui| {
            let label_id = self.label_id();
            ui.add(
                egui::TextEdit::singleline(&mut self.label_draft)
                    .id(label_id)
                    .hint_text("Label")
                    .desired_width(120.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.time_draft)
                    .hint_text("HH:MM")
                    .desired_width(60.0),
            );
            let valid = is_valid_hhmm(&self.time_draft);
            if ui.add_enabled(valid, egui::Button::new("Add")).clicked() {
                self.add_timer(ctx);
            }
        });

        ui.add_space(4.0);
        egui::ScrollArea::vertical()
            .max_height(220.0)
            .show(ui, |ui| {
                let mut remove: Option<usize> = None;
                for (idx, timer) in ctx.timers.iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.strong(timer.label.as_str());
                        ui.weak(timer.time.as_str());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Delete").clicked() {
                                remove = Some(idx);
                            }
                        });
                    });
                }
                if let Some(idx) = remove {
                    ctx.timers.remove(idx);
                    ctx.storage.set(TIMERS_KEY, &*ctx.timers);
                }
                if ctx.timers.is_empty() {
                    ui.weak("No timers yet");
                }
            });
    }

    fn first_focus(&self) -> Option<egui::Id> {
        Some(self.label_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(label: &str, time: &str) -> TimerEntry {
        TimerEntry {
            label: label.into(),
            time: time.into(),
            recurring: false,
        }
    }

    #[test]
    fn fires_once_per_matching_minute_not_once_per_second() {
        let mut schedule = TimerSchedule::new();
        let timers = vec![timer("T1", "09:00")];

        // 60 one-second polls inside the matching minute.
        let mut fires = 0;
        for _ in 0..60 {
            fires += schedule.tick(&timers, "09:00").len();
        }
        assert_eq!(fires, 1);
    }

    #[test]
    fn rearms_when_the_minute_moves_on() {
        let mut schedule = TimerSchedule::new();
        let timers = vec![timer("T1", "09:00")];

        assert_eq!(schedule.tick(&timers, "09:00").len(), 1);
        assert_eq!(schedule.tick(&timers, "09:01").len(), 0);
        // Next day (or next matching minute): fires again.
        assert_eq!(schedule.tick(&timers, "09:00").len(), 1);
    }

    #[test]
    fn non_matching_minutes_fire_nothing() {
        let mut schedule = TimerSchedule::new();
        let timers = vec![timer("T1", "09:00")];
        assert!(schedule.tick(&timers, "08:59").is_empty());
        assert!(schedule.tick(&timers, "09:01").is_empty());
    }

    #[test]
    fn distinct_timers_on_the_same_minute_all_fire() {
        let mut schedule = TimerSchedule::new();
        let timers = vec![timer("T1", "09:00"), timer("T2", "09:00")];
        let due = schedule.tick(&timers, "09:00");
        assert_eq!(due.len(), 2);
    }

    #[test]
    fn timer_added_mid_minute_still_fires_within_it() {
        let mut schedule = TimerSchedule::new();
        let mut timers = vec![timer("T1", "09:00")];
        schedule.tick(&timers, "09:00");
        timers.push(timer("T2", "09:00"));
        let due = schedule.tick(&timers, "09:00");
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].label, "T2");
    }

    #[test]
    fn hhmm_validation() {
        assert!(is_valid_hhmm("00:00"));
        assert!(is_valid_hhmm("23:59"));
        assert!(!is_valid_hhmm("24:00"));
        assert!(!is_valid_hhmm("12:60"));
        assert!(!is_valid_hhmm("9:00"));
        assert!(!is_valid_hhmm("0900"));
        assert!(!is_valid_hhmm(""));
        assert!(!is_valid_hhmm("ab:cd"));
    }

    #[test]
    fn hhmm_rejects_signed_and_padded_segments() {
        // Signed segments would store a time that never matches the
        // zero-padded minute key.
        assert!(!is_valid_hhmm("+1:30"));
        assert!(!is_valid_hhmm("-1:30"));
        assert!(!is_valid_hhmm("12:+5"));
        assert!(!is_valid_hhmm(" 1:30"));
    }
}
