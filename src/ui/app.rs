//! Application orchestrator: owns the registry, controller, and shared
//! state, and drives the dock bar plus the open tool panel.

use std::sync::mpsc::{self as std_mpsc, Receiver as StdReceiver};
use std::thread;
use std::time::Duration;

use eframe::egui;
use egui::{Align2, Color32, Rect, RichText};
use jiff::Zoned;
use tokio::sync::mpsc::{self as tokio_mpsc, Sender as TokioSender};

use crate::dock::controller::PanelController;
use crate::dock::registry::{ToolDescriptor, ToolRegistry};
use crate::error::Result;
use crate::network::{AppMessage, TranslateJob, client};
use crate::storage::{CLOCK_PREFS_KEY, Storage, TIMERS_KEY};
use crate::tools::clock::{self, TimerSchedule};
use crate::tools::settings::{self, Settings};
use crate::tools::translate;
use crate::types::{ClockPrefs, TimerEntry};
use crate::ui::panel::ToolContext;
use crate::utils;

/// Height of the dock bar panel.
const BAR_HEIGHT: f32 = 40.0;
/// Fixed tool panel size, anchored just above the bar.
const PANEL_SIZE: [f32; 2] = [560.0, 360.0];
/// How long the bar stays highlighted after a timer fires.
const FLASH_SECS: f64 = 0.9;

const CLASSIC_BLUE: Color32 = Color32::from_rgb(0x25, 0x96, 0xbe);
const DARK_BACKDROP: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);

// ── App struct ─────────────────────────────────────────────────────────────────

/// The top-level application, implementing [`eframe::App`].
///
/// All mechanism lives in the dock structs and the tool views; `App` only:
/// 1. Drains the worker message channel and dispatches to views.
/// 2. Polls the timer schedule once per wall-clock second.
/// 3. Renders the backdrop, the dock bar, and the open panel, and applies
///    the dismissal and focus rules.
pub struct App {
    registry: ToolRegistry,
    controller: PanelController,

    // ── Shared tool state ──────────────────────────────────────────────────
    storage: Storage,
    timers: Vec<TimerEntry>,
    clock_prefs: ClockPrefs,
    settings: Settings,
    schedule: TimerSchedule,

    // ── Worker channels ────────────────────────────────────────────────────
    rx: StdReceiver<AppMessage>,
    job_tx: TokioSender<TranslateJob>,

    // ── Frame-derived state ────────────────────────────────────────────────
    flash_until: Option<f64>,
    applied_appearance: Option<(bool, u32)>,
    background_cache: Option<(u64, Option<egui::load::Bytes>)>,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let (tx, rx) = std_mpsc::channel();
        let (job_tx, job_rx) = tokio_mpsc::channel(8);
        let ctx = cc.egui_ctx.clone();

        // Spawn background Tokio runtime + translation loop onto a dedicated
        // OS thread.
        thread::spawn(move || {
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build Tokio runtime")
                .block_on(client::run_translate_loop(&tx, &ctx, job_rx));
        });

        let storage = Storage::open_default();
        let timers: Vec<TimerEntry> = storage.get_or(TIMERS_KEY, Vec::new());
        let clock_prefs: ClockPrefs = storage.get_or(CLOCK_PREFS_KEY, ClockPrefs::default());
        let loaded_settings = Settings::load(&storage);

        // Register the built-in tools. Adding a new tool = one line here.
        let mut registry = ToolRegistry::new();
        for descriptor in [
            translate::descriptor(),
            clock::descriptor(),
            settings::descriptor(),
        ] {
            if let Err(e) = registry.register(descriptor) {
                log::error!("built-in tool registration failed: {e}");
            }
        }

        Self {
            registry,
            controller: PanelController::new(),
            storage,
            timers,
            clock_prefs,
            settings: loaded_settings,
            schedule: TimerSchedule::new(),
            rx,
            job_tx,
            flash_until: None,
            applied_appearance: None,
            background_cache: None,
        }
    }

    // ── Programmatic tool API ────────────────────────────────────────────────

    /// Register an external tool; its dock icon and panel appear on the next
    /// frame.
    #[allow(dead_code)]
    pub fn register_tool(&mut self, descriptor: ToolDescriptor) -> Result<()> {
        self.registry.register(descriptor)
    }

    #[allow(dead_code)]
    pub fn open_tool(&mut self, id: &str, now: f64) {
        if self.registry.get(id).is_some() {
            self.controller.open(id, now);
        }
    }

    #[allow(dead_code)]
    pub fn close_tool(&mut self, id: &str) {
        self.controller.close(id);
    }

    // ── Appearance ──────────────────────────────────────────────────────────

    /// Push dark-mode and font-size settings into the egui style, only when
    /// they changed (style mutation forces repaints).
    fn apply_appearance(&mut self, ctx: &egui::Context) {
        let desired = (self.settings.dark_mode, self.settings.font_size);
        if self.applied_appearance == Some(desired) {
            return;
        }
        self.applied_appearance = Some(desired);

        ctx.set_visuals(if self.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        let base = self.settings.font_size as f32;
        ctx.style_mut(|style| {
            use egui::{FontFamily, FontId, TextStyle};
            style.text_styles = [
                (TextStyle::Heading, FontId::new(base * 1.4, FontFamily::Proportional)),
                (TextStyle::Body, FontId::new(base, FontFamily::Proportional)),
                (TextStyle::Button, FontId::new(base, FontFamily::Proportional)),
                (TextStyle::Small, FontId::new(base * 0.75, FontFamily::Proportional)),
                (TextStyle::Monospace, FontId::new(base, FontFamily::Monospace)),
            ]
            .into();
        });
    }

    /// Decoded background image bytes, re-cached whenever the setting's
    /// revision changes.
    fn background_bytes(&mut self) -> Option<egui::load::Bytes> {
        let revision = self.settings.background_revision;
        if self.background_cache.as_ref().map(|(r, _)| *r) != Some(revision) {
            let decoded = self
                .settings
                .background
                .as_deref()
                .and_then(settings::decode_data_uri)
                .map(egui::load::Bytes::from);
            self.background_cache = Some((revision, decoded));
        }
        self.background_cache
            .as_ref()
            .and_then(|(_, bytes)| bytes.clone())
    }

    // ── Dock bar ─────────────────────────────────────────────────────────────

    /// Draw the bottom bar (clock block + one icon per registered tool) and
    /// return its screen rect for outside-click detection.
    fn show_dock_bar(&mut self, ctx: &egui::Context, now_wall: &Zoned, now: f64) -> Rect {
        let flashing = self.flash_until.is_some_and(|until| now < until);
        if self.flash_until.is_some_and(|until| now >= until) {
            self.flash_until = None;
        }

        let mut frame = egui::Frame::side_top_panel(&ctx.style());
        if flashing {
            frame = frame.fill(CLASSIC_BLUE);
        }

        let response = egui::TopBottomPanel::bottom("nova-dock-bar")
            .exact_height(BAR_HEIGHT)
            .frame(frame)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let clock_text = utils::format_clock(
                        now_wall.hour(),
                        now_wall.minute(),
                        self.clock_prefs.format,
                    );
                    let clock_response = ui
                        .vertical(|ui| {
                            ui.strong(clock_text);
                            ui.weak(utils::format_date(now_wall));
                        })
                        .response
                        .interact(egui::Sense::click())
                        .on_hover_text("Clock & Timers");
                    if clock_response.clicked() {
                        self.controller.toggle(clock::TOOL_ID, now);
                    }

                    ui.separator();

                    for tool in self.registry.list() {
                        let active = self.controller.is_open(&tool.id);
                        let icon = RichText::new(tool.icon.as_str()).size(16.0);
                        let response = ui
                            .selectable_label(active, icon)
                            .on_hover_text(tool.title.as_str());
                        if response.clicked() {
                            self.controller.toggle(&tool.id, now);
                        }
                    }
                });
            });
        response.response.rect
    }

    // ── Open panel ───────────────────────────────────────────────────────────

    /// Draw the currently open panel (at most one exists), anchored just
    /// above the dock bar.
    fn show_open_panel(&mut self, ctx: &egui::Context) {
        let Some(open_id) = self.controller.open_id().map(str::to_string) else {
            return;
        };
        let Some(tool) = self.registry.get_mut(&open_id) else {
            return;
        };

        let mut close_clicked = false;
        egui::Window::new(tool.title.as_str())
            .id(egui::Id::new(("nova-tool", open_id.as_str())))
            .title_bar(false)
            .resizable(false)
            .fixed_size(PANEL_SIZE)
            .anchor(Align2::LEFT_BOTTOM, egui::vec2(8.0, -(BAR_HEIGHT + 8.0)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(tool.icon.as_str()).size(14.0));
                    ui.heading(tool.title.as_str());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            close_clicked = true;
                        }
                    });
                });
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    let mut tool_ctx = ToolContext {
                        storage: &mut self.storage,
                        timers: &mut self.timers,
                        clock_prefs: &mut self.clock_prefs,
                        settings: &mut self.settings,
                        job_tx: &self.job_tx,
                    };
                    tool.view.ui(ui, &mut tool_ctx);
                });
            });

        if close_clicked {
            self.controller.close(&open_id);
        }
    }

    // ── Dismissal ────────────────────────────────────────────────────────────

    /// Close every open panel on Escape, or on a pointer press that lands on
    /// the backdrop (outside the bar, the panel, and any floating layer such
    /// as a combo-box popup).
    fn handle_dismissal(&mut self, ctx: &egui::Context, bar_rect: Rect) {
        if self.controller.open_id().is_none() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.close_all();
            return;
        }

        let press_pos = ctx.input(|i| {
            if i.pointer.any_pressed() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        if let Some(pos) = press_pos {
            let on_backdrop = ctx
                .layer_id_at(pos)
                .is_none_or(|layer| layer.order == egui::Order::Background);
            if on_backdrop && !bar_rect.contains(pos) {
                self.controller.close_all();
            }
        }
    }
}

// ── eframe::App ────────────────────────────────────────────────────────────────

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Timer polling needs a tick even when no input arrives.
        ctx.request_repaint_after(Duration::from_secs(1));
        let now = ctx.input(|i| i.time);

        // ── 1. Drain worker messages ──────────────────────────────────────────
        while let Ok(msg) = self.rx.try_recv() {
            for tool in self.registry.iter_mut() {
                tool.view.handle_message(&msg);
            }
        }

        // ── 2. Timer schedule ─────────────────────────────────────────────────
        let now_wall = Zoned::now();
        let minute = utils::minute_key(&now_wall);
        let due = self.schedule.tick(&self.timers, &minute);
        if !due.is_empty() {
            for timer in &due {
                log::info!("timer fired: {} — {}", timer.label, timer.time);
            }
            self.controller.open(clock::TOOL_ID, now);
            self.flash_until = Some(now + FLASH_SECS);
        }

        // ── 3. Appearance + backdrop ──────────────────────────────────────────
        self.apply_appearance(ctx);
        let fill = if self.settings.dark_mode {
            DARK_BACKDROP
        } else {
            CLASSIC_BLUE
        };
        let background = self.background_bytes();
        let revision = self.settings.background_revision;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(fill))
            .show(ctx, |ui| {
                if let Some(bytes) = background {
                    let uri = format!("bytes://nova-background-{revision}");
                    egui::Image::from_bytes(uri, bytes).paint_at(ui, ui.max_rect());
                }
            });

        // ── 4. Dock bar + open panel ──────────────────────────────────────────
        let bar_rect = self.show_dock_bar(ctx, &now_wall, now);
        self.show_open_panel(ctx);

        // ── 5. Deferred focus after the open animation ────────────────────────
        if let Some(id) = self.controller.take_due_focus(now) {
            if let Some(tool) = self.registry.get(&id) {
                if let Some(focus_id) = tool.view.first_focus() {
                    ctx.memory_mut(|m| m.request_focus(focus_id));
                }
            }
        }

        // ── 6. Dismissal ──────────────────────────────────────────────────────
        self.handle_dismissal(ctx, bar_rect);
    }
}
