//! Tool registry: id → descriptor mapping plus one-shot view construction.
//!
//! Registering a descriptor is what makes a tool exist: the single registry
//! entry is the backing record for both the dock icon and the tool panel,
//! which are derived from it every frame. That makes the
//! one-icon-one-panel-per-id invariant structural rather than checked.

use crate::error::{AppError, Result};
use crate::ui::panel::{ToolContext, ToolView};

/// Glyph used when a descriptor does not provide an icon.
pub const DEFAULT_ICON: &str = "▣";

/// Factory producing a tool's panel view. Invoked exactly once, at
/// registration time.
pub type BuildFn = Box<dyn FnOnce() -> Result<Box<dyn ToolView>>>;

/// Registration record for one tool.
pub struct ToolDescriptor {
    pub id: String,
    pub title: String,
    /// Dock icon glyph; empty falls back to [`DEFAULT_ICON`].
    pub icon: String,
    pub build: BuildFn,
}

impl ToolDescriptor {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        build: impl FnOnce() -> Result<Box<dyn ToolView>> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: String::new(),
            build: Box::new(build),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// A registered tool: descriptor metadata plus its live view.
pub struct RegisteredTool {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub view: Box<dyn ToolView>,
}

/// Process-wide mapping from tool id to registered tool, in registration
/// order. Order is enumeration convenience only.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `descriptor`, constructing its view exactly once.
    ///
    /// Fails with [`AppError::InvalidDescriptor`] on an empty id. An
    /// existing id is overwritten (title/icon) with a warning, but the
    /// already-built view is kept and the new factory is never run — the
    /// icon and panel for that id already exist. A factory that fails is
    /// caught and replaced with an inline error view; registration still
    /// succeeds.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<()> {
        if descriptor.id.is_empty() {
            return Err(AppError::InvalidDescriptor(
                "descriptor id must be a non-empty string".into(),
            ));
        }

        let icon = if descriptor.icon.is_empty() {
            DEFAULT_ICON.to_string()
        } else {
            descriptor.icon
        };

        if let Some(existing) = self.tools.iter_mut().find(|t| t.id == descriptor.id) {
            log::warn!("overriding registered tool {}", descriptor.id);
            existing.title = descriptor.title;
            existing.icon = icon;
            return Ok(());
        }

        let view = match (descriptor.build)() {
            Ok(view) => view,
            Err(e) => {
                log::error!("view construction failed for {}: {e}", descriptor.id);
                Box::new(ErrorView {
                    message: e.to_string(),
                })
            }
        };

        self.tools.push(RegisteredTool {
            id: descriptor.id,
            title: descriptor.title,
            icon,
            view,
        });
        Ok(())
    }

    /// Look up a tool by id. Never panics.
    pub fn get(&self, id: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut RegisteredTool> {
        self.tools.iter_mut().find(|t| t.id == id)
    }

    /// All registered tools in registration order.
    pub fn list(&self) -> &[RegisteredTool] {
        &self.tools
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RegisteredTool> {
        self.tools.iter_mut()
    }
}

/// Stand-in view shown when a tool's factory failed.
struct ErrorView {
    message: String,
}

impl ToolView for ErrorView {
    fn ui(&mut self, ui: &mut egui::Ui, _ctx: &mut ToolContext<'_>) {
        ui.colored_label(
            egui::Color32::from_rgb(255, 212, 212),
            "Error loading tool",
        );
        ui.small(self.message.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullView;
    impl ToolView for NullView {
        fn ui(&mut self, _ui: &mut egui::Ui, _ctx: &mut ToolContext<'_>) {}
    }

    fn descriptor(id: &str, title: &str) -> ToolDescriptor {
        ToolDescriptor::new(id, title, || Ok(Box::new(NullView)))
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut registry = ToolRegistry::new();
        let err = registry.register(descriptor("", "Nameless")).unwrap_err();
        assert!(matches!(err, AppError::InvalidDescriptor(_)));
        assert!(registry.list().is_empty());
    }

    #[test]
    fn duplicate_id_does_not_create_a_second_entry() {
        let mut registry = ToolRegistry::new();
        registry.register(descriptor("calc", "Calculator")).unwrap();
        registry
            .register(descriptor("calc", "Calculator II").with_icon("∑"))
            .unwrap();

        assert_eq!(registry.list().len(), 1);
        let tool = registry.get("calc").unwrap();
        assert_eq!(tool.title, "Calculator II");
        assert_eq!(tool.icon, "∑");
    }

    #[test]
    fn duplicate_registration_never_runs_the_new_factory() {
        let mut registry = ToolRegistry::new();
        registry.register(descriptor("calc", "Calculator")).unwrap();
        registry
            .register(ToolDescriptor::new("calc", "Calculator II", || {
                panic!("factory must not run for an existing id")
            }))
            .unwrap();
    }

    #[test]
    fn failing_factory_still_registers_the_tool() {
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDescriptor::new("broken", "Broken", || {
                Err(AppError::Render("boom".into()))
            }))
            .unwrap();
        assert!(registry.get("broken").is_some());
    }

    #[test]
    fn missing_icon_falls_back_to_the_default_glyph() {
        let mut registry = ToolRegistry::new();
        registry.register(descriptor("calc", "Calculator")).unwrap();
        assert_eq!(registry.get("calc").unwrap().icon, DEFAULT_ICON);
    }

    #[test]
    fn list_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(descriptor("b", "B")).unwrap();
        registry.register(descriptor("a", "A")).unwrap();
        registry.register(descriptor("c", "C")).unwrap();
        let ids: Vec<&str> = registry.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn get_on_unknown_id_returns_none() {
        let registry = ToolRegistry::new();
        assert!(registry.get("nope").is_none());
    }
}
