//! UI layer: App orchestrator and the ToolView/ToolContext panel contract.

pub mod app;
pub mod panel;
