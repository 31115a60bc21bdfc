//! Dock core: the tool registry and the panel open/close state machine.

pub mod controller;
pub mod registry;
