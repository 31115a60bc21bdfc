//! Built-in tools, each shipping a descriptor and a `ToolView`.

pub mod clock;
pub mod settings;
pub mod translate;
