// The tool layer: catalog, argument parsing, dispatch, and rendering.

pub mod args;
pub mod catalog;
pub mod dispatch;
pub mod outcome;
pub mod render;

pub use catalog::{catalog, tool_definitions, ToolName, ToolSpec};
pub use dispatch::{Dispatcher, ToolExecutor};
pub use outcome::{TeamQuarters, TendencyFocus, ToolOutcome};
pub use render::render;
