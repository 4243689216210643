//! String viewer library
//!
//! A small node graph host whose StringViewer nodes carry a read-only text
//! display that follows each execution result.

pub mod constants;
pub mod error;
pub mod nodes;
pub mod plugin_interface;
pub mod plugins;

// Re-export commonly used types
pub use error::{Error, Result};
pub use plugin_interface::{Extension, ExecutionResult, ExecutedMessage, NodeData, NodeOutput, ParameterChange};
pub use plugins::ExtensionManager;
pub use nodes::utility::StringViewerExtension;
