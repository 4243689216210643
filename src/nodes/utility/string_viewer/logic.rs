//! StringViewer backend

use crate::plugin_interface::{ExecutionResult, NodeData, NodeOutput};

/// Backend of the StringViewer node
pub struct StringViewerLogic;

impl StringViewerLogic {
    /// Pass the text through and report it to the editor for display
    pub fn view_str(text: &str) -> NodeOutput {
        NodeOutput::values(vec![NodeData::String(text.to_string())])
            .with_ui(ExecutionResult::text(text))
    }
}
