//! StringViewer node implementation
//!
//! - mod.rs: Node metadata and factory implementation
//! - logic.rs: Backend that echoes its input as a display payload
//! - extension.rs: Display widget binding for StringViewer nodes
//! - parameters.rs: egui interface for the node's widgets

mod extension;
mod logic;
pub mod parameters;

pub use extension::*;
pub use logic::*;

use crate::constants::string_viewer;
use crate::error::Result;
use crate::nodes::{DataType, NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::nodes::widgets::InputConfig;
use crate::plugin_interface::{NodeData, NodeOutput};

/// StringViewer node factory: an output node that displays its text input
#[derive(Default)]
pub struct StringViewerNode;

impl NodeFactory for StringViewerNode {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            string_viewer::NODE_TYPE,
            "StringViewer",
            NodeCategory::utils(),
            "String Viewer."
        )
        .with_inputs(vec![
            PortDefinition::required("text", DataType::String)
                .with_description("Text to display.")
                .with_widget(InputConfig::new().with_multiline(true))
                .with_force_input(true),
        ])
        .with_outputs(vec![
            PortDefinition::required("STRING", DataType::String).with_description("A text."),
        ])
        .with_output_node(true)
        .with_tags(vec!["string", "viewer", "output"])
    }

    fn execute(inputs: &[NodeData]) -> Result<NodeOutput> {
        let text = inputs.first().and_then(NodeData::as_str).unwrap_or_default();
        Ok(StringViewerLogic::view_str(text))
    }
}
