//! StringConcat node: joins two strings with a separator

use crate::error::Result;
use crate::nodes::{DataType, NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::nodes::widgets::InputConfig;
use crate::plugin_interface::{NodeData, NodeOutput};

#[derive(Default)]
pub struct StringConcatNode;

impl StringConcatNode {
    /// `text_to + sep + text_from`
    pub fn concat(text_from: &str, text_to: &str, sep: &str) -> String {
        let mut out = String::with_capacity(text_from.len() + text_to.len() + sep.len());
        out.push_str(text_to);
        out.push_str(sep);
        out.push_str(text_from);
        out
    }
}

impl NodeFactory for StringConcatNode {
    fn metadata() -> NodeMetadata {
        let multiline = || InputConfig::new().with_default("").with_multiline(true);
        NodeMetadata::new("StringConcat", "StringConcat", NodeCategory::utils(), "Concat string.")
            .with_inputs(vec![
                PortDefinition::required("text_from", DataType::String)
                    .with_description("Text from.")
                    .with_widget(multiline()),
                PortDefinition::required("text_to", DataType::String)
                    .with_description("Text to.")
                    .with_widget(multiline()),
                PortDefinition::required("sep", DataType::String)
                    .with_description("Join separator.")
                    .with_widget(multiline()),
            ])
            .with_outputs(vec![
                PortDefinition::required("STRING", DataType::String).with_description("A text."),
            ])
            .with_tags(vec!["string", "concat"])
    }

    fn execute(inputs: &[NodeData]) -> Result<NodeOutput> {
        let [text_from, text_to, sep] = [0usize, 1, 2].map(|i| inputs.get(i).and_then(NodeData::as_str).unwrap_or(""));
        Ok(NodeOutput::values(vec![NodeData::String(Self::concat(text_from, text_to, sep))]))
    }
}
