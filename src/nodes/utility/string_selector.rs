//! StringSelector node: forwards `primary` unless it is empty, else `secondary`

use crate::error::Result;
use crate::nodes::{DataType, NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::plugin_interface::{NodeData, NodeOutput};

#[derive(Default)]
pub struct StringSelectorNode;

impl StringSelectorNode {
    /// An empty or absent `primary` falls through to `secondary`, whatever it holds
    pub fn select(primary: Option<&str>, secondary: Option<&str>) -> Option<String> {
        primary
            .filter(|s| !s.is_empty())
            .or(secondary)
            .map(str::to_string)
    }
}

impl NodeFactory for StringSelectorNode {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new("StringSelector", "StringSelector", NodeCategory::utils(), "STRING Selector.")
            .with_inputs(vec![
                PortDefinition::optional("primary", DataType::String).with_force_input(true),
                PortDefinition::optional("secondary", DataType::String).with_force_input(true),
            ])
            .with_outputs(vec![
                PortDefinition::required("STRING", DataType::String).with_description("STRING not disabled."),
            ])
    }

    fn execute(inputs: &[NodeData]) -> Result<NodeOutput> {
        let [primary, secondary] = [0usize, 1].map(|i| inputs.get(i).and_then(NodeData::as_str));
        let selected = Self::select(primary, secondary).map(NodeData::String).unwrap_or(NodeData::None);
        Ok(NodeOutput::values(vec![selected]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        assert_eq!(StringSelectorNode::select(Some("a"), Some("b")).as_deref(), Some("a"));
        assert_eq!(StringSelectorNode::select(Some(""), Some("b")).as_deref(), Some("b"));
        assert_eq!(StringSelectorNode::select(None, None), None);
    }

    #[test]
    fn test_empty_strings_pass_through() {
        assert_eq!(StringSelectorNode::select(Some(""), Some("")).as_deref(), Some(""));
        assert_eq!(StringSelectorNode::select(None, Some("")).as_deref(), Some(""));
        assert_eq!(StringSelectorNode::select(Some(""), None), None);

        let output = StringSelectorNode::execute(&[NodeData::from(""), NodeData::from("")]).unwrap();
        assert_eq!(output.result, vec![NodeData::from("")]);
    }

    #[test]
    fn test_execute_without_inputs() {
        let output = StringSelectorNode::execute(&[NodeData::None, NodeData::None]).unwrap();
        assert_eq!(output.result, vec![NodeData::None]);
    }
}
