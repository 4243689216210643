//! IntSelector node: forwards `primary` unless it is zero, else `secondary`

use crate::error::Result;
use crate::nodes::{DataType, NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::plugin_interface::{NodeData, NodeOutput};

#[derive(Default)]
pub struct IntSelectorNode;

impl IntSelectorNode {
    pub fn select(primary: Option<i64>, secondary: Option<i64>) -> Option<i64> {
        primary.filter(|&v| v != 0).or(secondary)
    }
}

impl NodeFactory for IntSelectorNode {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new("IntSelector", "IntSelector", NodeCategory::utils(), "INT Selector.")
            .with_inputs(vec![
                PortDefinition::optional("primary", DataType::Integer).with_force_input(true),
                PortDefinition::optional("secondary", DataType::Integer).with_force_input(true),
            ])
            .with_outputs(vec![
                PortDefinition::required("INT", DataType::Integer).with_description("INT not disabled."),
            ])
    }

    fn execute(inputs: &[NodeData]) -> Result<NodeOutput> {
        let [primary, secondary] = [0usize, 1].map(|i| match inputs.get(i) {
            Some(NodeData::Integer(v)) => Some(*v),
            _ => None,
        });
        let selected = Self::select(primary, secondary).map(NodeData::Integer).unwrap_or(NodeData::None);
        Ok(NodeOutput::values(vec![selected]))
    }
}
