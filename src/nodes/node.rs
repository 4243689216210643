//! Node types and core node functionality

use super::factory::DataType;
use super::port::{Port, PortType};
use super::widgets::{Widget, WidgetKind};
use crate::error::{Error, Result};

/// Unique identifier for a node
pub type NodeId = usize;

/// A node instance in the graph
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// Registered type name, independent of the user-editable title
    pub type_id: String,
    pub title: String,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    pub widgets: Vec<Widget>,
}

impl Node {
    /// Creates a new node of the given type
    pub fn new(id: NodeId, type_id: impl Into<String>) -> Self {
        let type_id = type_id.into();
        Self {
            id,
            title: type_id.clone(),
            type_id,
            inputs: vec![],
            outputs: vec![],
            widgets: vec![],
        }
    }

    /// Sets the title of the node
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds an input port to the node
    pub fn add_input(&mut self, name: impl Into<String>, data_type: DataType) -> &mut Self {
        let port_id = self.inputs.len();
        self.inputs.push(Port::new(port_id, name, PortType::Input, data_type));
        self
    }

    /// Adds an output port to the node
    pub fn add_output(&mut self, name: impl Into<String>, data_type: DataType) -> &mut Self {
        let port_id = self.outputs.len();
        self.outputs.push(Port::new(port_id, name, PortType::Output, data_type));
        self
    }

    /// Appends a widget; names are unique per node
    pub fn add_widget(&mut self, widget: Widget) -> Result<&mut Widget> {
        if self.widget(&widget.name).is_some() {
            return Err(Error::DuplicateWidget {
                node_type: self.type_id.clone(),
                name: widget.name,
            });
        }
        self.widgets.push(widget);
        let index = self.widgets.len() - 1;
        Ok(&mut self.widgets[index])
    }

    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name == name)
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.name == name)
    }

    /// All widgets rendering as the given kind
    pub fn widgets_of_kind(&self, kind: WidgetKind) -> impl Iterator<Item = &Widget> {
        self.widgets.iter().filter(move |w| w.kind == kind)
    }

    pub fn widgets_of_kind_mut(&mut self, kind: WidgetKind) -> impl Iterator<Item = &mut Widget> {
        self.widgets.iter_mut().filter(move |w| w.kind == kind)
    }

    /// Index of the input port with this name
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin_interface::NodeData;

    #[test]
    fn test_ports_are_numbered_in_order() {
        let mut node = Node::new(0, "StringConcat");
        node.add_input("text_from", DataType::String)
            .add_input("text_to", DataType::String)
            .add_output("STRING", DataType::String);

        assert_eq!(node.input_index("text_to"), Some(1));
        assert_eq!(node.input_index("sep"), None);
        assert_eq!(node.outputs[0].id, 0);
        assert_eq!(node.outputs[0].port_type, PortType::Output);
        assert_eq!(node.title, "StringConcat");
    }

    #[test]
    fn test_duplicate_widget_rejected() {
        let mut node = Node::new(0, "Test");
        node.add_widget(Widget::new("a", WidgetKind::Text, NodeData::from(""))).unwrap();
        let err = node.add_widget(Widget::new("a", WidgetKind::CustomText, NodeData::from(""))).unwrap_err();
        assert!(matches!(err, Error::DuplicateWidget { ref name, .. } if name == "a"));
        assert_eq!(node.widgets.len(), 1);
    }

    #[test]
    fn test_widgets_of_kind() {
        let mut node = Node::new(0, "Test");
        node.add_widget(Widget::new("a", WidgetKind::Text, NodeData::from(""))).unwrap();
        node.add_widget(Widget::new("b", WidgetKind::CustomText, NodeData::from(""))).unwrap();
        node.add_widget(Widget::new("c", WidgetKind::CustomText, NodeData::from(""))).unwrap();

        let names: Vec<_> = node.widgets_of_kind(WidgetKind::CustomText).map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
    }
}
