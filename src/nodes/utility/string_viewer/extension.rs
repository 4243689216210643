//! Display widget binding for StringViewer nodes
//!
//! Every StringViewer node gets one read-only multiline text box when it is
//! created. Each time the node reports an execution result, the text box is
//! replaced with the first string of the result. An empty result clears it.

use std::sync::Arc;
use log::{debug, info};
use crate::constants::{string_viewer, type_tag};
use crate::error::Result;
use crate::nodes::hooks::NodeLifecycleHooks;
use crate::nodes::widgets::{InputConfig, WidgetFactory, WidgetKind};
use crate::nodes::{Node, NodeMetadata, NodeRegistry};
use crate::plugin_interface::{Extension, ExecutionResult, NodeData};

/// Extension binding a read-only text display to StringViewer nodes
pub struct StringViewerExtension {
    widgets: Arc<dyn WidgetFactory>,
}

impl StringViewerExtension {
    pub fn new(widgets: Arc<dyn WidgetFactory>) -> Self {
        Self { widgets }
    }

    /// Register the extension with a registry, using the registry's widget factory
    pub fn install(registry: &mut NodeRegistry) -> Result<()> {
        let widgets = registry.widget_factory();
        registry.register_extension(Box::new(Self::new(widgets)))
    }

    /// Configuration of the display widget
    pub fn display_config() -> InputConfig {
        InputConfig::new()
            .with_default("")
            .with_multiline(true)
            .with_placeholder(string_viewer::PLACEHOLDER)
    }

    /// Attach the display widget to a freshly constructed node
    pub fn create_display(widgets: &dyn WidgetFactory, node: &mut Node) -> Result<()> {
        let widget = widgets.create(
            type_tag::STRING,
            node,
            string_viewer::FIELD_NAME,
            &Self::display_config(),
        )?;
        widget.input_el.read_only = true;
        Ok(())
    }

    /// Replace every multiline text widget's value with the first result string
    pub fn show_result(node: &mut Node, result: &ExecutionResult) {
        let text = result.first().map(NodeData::from);
        for widget in node.widgets_of_kind_mut(WidgetKind::CustomText) {
            widget.value = text.clone();
        }
    }
}

impl Extension for StringViewerExtension {
    fn name(&self) -> &str {
        string_viewer::EXTENSION_NAME
    }

    fn before_register_node_def(&self, hooks: &mut NodeLifecycleHooks, metadata: &NodeMetadata) {
        if metadata.node_type != string_viewer::NODE_TYPE {
            return;
        }

        info!("Binding display widget to {}", metadata.node_type);
        let widgets = Arc::clone(&self.widgets);
        hooks
            .on_created(move |node| Self::create_display(widgets.as_ref(), node))
            .on_executed(|node, result| {
                debug!("Node {} executed with {} value(s)", node.id, result.values.len());
                Self::show_result(node, result);
            });
    }
}
