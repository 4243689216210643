//! StringViewer interface using the build_interface pattern

use crate::constants::string_viewer;
use crate::nodes::Node;
use crate::nodes::interface::build_widgets_interface;
use crate::plugin_interface::ParameterChange;
use super::StringViewerNode;

impl StringViewerNode {
    /// Render the node's display box; the box itself never reports changes
    pub fn build_interface(node: &mut Node, ui: &mut egui::Ui) -> Vec<ParameterChange> {
        ui.heading(&node.title);
        ui.separator();

        if node.widget(string_viewer::FIELD_NAME).is_none() {
            ui.weak("No display attached");
        }

        build_widgets_interface(node, ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::NodeRegistry;
    use crate::nodes::utility::StringViewerExtension;
    use crate::plugin_interface::ExecutionResult;

    #[test]
    fn test_build_interface_is_read_only() {
        let mut registry = NodeRegistry::default();
        registry.register::<StringViewerNode>();
        StringViewerExtension::install(&mut registry).unwrap();

        let mut node = registry.create_node("StringViewer").unwrap();
        registry.notify_executed(&mut node, &ExecutionResult::text("shown"));

        let ctx = egui::Context::default();
        let mut changes = vec![];
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                changes = StringViewerNode::build_interface(&mut node, ui);
            });
        });

        assert!(changes.is_empty());
        assert_eq!(node.widget("output_text").unwrap().text(), Some("shown"));
    }
}
