//! Widget interface rendering with egui

use egui::{Checkbox, DragValue, TextEdit, Ui};
use log::warn;
use crate::constants::window::MULTILINE_ROWS;
use crate::nodes::Node;
use crate::nodes::widgets::{Widget, WidgetKind};
use crate::plugin_interface::{NodeData, ParameterChange};

/// Render a node's widgets and return the edits the user made
///
/// Read-only widgets are drawn non-interactive and never produce changes.
pub fn build_widgets_interface(node: &mut Node, ui: &mut Ui) -> Vec<ParameterChange> {
    let mut changes = Vec::new();

    for widget in &mut node.widgets {
        if let Some(value) = render_widget(widget, ui) {
            changes.push(ParameterChange {
                parameter: widget.name.clone(),
                value,
            });
        }
    }

    changes
}

/// Render one widget, returning its new value if it was edited
fn render_widget(widget: &mut Widget, ui: &mut Ui) -> Option<NodeData> {
    let editable = !widget.input_el.read_only;
    ui.label(&widget.name);

    match widget.kind {
        WidgetKind::Text | WidgetKind::CustomText => {
            let mut text = widget.text().unwrap_or_default().to_string();
            let edit = if widget.kind == WidgetKind::CustomText {
                TextEdit::multiline(&mut text).desired_rows(MULTILINE_ROWS)
            } else {
                TextEdit::singleline(&mut text)
            };
            let response = ui.add(
                edit.hint_text(widget.input_el.placeholder.as_str())
                    .interactive(editable)
                    .desired_width(f32::INFINITY),
            );
            (editable && response.changed()).then(|| NodeData::String(text))
        }
        WidgetKind::Number => match widget.value {
            Some(NodeData::Integer(mut value)) => ui
                .add_enabled(editable, DragValue::new(&mut value))
                .changed()
                .then_some(NodeData::Integer(value)),
            Some(NodeData::Float(mut value)) => ui
                .add_enabled(editable, DragValue::new(&mut value).speed(0.01))
                .changed()
                .then_some(NodeData::Float(value)),
            _ => {
                ui.weak("-");
                None
            }
        },
        WidgetKind::Toggle => {
            let mut checked = matches!(widget.value, Some(NodeData::Boolean(true)));
            ui.add_enabled(editable, Checkbox::without_text(&mut checked))
                .changed()
                .then_some(NodeData::Boolean(checked))
        }
    }
}

/// Write edited values back into the node's widgets
pub fn apply_parameter_changes(node: &mut Node, changes: &[ParameterChange]) {
    for change in changes {
        match node.widget_mut(&change.parameter) {
            Some(widget) if !widget.input_el.read_only => widget.value = Some(change.value.clone()),
            Some(_) => warn!("Ignoring change to read-only widget {}", change.parameter),
            None => warn!("No widget named {} on {}", change.parameter, node.type_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(node: &mut Node) -> Vec<ParameterChange> {
        let ctx = egui::Context::default();
        let mut changes = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                changes = build_widgets_interface(node, ui);
            });
        });
        changes
    }

    fn sample_node() -> Node {
        let mut node = Node::new(0, "Sample");
        node.add_widget(Widget::new("body", WidgetKind::CustomText, NodeData::from("abc"))).unwrap();
        node.add_widget(Widget::new("count", WidgetKind::Number, NodeData::Integer(3))).unwrap();
        node.add_widget(Widget::new("flag", WidgetKind::Toggle, NodeData::Boolean(true))).unwrap();
        let display = node.add_widget(Widget::new("display", WidgetKind::CustomText, NodeData::from(""))).unwrap();
        display.input_el.read_only = true;
        display.value = None;
        node
    }

    #[test]
    fn test_render_without_input_produces_no_changes() {
        let mut node = sample_node();
        assert!(render(&mut node).is_empty());
        assert_eq!(node.widget("body").unwrap().text(), Some("abc"));
    }

    #[test]
    fn test_apply_changes_skips_read_only() {
        let mut node = sample_node();
        apply_parameter_changes(&mut node, &[
            ParameterChange { parameter: "body".into(), value: NodeData::from("edited") },
            ParameterChange { parameter: "display".into(), value: NodeData::from("nope") },
            ParameterChange { parameter: "missing".into(), value: NodeData::None },
        ]);

        assert_eq!(node.widget("body").unwrap().text(), Some("edited"));
        assert_eq!(node.widget("display").unwrap().value, None);
    }
}
