//! String viewer demo editor
//!
//! Shows a StringConcat -> StringSub -> StringViewer chain. Edit the widgets
//! of the first two nodes and queue the prompt to refresh the viewer's
//! read-only display.

use eframe::egui;
use log::{error, info};
use string_viewer::constants::window;
use string_viewer::nodes::interface::{apply_parameter_changes, build_widgets_interface};
use string_viewer::nodes::utility::{register_utility_nodes, StringViewerNode};
use string_viewer::nodes::{NodeGraph, NodeGraphEngine, NodeId, NodeRegistry};
use string_viewer::{NodeData, Result, StringViewerExtension};

/// Demo application state
struct StringViewerApp {
    registry: NodeRegistry,
    graph: NodeGraph,
    engine: NodeGraphEngine,
    editable: Vec<NodeId>,
    viewer: NodeId,
    status: String,
}

impl StringViewerApp {
    fn new() -> Result<Self> {
        let mut registry = NodeRegistry::default();
        register_utility_nodes(&mut registry);
        StringViewerExtension::install(&mut registry)?;

        let mut graph = NodeGraph::new();
        let mut concat = registry.create_node("StringConcat")?;
        for (name, value) in [("text_to", "Hello"), ("sep", ", "), ("text_from", "world")] {
            if let Some(widget) = concat.widget_mut(name) {
                widget.value = Some(NodeData::from(value));
            }
        }
        let concat = graph.add_node(concat);
        let sub = graph.add_node(registry.create_node("StringSub")?);
        let viewer = graph.add_node(registry.create_node("StringViewer")?);
        graph.add_connection_by_ids(concat, 0, sub, 0)?;
        graph.add_connection_by_ids(sub, 0, viewer, 0)?;

        info!("Demo graph ready with {} nodes", graph.nodes.len());
        Ok(Self {
            registry,
            graph,
            engine: NodeGraphEngine::new(),
            editable: vec![concat, sub],
            viewer,
            status: String::from("Not executed yet"),
        })
    }

    fn queue_prompt(&mut self) {
        self.status = match self.engine.execute(&mut self.graph, &self.registry) {
            Ok(stats) => format!("Run {}: {} node(s) executed", stats.runs, stats.clean_nodes),
            Err(e) => {
                error!("Prompt failed: {}", e);
                format!("Error: {}", e)
            }
        };
    }
}

impl eframe::App for StringViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("String Viewer");
                ui.separator();
                if ui.button("Queue Prompt").clicked() {
                    self.queue_prompt();
                }
                ui.label(&self.status);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for &node_id in &self.editable {
                    if let Some(node) = self.graph.node_mut(node_id) {
                        ui.group(|ui| {
                            ui.heading(&node.title);
                            let changes = build_widgets_interface(node, ui);
                            apply_parameter_changes(node, &changes);
                        });
                    }
                }

                if let Some(node) = self.graph.node_mut(self.viewer) {
                    ui.group(|ui| {
                        StringViewerNode::build_interface(node, ui);
                    });
                }
            });
        });
    }
}

/// Application entry point.
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let app = StringViewerApp::new()?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window::DEFAULT_SIZE)
            .with_min_inner_size(window::MIN_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "String Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}
