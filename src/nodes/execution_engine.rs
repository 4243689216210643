//! Node graph execution engine
//!
//! Runs every node of a graph in dependency order:
//! - Execution ordering via topological sort
//! - Input resolution from upstream outputs, falling back to widget values
//! - Delivery of each node's UI payload to its executed hooks

use std::collections::{HashMap, VecDeque};
use log::{debug, error, info};
use crate::error::{Error, Result};
use crate::nodes::{NodeGraph, NodeId, NodeRegistry, Node};
use crate::nodes::port::PortId;
use crate::plugin_interface::{ExecutedMessage, NodeData};

/// Represents the execution state of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    Pending,    // Node has not run in the current prompt
    Clean,      // Node ran successfully
    Error,      // Node failed to execute
}

/// Execution engine for node graphs
#[derive(Debug, Default)]
pub struct NodeGraphEngine {
    node_states: HashMap<NodeId, NodeState>,
    outputs: HashMap<(NodeId, PortId), NodeData>,
    runs: usize,
}

impl NodeGraphEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the execution order using topological sort
    pub fn get_execution_order(&self, graph: &NodeGraph) -> Result<Vec<NodeId>> {
        let mut in_degree: HashMap<NodeId, usize> = graph.nodes.keys().map(|&id| (id, 0)).collect();
        let mut adj_list: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

        for connection in &graph.connections {
            adj_list.entry(connection.from_node).or_default().push(connection.to_node);
            if let Some(degree) = in_degree.get_mut(&connection.to_node) {
                *degree += 1;
            }
        }

        // Seed in ID order so equal-rank nodes run in creation order
        let mut roots: Vec<NodeId> = in_degree.iter()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(&id, _)| id)
            .collect();
        roots.sort_unstable();
        let mut queue: VecDeque<NodeId> = roots.into();
        let mut result = Vec::with_capacity(graph.nodes.len());

        while let Some(node_id) = queue.pop_front() {
            result.push(node_id);
            let Some(neighbors) = adj_list.get(&node_id) else { continue };
            for neighbor in neighbors {
                if let Some(degree) = in_degree.get_mut(neighbor) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(*neighbor);
                    }
                }
            }
        }

        if result.len() != graph.nodes.len() {
            return Err(Error::CycleDetected);
        }
        Ok(result)
    }

    /// Execute the whole graph
    ///
    /// Stops at the first failing node; nodes that already ran keep their
    /// outputs and their executed hooks have fired.
    pub fn execute(&mut self, graph: &mut NodeGraph, registry: &NodeRegistry) -> Result<ExecutionStats> {
        let order = self.get_execution_order(graph)?;
        self.outputs.clear();
        self.node_states = order.iter().map(|&id| (id, NodeState::Pending)).collect();
        self.runs += 1;

        info!("Executing {} node(s)", order.len());
        for node_id in order {
            if let Err(e) = self.execute_single_node(node_id, graph, registry) {
                error!("Node {} failed: {}", node_id, e);
                self.node_states.insert(node_id, NodeState::Error);
                return Err(e);
            }
            self.node_states.insert(node_id, NodeState::Clean);
        }

        Ok(self.stats())
    }

    fn execute_single_node(&mut self, node_id: NodeId, graph: &mut NodeGraph, registry: &NodeRegistry) -> Result<()> {
        let inputs = {
            let node = graph.node(node_id).ok_or(Error::NodeNotFound(node_id))?;
            self.collect_node_inputs(node, graph, registry)?
        };

        let node = graph.node_mut(node_id).ok_or(Error::NodeNotFound(node_id))?;
        debug!("Executing node {} ({})", node_id, node.type_id);
        let output = registry.execute(&node.type_id, &inputs)?;

        for (port, value) in output.result.into_iter().enumerate() {
            self.outputs.insert((node_id, port), value);
        }
        if let Some(ui) = &output.ui {
            registry.notify_executed(node, ui);
        }
        Ok(())
    }

    /// Resolve inputs in metadata order
    fn collect_node_inputs(&self, node: &Node, graph: &NodeGraph, registry: &NodeRegistry) -> Result<Vec<NodeData>> {
        let metadata = registry.get_node_metadata(&node.type_id)
            .ok_or_else(|| Error::UnknownNodeType(node.type_id.clone()))?;

        let mut inputs = Vec::with_capacity(metadata.inputs.len());
        for def in &metadata.inputs {
            let linked = node.input_index(&def.name)
                .and_then(|port| graph.incoming(node.id, port))
                .and_then(|conn| self.outputs.get(&(conn.from_node, conn.from_port)))
                .cloned();
            let value = linked
                .or_else(|| node.widget(&def.name).and_then(|w| w.value.clone()))
                .unwrap_or(NodeData::None);

            if value.is_none() && !def.optional {
                return Err(Error::MissingInput {
                    node_id: node.id,
                    node_type: node.type_id.clone(),
                    input: def.name.clone(),
                });
            }
            debug!("Input {}.{} resolved to {}", node.type_id, def.name, value.type_name());
            inputs.push(value);
        }
        Ok(inputs)
    }

    /// Deliver an executed event produced outside the engine
    pub fn deliver(&self, graph: &mut NodeGraph, registry: &NodeRegistry, message: &ExecutedMessage) -> Result<()> {
        let node = graph.node_mut(message.node).ok_or(Error::NodeNotFound(message.node))?;
        registry.notify_executed(node, &message.output);
        Ok(())
    }

    pub fn node_state(&self, node_id: NodeId) -> Option<&NodeState> {
        self.node_states.get(&node_id)
    }

    pub fn cached_output(&self, node_id: NodeId, port: PortId) -> Option<&NodeData> {
        self.outputs.get(&(node_id, port))
    }

    /// Get execution statistics
    pub fn stats(&self) -> ExecutionStats {
        let mut stats = ExecutionStats {
            runs: self.runs,
            cached_outputs: self.outputs.len(),
            ..Default::default()
        };
        for state in self.node_states.values() {
            match state {
                NodeState::Pending => stats.pending_nodes += 1,
                NodeState::Clean => stats.clean_nodes += 1,
                NodeState::Error => stats.error_nodes += 1,
            }
        }
        stats
    }
}

/// Statistics about the last execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionStats {
    pub runs: usize,
    pub clean_nodes: usize,
    pub pending_nodes: usize,
    pub error_nodes: usize,
    pub cached_outputs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::utility::{register_utility_nodes, StringViewerExtension};

    fn registry() -> NodeRegistry {
        let mut registry = NodeRegistry::default();
        register_utility_nodes(&mut registry);
        let widgets = registry.widget_factory();
        registry.register_extension(Box::new(StringViewerExtension::new(widgets))).unwrap();
        registry
    }

    fn set_widget(graph: &mut NodeGraph, node_id: NodeId, name: &str, value: &str) {
        let widget = graph.node_mut(node_id).and_then(|n| n.widget_mut(name)).unwrap();
        widget.value = Some(NodeData::from(value));
    }

    #[test]
    fn test_chain_updates_viewer() {
        let registry = registry();
        let mut graph = NodeGraph::new();
        let concat = graph.add_node(registry.create_node("StringConcat").unwrap());
        let sub = graph.add_node(registry.create_node("StringSub").unwrap());
        let viewer = graph.add_node(registry.create_node("StringViewer").unwrap());

        set_widget(&mut graph, concat, "text_to", "hello");
        set_widget(&mut graph, concat, "sep", " ");
        set_widget(&mut graph, concat, "text_from", "world");
        set_widget(&mut graph, sub, "pattern", "o");
        set_widget(&mut graph, sub, "to", "0");
        graph.add_connection_by_ids(concat, 0, sub, 0).unwrap();
        graph.add_connection_by_ids(sub, 0, viewer, 0).unwrap();

        let mut engine = NodeGraphEngine::new();
        let stats = engine.execute(&mut graph, &registry).unwrap();

        assert_eq!(stats.clean_nodes, 3);
        assert_eq!(stats.runs, 1);
        assert_eq!(engine.cached_output(viewer, 0), Some(&NodeData::from("hell0 w0rld")));
        let text = graph.node(viewer).unwrap().widget("output_text").unwrap().text();
        assert_eq!(text, Some("hell0 w0rld"));
    }

    #[test]
    fn test_json_extract_and_empty_selector_feed_viewer() {
        let registry = registry();
        let mut graph = NodeGraph::new();
        let extract = graph.add_node(registry.create_node("JsonExtractString").unwrap());
        let selector = graph.add_node(registry.create_node("StringSelector").unwrap());
        let viewer = graph.add_node(registry.create_node("StringViewer").unwrap());

        set_widget(&mut graph, extract, "json_text", r#"{"prompt": {"positive": ""}}"#);
        set_widget(&mut graph, extract, "path", "prompt.positive");
        graph.add_connection_by_ids(extract, 0, selector, 0).unwrap();
        graph.add_connection_by_ids(extract, 0, selector, 1).unwrap();
        graph.add_connection_by_ids(selector, 0, viewer, 0).unwrap();

        let mut engine = NodeGraphEngine::new();
        engine.execute(&mut graph, &registry).unwrap();

        let display = graph.node(viewer).unwrap().widget("output_text").unwrap();
        assert_eq!(display.text(), Some(""));
        assert_eq!(engine.node_state(viewer), Some(&NodeState::Clean));
    }

    #[test]
    fn test_missing_input_stops_execution() {
        let registry = registry();
        let mut graph = NodeGraph::new();
        let viewer = graph.add_node(registry.create_node("StringViewer").unwrap());

        let mut engine = NodeGraphEngine::new();
        let err = engine.execute(&mut graph, &registry).unwrap_err();
        assert!(matches!(err, Error::MissingInput { ref input, .. } if input == "text"));
        assert_eq!(engine.node_state(viewer), Some(&NodeState::Error));
        assert_eq!(graph.node(viewer).unwrap().widget("output_text").unwrap().text(), Some(""));
    }

    #[test]
    fn test_cycle_detected() {
        let registry = registry();
        let mut graph = NodeGraph::new();
        let a = graph.add_node(registry.create_node("StringSub").unwrap());
        let b = graph.add_node(registry.create_node("StringSub").unwrap());
        graph.add_connection_by_ids(a, 0, b, 0).unwrap();
        graph.add_connection_by_ids(b, 0, a, 0).unwrap();

        let mut engine = NodeGraphEngine::new();
        assert!(matches!(engine.execute(&mut graph, &registry), Err(Error::CycleDetected)));
    }

    #[test]
    fn test_execution_order_follows_connections() {
        let registry = registry();
        let mut graph = NodeGraph::new();
        let viewer = graph.add_node(registry.create_node("StringViewer").unwrap());
        let concat = graph.add_node(registry.create_node("StringConcat").unwrap());
        graph.add_connection_by_ids(concat, 0, viewer, 0).unwrap();

        let order = NodeGraphEngine::new().get_execution_order(&graph).unwrap();
        assert_eq!(order, vec![concat, viewer]);
    }

    #[test]
    fn test_deliver_executed_message() {
        let registry = registry();
        let mut graph = NodeGraph::new();
        let viewer = graph.add_node(registry.create_node("StringViewer").unwrap());
        let engine = NodeGraphEngine::new();

        let message = ExecutedMessage::from_json(&format!(r#"{{"node": {}, "output": {{"text": ["remote"]}}}}"#, viewer)).unwrap();
        engine.deliver(&mut graph, &registry, &message).unwrap();
        assert_eq!(graph.node(viewer).unwrap().widget("output_text").unwrap().text(), Some("remote"));

        let missing = ExecutedMessage { node: 42, output: Default::default() };
        assert!(matches!(engine.deliver(&mut graph, &registry, &missing), Err(Error::NodeNotFound(42))));
    }
}
