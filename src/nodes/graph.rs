//! Node graph data structures and operations

use super::node::{Node, NodeId};
use super::port::PortId;
use crate::error::{Error, Result};
use log::debug;
use std::collections::HashMap;

/// Represents a connection between two ports on different nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub from_node: NodeId,
    pub from_port: PortId,
    pub to_node: NodeId,
    pub to_port: PortId,
}

impl Connection {
    /// Creates a new connection
    pub fn new(from_node: NodeId, from_port: PortId, to_node: NodeId, to_port: PortId) -> Self {
        Self {
            from_node,
            from_port,
            to_node,
            to_port,
        }
    }
}

/// A graph containing nodes and their connections
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    pub nodes: HashMap<NodeId, Node>,
    pub connections: Vec<Connection>,
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        self.nodes.insert(id, node);
        self.next_node_id += 1;
        id
    }

    /// Removes a node and all its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections
            .retain(|conn| conn.from_node != node_id && conn.to_node != node_id);
        self.nodes.remove(&node_id)
    }

    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Adds a connection between two ports
    ///
    /// An input port accepts a single connection; connecting it again
    /// replaces the previous link.
    pub fn add_connection(&mut self, connection: Connection) -> Result<()> {
        if connection.from_node == connection.to_node {
            return Err(Error::InvalidConnection("cannot connect a node to itself"));
        }

        let from = self.nodes.get(&connection.from_node)
            .ok_or(Error::InvalidConnection("source node does not exist"))?;
        let to = self.nodes.get(&connection.to_node)
            .ok_or(Error::InvalidConnection("target node does not exist"))?;

        let output = from.outputs.get(connection.from_port)
            .ok_or(Error::InvalidConnection("source port does not exist"))?;
        let input = to.inputs.get(connection.to_port)
            .ok_or(Error::InvalidConnection("target port does not exist"))?;
        if !output.data_type.can_connect_to(&input.data_type) {
            debug!("Rejecting {} -> {} connection", output.data_type.name(), input.data_type.name());
            return Err(Error::InvalidConnection("port data types are incompatible"));
        }

        self.connections
            .retain(|conn| !(conn.to_node == connection.to_node && conn.to_port == connection.to_port));
        self.connections.push(connection);
        Ok(())
    }

    /// Helper method to add connection by node IDs and port indices
    pub fn add_connection_by_ids(&mut self, from_node: NodeId, from_port: PortId, to_node: NodeId, to_port: PortId) -> Result<()> {
        self.add_connection(Connection::new(from_node, from_port, to_node, to_port))
    }

    /// Connection feeding the given input port, if any
    pub fn incoming(&self, node_id: NodeId, port: PortId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.to_node == node_id && c.to_port == port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::DataType;

    fn string_node(type_id: &str) -> Node {
        let mut node = Node::new(0, type_id);
        node.add_input("text", DataType::String)
            .add_output("STRING", DataType::String);
        node
    }

    #[test]
    fn test_add_and_remove_node() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(string_node("A"));
        let b = graph.add_node(string_node("B"));
        assert_eq!((a, b), (0, 1));
        assert_eq!(graph.node(b).unwrap().id, b);

        graph.add_connection_by_ids(a, 0, b, 0).unwrap();
        assert!(graph.remove_node(a).is_some());
        assert!(graph.connections.is_empty());
        assert!(graph.node(a).is_none());
    }

    #[test]
    fn test_invalid_connections() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(string_node("A"));
        let b = graph.add_node(string_node("B"));

        assert!(graph.add_connection_by_ids(a, 0, a, 0).is_err());
        assert!(graph.add_connection_by_ids(a, 0, 99, 0).is_err());
        assert!(graph.add_connection_by_ids(a, 5, b, 0).is_err());

        let mut flag = Node::new(0, "Flag");
        flag.add_output("BOOLEAN", DataType::Boolean);
        let f = graph.add_node(flag);
        assert!(matches!(
            graph.add_connection_by_ids(f, 0, b, 0),
            Err(Error::InvalidConnection(_))
        ));
    }

    #[test]
    fn test_reconnect_replaces_input_link() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(string_node("A"));
        let b = graph.add_node(string_node("B"));
        let c = graph.add_node(string_node("C"));

        graph.add_connection_by_ids(a, 0, c, 0).unwrap();
        graph.add_connection_by_ids(b, 0, c, 0).unwrap();
        assert_eq!(graph.connections.len(), 1);
        assert_eq!(graph.incoming(c, 0).unwrap().from_node, b);
    }
}
