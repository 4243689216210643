//! Extension interface traits and types
//!
//! This module defines the data that flows between nodes, the execution
//! payloads delivered to node hooks, and the trait extensions implement to
//! hook into node types as they are registered.

use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::nodes::{NodeId, NodeMetadata};
use crate::nodes::hooks::NodeLifecycleHooks;

/// Node data types used by node backends and widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeData {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    None,
}

impl NodeData {
    /// Borrow the string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeData::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, NodeData::None)
    }

    /// Get the type name of a value
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeData::String(_) => "String",
            NodeData::Integer(_) => "Integer",
            NodeData::Float(_) => "Float",
            NodeData::Boolean(_) => "Boolean",
            NodeData::None => "None",
        }
    }
}

impl From<&str> for NodeData {
    fn from(value: &str) -> Self {
        NodeData::String(value.to_string())
    }
}

impl From<String> for NodeData {
    fn from(value: String) -> Self {
        NodeData::String(value)
    }
}

/// Payload delivered to a node's executed hooks
///
/// On the wire the values travel under the `text` key, e.g. `{"text": ["hello"]}`.
/// A payload without the key decodes to an empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(rename = "text", default)]
    pub values: Vec<String>,
}

impl ExecutionResult {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Payload carrying a single string
    pub fn text(value: impl Into<String>) -> Self {
        Self { values: vec![value.into()] }
    }

    /// First value, or `None` when the payload is empty
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Decode a payload from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Output of a node backend: UI payload plus port values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeOutput {
    /// Payload forwarded to the node's executed hooks
    #[serde(default)]
    pub ui: Option<ExecutionResult>,
    /// Values for the node's output ports, in port order
    #[serde(default)]
    pub result: Vec<NodeData>,
}

impl NodeOutput {
    /// Output carrying only port values
    pub fn values(result: Vec<NodeData>) -> Self {
        Self { ui: None, result }
    }

    pub fn with_ui(mut self, ui: ExecutionResult) -> Self {
        self.ui = Some(ui);
        self
    }
}

/// A "node finished executing" event as sent by a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedMessage {
    pub node: NodeId,
    #[serde(default)]
    pub output: ExecutionResult,
}

impl ExecutedMessage {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parameter change notification
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterChange {
    pub parameter: String,
    pub value: NodeData,
}

/// Extensions hook into node types as the registry learns about them
pub trait Extension: Send + Sync {
    /// Unique extension name
    fn name(&self) -> &str;

    /// Called once for every node type definition, before nodes of that type
    /// can be created. Handlers appended to `hooks` run after any handlers
    /// registered earlier for the same type.
    fn before_register_node_def(&self, _hooks: &mut NodeLifecycleHooks, _metadata: &NodeMetadata) {}
}
