//! Error types for the node host and its extensions

use thiserror::Error;
use crate::nodes::NodeId;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the registry, widget factory and execution engine
#[derive(Debug, Error)]
pub enum Error {
    /// No factory is registered under this node type name.
    #[error("unknown node type: {0}")]
    UnknownNodeType(String),

    /// The widget factory has no creator for this type tag.
    #[error("no widget creator for type tag {0:?}")]
    UnknownWidgetType(String),

    /// A widget with the same name already exists on the node.
    #[error("node {node_type} already has a widget named {name:?}")]
    DuplicateWidget { node_type: String, name: String },

    /// An extension with the same name was already registered.
    #[error("extension named {0:?} already registered")]
    DuplicateExtension(String),

    /// A node referenced by ID was not found in the graph.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A required input resolved to no value.
    #[error("node {node_id} ({node_type}) is missing required input {input:?}")]
    MissingInput {
        node_id: NodeId,
        node_type: String,
        input: String,
    },

    /// The connection cannot be added to the graph.
    #[error("invalid connection: {0}")]
    InvalidConnection(&'static str),

    /// The graph contains a cycle and has no execution order.
    #[error("cycle detected in node graph")]
    CycleDetected,

    /// A regex pattern supplied to a string node failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A replacement template for a regex substitution is malformed.
    #[error("invalid replacement {template:?}: {reason}")]
    InvalidReplacement { template: String, reason: String },

    /// A JSON value could not be converted to the requested type.
    #[error("cannot extract {path:?} as {expected}: {reason}")]
    JsonExtract {
        path: String,
        expected: &'static str,
        reason: String,
    },

    /// An executed payload could not be decoded.
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
}
