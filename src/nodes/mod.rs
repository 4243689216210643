//! Node system - Core data structures, widgets, hooks and node implementations

// Core node system modules
pub mod graph;
pub mod node;
pub mod port;
pub mod factory;
pub mod hooks;
pub mod widgets;
pub mod interface;
pub mod execution_engine;

// Node implementations
pub mod utility;

// Re-export core types
pub use graph::{Connection, NodeGraph};
pub use node::{Node, NodeId};
pub use port::PortId;

// Re-export factory types
pub use factory::{
    NodeFactory, NodeMetadata, NodeCategory, NodeRegistry,
    DataType, PortDefinition,
};

// Re-export widget types
pub use widgets::{
    InputConfig, InputElement, StandardWidgets, Widget, WidgetFactory, WidgetKind,
};

// Re-export execution engine types
pub use execution_engine::{
    NodeGraphEngine, NodeState, ExecutionStats,
};
