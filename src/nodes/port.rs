//! Port types for node connections

use serde::{Deserialize, Serialize};
use crate::nodes::factory::DataType;

/// Unique identifier for a port
pub type PortId = usize;

/// Type of port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortType {
    Input,
    Output,
}

/// Represents a connection point on a node
#[derive(Debug, Clone)]
pub struct Port {
    pub id: PortId,
    pub name: String,
    pub port_type: PortType,
    pub data_type: DataType,
}

impl Port {
    /// Creates a new port
    pub fn new(id: PortId, name: impl Into<String>, port_type: PortType, data_type: DataType) -> Self {
        Self {
            id,
            name: name.into(),
            port_type,
            data_type,
        }
    }
}
