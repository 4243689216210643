//! Utility nodes: string manipulation, selectors and JSON extraction

pub mod int_selector;
pub mod json_extract;
pub mod string_concat;
pub mod string_selector;
pub mod string_sub;
pub mod string_viewer;

pub use int_selector::IntSelectorNode;
pub use json_extract::{JsonExtractFloatNode, JsonExtractIntNode, JsonExtractStringNode};
pub use string_concat::StringConcatNode;
pub use string_selector::StringSelectorNode;
pub use string_sub::StringSubNode;
pub use string_viewer::{StringViewerExtension, StringViewerNode};

use crate::nodes::NodeRegistry;

/// Register every utility node type
pub fn register_utility_nodes(registry: &mut NodeRegistry) {
    registry.register::<StringConcatNode>();
    registry.register::<StringSubNode>();
    registry.register::<StringSelectorNode>();
    registry.register::<IntSelectorNode>();
    registry.register::<JsonExtractStringNode>();
    registry.register::<JsonExtractIntNode>();
    registry.register::<JsonExtractFloatNode>();
    registry.register::<StringViewerNode>();
}
