//! Extension manager
//!
//! Keeps registered extensions in registration order and folds their hooks
//! into each node type's lifecycle pipeline.

use std::collections::HashSet;
use log::{debug, info};
use crate::error::{Error, Result};
use crate::nodes::NodeMetadata;
use crate::nodes::hooks::NodeLifecycleHooks;
use crate::plugin_interface::Extension;

/// Registered extensions, in the order they were added
#[derive(Default)]
pub struct ExtensionManager {
    extensions: Vec<Box<dyn Extension>>,
    names: HashSet<String>,
}

impl ExtensionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension; names must be unique
    pub fn register(&mut self, extension: Box<dyn Extension>) -> Result<()> {
        let name = extension.name().to_string();
        if !self.names.insert(name.clone()) {
            return Err(Error::DuplicateExtension(name));
        }

        info!("Registered extension: {}", name);
        self.extensions.push(extension);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Let every extension hook into a node type definition
    pub fn before_register_node_def(&self, hooks: &mut NodeLifecycleHooks, metadata: &NodeMetadata) {
        for extension in &self.extensions {
            debug!("Applying extension {} to node type {}", extension.name(), metadata.node_type);
            extension.before_register_node_def(hooks, metadata);
        }
    }

    /// Names of registered extensions, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.extensions.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::NodeCategory;

    struct Tagging(&'static str);

    impl Extension for Tagging {
        fn name(&self) -> &str {
            self.0
        }

        fn before_register_node_def(&self, hooks: &mut NodeLifecycleHooks, _metadata: &NodeMetadata) {
            let tag = self.0;
            hooks.on_created(move |node| {
                node.title.push_str(tag);
                Ok(())
            });
        }
    }

    #[test]
    fn test_duplicate_extension_rejected() {
        let mut manager = ExtensionManager::new();
        manager.register(Box::new(Tagging("a"))).unwrap();
        let err = manager.register(Box::new(Tagging("a"))).unwrap_err();
        assert!(matches!(err, Error::DuplicateExtension(name) if name == "a"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_extensions_fold_in_order() {
        let mut manager = ExtensionManager::new();
        manager.register(Box::new(Tagging("a"))).unwrap();
        manager.register(Box::new(Tagging("b"))).unwrap();
        assert_eq!(manager.names(), vec!["a", "b"]);

        let metadata = NodeMetadata::new("T", "T", NodeCategory::utils(), "test");
        let mut hooks = NodeLifecycleHooks::new();
        manager.before_register_node_def(&mut hooks, &metadata);

        let mut node = crate::nodes::Node::new(0, "T");
        hooks.run_created(&mut node).unwrap();
        assert_eq!(node.title, "Tab");
    }
}
