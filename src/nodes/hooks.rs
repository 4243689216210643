//! Node lifecycle hooks
//!
//! Every node type owns one `NodeLifecycleHooks` value. Extensions append
//! handlers to it while the type is being registered; the registry runs the
//! handlers in registration order when a node is created and whenever it
//! reports an execution result. Handlers are never replaced, so behaviour
//! registered earlier keeps running after later extensions add their own.

use crate::error::Result;
use crate::nodes::Node;
use crate::plugin_interface::ExecutionResult;

/// Handler run when a node of the type is constructed
pub type CreatedHandler = Box<dyn Fn(&mut Node) -> Result<()> + Send + Sync>;

/// Handler run when a node of the type finished executing
pub type ExecutedHandler = Box<dyn Fn(&mut Node, &ExecutionResult) + Send + Sync>;

/// Ordered handler pipelines for one node type
#[derive(Default)]
pub struct NodeLifecycleHooks {
    on_created: Vec<CreatedHandler>,
    on_executed: Vec<ExecutedHandler>,
}

impl NodeLifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a construction handler
    pub fn on_created<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut Node) -> Result<()> + Send + Sync + 'static,
    {
        self.on_created.push(Box::new(handler));
        self
    }

    /// Append an execution-completion handler
    pub fn on_executed<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut Node, &ExecutionResult) + Send + Sync + 'static,
    {
        self.on_executed.push(Box::new(handler));
        self
    }

    /// Run construction handlers in order, stopping at the first error
    pub fn run_created(&self, node: &mut Node) -> Result<()> {
        for handler in &self.on_created {
            handler(node)?;
        }
        Ok(())
    }

    /// Run execution handlers in order
    pub fn run_executed(&self, node: &mut Node, result: &ExecutionResult) {
        for handler in &self.on_executed {
            handler(node, result);
        }
    }

    pub fn created_handlers(&self) -> usize {
        self.on_created.len()
    }

    pub fn executed_handlers(&self) -> usize {
        self.on_executed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.on_created.is_empty() && self.on_executed.is_empty()
    }
}

impl std::fmt::Debug for NodeLifecycleHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeLifecycleHooks")
            .field("on_created", &self.on_created.len())
            .field("on_executed", &self.on_executed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_handlers_run_in_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = NodeLifecycleHooks::new();

        for tag in ["first", "second"] {
            let calls = Arc::clone(&calls);
            hooks.on_created(move |_node| {
                calls.lock().unwrap().push(tag);
                Ok(())
            });
        }

        let mut node = Node::new(0, "Test");
        hooks.run_created(&mut node).unwrap();
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_created_error_stops_pipeline() {
        let reached = Arc::new(Mutex::new(false));
        let mut hooks = NodeLifecycleHooks::new();
        hooks.on_created(|_node| Err(Error::UnknownWidgetType("NOPE".into())));
        {
            let reached = Arc::clone(&reached);
            hooks.on_created(move |_node| {
                *reached.lock().unwrap() = true;
                Ok(())
            });
        }

        let mut node = Node::new(0, "Test");
        assert!(matches!(hooks.run_created(&mut node), Err(Error::UnknownWidgetType(_))));
        assert!(!*reached.lock().unwrap());
    }

    #[test]
    fn test_executed_handlers_receive_payload() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = NodeLifecycleHooks::new();
        {
            let seen = Arc::clone(&seen);
            hooks.on_executed(move |_node, result| {
                seen.lock().unwrap().push(result.first().map(str::to_string));
            });
        }

        let mut node = Node::new(0, "Test");
        hooks.run_executed(&mut node, &ExecutionResult::text("a"));
        hooks.run_executed(&mut node, &ExecutionResult::default());
        assert_eq!(*seen.lock().unwrap(), vec![Some("a".to_string()), None]);
        assert_eq!(hooks.executed_handlers(), 1);
        assert_eq!(hooks.created_handlers(), 0);
        assert!(!hooks.is_empty());
    }
}
