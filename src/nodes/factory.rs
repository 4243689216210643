//! Node factory system with self-registration, metadata and lifecycle hooks

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use log::{debug, info, warn};
use crate::constants::type_tag;
use crate::error::{Error, Result};
use crate::nodes::Node;
use crate::nodes::hooks::NodeLifecycleHooks;
use crate::nodes::widgets::{InputConfig, WidgetFactory};
use crate::plugin_interface::{Extension, ExecutionResult, NodeData, NodeOutput};
use crate::plugins::ExtensionManager;

/// Data types that can flow through ports
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Text string
    String,
    /// Integer number
    Integer,
    /// Floating point number
    Float,
    /// Boolean value
    Boolean,
    /// Any type (for generic ports)
    Any,
}

impl DataType {
    /// Check if this data type can connect to another
    pub fn can_connect_to(&self, other: &DataType) -> bool {
        self == other || *self == DataType::Any || *other == DataType::Any
    }

    /// Primitive type tag used to key the widget factory
    pub fn type_tag(&self) -> &'static str {
        match self {
            DataType::String => type_tag::STRING,
            DataType::Integer => type_tag::INT,
            DataType::Float => type_tag::FLOAT,
            DataType::Boolean => type_tag::BOOLEAN,
            DataType::Any => type_tag::ANY,
        }
    }

    /// Get a human-readable name for this data type
    pub fn name(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Integer => "Integer",
            DataType::Float => "Float",
            DataType::Boolean => "Boolean",
            DataType::Any => "Any",
        }
    }
}

/// Hierarchical category system for organizing nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    /// Create a new category from path components
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Get the category name (last component)
    pub fn name(&self) -> &str {
        self.path.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// Get display string for UI
    pub fn display_string(&self) -> String {
        self.path.join(" > ")
    }

    /// Standard utility category
    pub fn utils() -> Self { Self::new(&["utils"]) }
}

/// Port definition for node creation
#[derive(Debug, Clone)]
pub struct PortDefinition {
    pub name: String,
    pub data_type: DataType,
    pub optional: bool,
    pub description: Option<String>,
    /// Widget shown for the input when nothing is connected
    pub widget: Option<InputConfig>,
    /// Input only accepts connections, never a widget
    pub force_input: bool,
}

impl PortDefinition {
    /// Create a required port
    pub fn required(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            optional: false,
            description: None,
            widget: None,
            force_input: false,
        }
    }

    /// Create an optional port
    pub fn optional(name: &str, data_type: DataType) -> Self {
        Self {
            optional: true,
            ..Self::required(name, data_type)
        }
    }

    /// Add description to port
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Back the input with a widget
    pub fn with_widget(mut self, config: InputConfig) -> Self {
        self.widget = Some(config);
        self
    }

    pub fn with_force_input(mut self, force_input: bool) -> Self {
        self.force_input = force_input;
        self
    }

    /// Whether a widget is created for this input
    pub fn has_widget(&self) -> bool {
        self.widget.is_some() && !self.force_input
    }
}

/// Metadata for a node type
#[derive(Debug, Clone)]
pub struct NodeMetadata {
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: NodeCategory,
    pub tags: Vec<&'static str>,
    pub inputs: Vec<PortDefinition>,
    pub outputs: Vec<PortDefinition>,
    /// Output nodes report their results back to the editor
    pub output_node: bool,
}

impl NodeMetadata {
    /// Create node metadata with sensible defaults
    pub fn new(
        node_type: &'static str,
        display_name: &'static str,
        category: NodeCategory,
        description: &'static str,
    ) -> Self {
        Self {
            node_type,
            display_name,
            description,
            category,
            tags: vec![],
            inputs: vec![],
            outputs: vec![],
            output_node: false,
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<PortDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PortDefinition>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_tags(mut self, tags: Vec<&'static str>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_output_node(mut self, output_node: bool) -> Self {
        self.output_node = output_node;
        self
    }
}

/// Node factory trait: metadata, construction and backend execution
pub trait NodeFactory: Send + Sync {
    /// Get comprehensive node metadata
    fn metadata() -> NodeMetadata where Self: Sized;

    /// Create a node instance with the ports declared in the metadata
    fn create() -> Node where Self: Sized {
        let meta = Self::metadata();
        let mut node = Node::new(0, meta.node_type).with_title(meta.display_name);

        for input in &meta.inputs {
            node.add_input(&input.name, input.data_type.clone());
        }
        for output in &meta.outputs {
            node.add_output(&output.name, output.data_type.clone());
        }

        node
    }

    /// Run the node backend on inputs ordered as in the metadata
    fn execute(inputs: &[NodeData]) -> Result<NodeOutput> where Self: Sized;
}

type NodeCreator = fn() -> Node;
type MetadataProvider = fn() -> NodeMetadata;
type NodeExecutor = fn(&[NodeData]) -> Result<NodeOutput>;

/// Registry of node types, their hooks, and the extensions applied to them
pub struct NodeRegistry {
    creators: BTreeMap<String, NodeCreator>,
    metadata_providers: BTreeMap<String, MetadataProvider>,
    executors: BTreeMap<String, NodeExecutor>,
    categories: HashMap<NodeCategory, Vec<String>>,
    hooks: HashMap<String, NodeLifecycleHooks>,
    extensions: ExtensionManager,
    widgets: Arc<dyn WidgetFactory>,
}

impl NodeRegistry {
    /// Create an empty registry creating widgets through `widgets`
    pub fn new(widgets: Arc<dyn WidgetFactory>) -> Self {
        Self {
            creators: BTreeMap::new(),
            metadata_providers: BTreeMap::new(),
            executors: BTreeMap::new(),
            categories: HashMap::new(),
            hooks: HashMap::new(),
            extensions: ExtensionManager::new(),
            widgets,
        }
    }

    /// Register a node factory and let registered extensions hook into it
    pub fn register<T: NodeFactory + 'static>(&mut self) {
        let metadata = T::metadata();
        let node_type = metadata.node_type.to_string();

        if self.creators.contains_key(&node_type) {
            warn!("Node type {} registered twice, replacing previous definition", node_type);
        }

        self.creators.insert(node_type.clone(), T::create);
        self.metadata_providers.insert(node_type.clone(), T::metadata);
        self.executors.insert(node_type.clone(), T::execute);

        let mut hooks = NodeLifecycleHooks::new();
        self.extensions.before_register_node_def(&mut hooks, &metadata);
        self.hooks.insert(node_type.clone(), hooks);

        let entry = self.categories.entry(metadata.category.clone()).or_default();
        if !entry.contains(&node_type) {
            entry.push(node_type.clone());
        }

        debug!("Registered node type: {}", node_type);
    }

    /// Register an extension
    ///
    /// The extension also hooks into node types registered before it.
    pub fn register_extension(&mut self, extension: Box<dyn Extension>) -> Result<()> {
        if self.extensions.contains(extension.name()) {
            return Err(Error::DuplicateExtension(extension.name().to_string()));
        }

        for (node_type, provider) in &self.metadata_providers {
            if let Some(hooks) = self.hooks.get_mut(node_type) {
                extension.before_register_node_def(hooks, &provider());
            }
        }

        self.extensions.register(extension)
    }

    /// Create a node by type name
    ///
    /// Widgets declared by the metadata are created first, then the type's
    /// construction hooks run.
    pub fn create_node(&self, node_type: &str) -> Result<Node> {
        let creator = self.creators.get(node_type)
            .ok_or_else(|| Error::UnknownNodeType(node_type.to_string()))?;
        let metadata = self.get_node_metadata(node_type)
            .ok_or_else(|| Error::UnknownNodeType(node_type.to_string()))?;

        let mut node = creator();
        for input in metadata.inputs.iter().filter(|i| i.has_widget()) {
            if let Some(config) = &input.widget {
                self.widgets.create(input.data_type.type_tag(), &mut node, &input.name, config)?;
            }
        }

        if let Some(hooks) = self.hooks.get(node_type) {
            hooks.run_created(&mut node)?;
        }

        debug!("Created node {} with {} widget(s)", node_type, node.widgets.len());
        Ok(node)
    }

    /// Deliver an execution result to the node's executed hooks
    pub fn notify_executed(&self, node: &mut Node, result: &ExecutionResult) {
        match self.hooks.get(&node.type_id) {
            Some(hooks) => hooks.run_executed(node, result),
            None => debug!("No hooks for node type {}", node.type_id),
        }
    }

    /// Run the backend of a node type
    pub fn execute(&self, node_type: &str, inputs: &[NodeData]) -> Result<NodeOutput> {
        let executor = self.executors.get(node_type)
            .ok_or_else(|| Error::UnknownNodeType(node_type.to_string()))?;
        executor(inputs)
    }

    /// Get metadata for a node type without creating the node
    pub fn get_node_metadata(&self, node_type: &str) -> Option<NodeMetadata> {
        self.metadata_providers.get(node_type).map(|provider| provider())
    }

    pub fn hooks(&self, node_type: &str) -> Option<&NodeLifecycleHooks> {
        self.hooks.get(node_type)
    }

    /// Registered node type names, sorted
    pub fn node_types(&self) -> Vec<&str> {
        self.creators.keys().map(String::as_str).collect()
    }

    pub fn nodes_in_category(&self, category: &NodeCategory) -> Vec<String> {
        self.categories.get(category).cloned().unwrap_or_default()
    }

    pub fn extensions(&self) -> &ExtensionManager {
        &self.extensions
    }

    /// The widget factory shared with extensions
    pub fn widget_factory(&self) -> Arc<dyn WidgetFactory> {
        Arc::clone(&self.widgets)
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        info!("Creating node registry with standard widgets");
        Self::new(Arc::new(crate::nodes::widgets::StandardWidgets::new()))
    }
}
