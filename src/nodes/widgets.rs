//! Widget model and the host widget factory
//!
//! Widgets are the controls attached to a node. The factory is keyed by the
//! primitive type tag of the value a widget holds (`"STRING"`, `"INT"`, ...),
//! appends the new widget to the node and hands it back so the caller can
//! adjust its input element.

use std::collections::BTreeMap;
use log::debug;
use crate::constants::type_tag;
use crate::error::{Error, Result};
use crate::nodes::Node;
use crate::plugin_interface::NodeData;

/// Kind of control a widget renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Single-line text field
    Text,
    /// Multiline text box
    CustomText,
    /// Numeric field
    Number,
    /// Checkbox
    Toggle,
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Text => "text",
            WidgetKind::CustomText => "customtext",
            WidgetKind::Number => "number",
            WidgetKind::Toggle => "toggle",
        }
    }
}

/// The editable element behind a widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputElement {
    pub read_only: bool,
    pub multiline: bool,
    pub placeholder: String,
}

/// A control attached to a node, holding one value
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub name: String,
    pub kind: WidgetKind,
    /// Current value; `None` once a display widget received an empty result
    pub value: Option<NodeData>,
    pub input_el: InputElement,
}

impl Widget {
    pub fn new(name: impl Into<String>, kind: WidgetKind, value: NodeData) -> Self {
        Self {
            name: name.into(),
            kind,
            value: Some(value),
            input_el: InputElement::default(),
        }
    }

    /// Current value as text, if it holds a string
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().and_then(NodeData::as_str)
    }

    pub fn is_read_only(&self) -> bool {
        self.input_el.read_only
    }
}

/// Widget configuration: default value, multiline flag and placeholder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputConfig {
    pub default: Option<NodeData>,
    pub multiline: bool,
    pub placeholder: Option<String>,
}

impl InputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, default: impl Into<NodeData>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }
}

/// Creates widgets on nodes from a type tag and configuration
pub trait WidgetFactory: Send + Sync {
    /// Append a new widget to `node` and return it
    fn create<'n>(
        &self,
        type_tag: &str,
        node: &'n mut Node,
        name: &str,
        config: &InputConfig,
    ) -> Result<&'n mut Widget>;
}

/// Function pointer type for building a widget from its configuration
pub type WidgetCreator = fn(name: &str, config: &InputConfig) -> Widget;

/// Default widget factory covering the primitive type tags
pub struct StandardWidgets {
    creators: BTreeMap<String, WidgetCreator>,
}

impl StandardWidgets {
    pub fn new() -> Self {
        let mut widgets = Self { creators: BTreeMap::new() };
        widgets.register(type_tag::STRING, string_widget);
        widgets.register(type_tag::INT, int_widget);
        widgets.register(type_tag::FLOAT, float_widget);
        widgets.register(type_tag::BOOLEAN, boolean_widget);
        widgets
    }

    /// Register or replace the creator for a type tag
    pub fn register(&mut self, type_tag: &str, creator: WidgetCreator) {
        self.creators.insert(type_tag.to_string(), creator);
    }

    pub fn supports(&self, type_tag: &str) -> bool {
        self.creators.contains_key(type_tag)
    }

    pub fn type_tags(&self) -> Vec<&str> {
        self.creators.keys().map(String::as_str).collect()
    }
}

impl Default for StandardWidgets {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetFactory for StandardWidgets {
    fn create<'n>(
        &self,
        type_tag: &str,
        node: &'n mut Node,
        name: &str,
        config: &InputConfig,
    ) -> Result<&'n mut Widget> {
        let creator = self.creators.get(type_tag)
            .ok_or_else(|| Error::UnknownWidgetType(type_tag.to_string()))?;

        let mut widget = creator(name, config);
        widget.input_el.multiline = config.multiline;
        widget.input_el.placeholder = config.placeholder.clone().unwrap_or_default();

        debug!("Creating {} widget {:?} on {}", widget.kind.name(), name, node.type_id);
        node.add_widget(widget)
    }
}

fn string_widget(name: &str, config: &InputConfig) -> Widget {
    let kind = if config.multiline { WidgetKind::CustomText } else { WidgetKind::Text };
    let value = config.default.clone().unwrap_or_else(|| NodeData::String(String::new()));
    Widget::new(name, kind, value)
}

fn int_widget(name: &str, config: &InputConfig) -> Widget {
    Widget::new(name, WidgetKind::Number, config.default.clone().unwrap_or(NodeData::Integer(0)))
}

fn float_widget(name: &str, config: &InputConfig) -> Widget {
    Widget::new(name, WidgetKind::Number, config.default.clone().unwrap_or(NodeData::Float(0.0)))
}

fn boolean_widget(name: &str, config: &InputConfig) -> Widget {
    Widget::new(name, WidgetKind::Toggle, config.default.clone().unwrap_or(NodeData::Boolean(false)))
}
