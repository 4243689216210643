//! JsonExtract nodes: pull one value out of JSON text by a dotted path
//!
//! `a.b.c` walks nested objects key by key. When any key is missing, or the
//! walk reaches something that is not an object, the node outputs its
//! `default` input instead. A value that is found but cannot be converted to
//! the node's output type is an error.

use serde_json::Value;
use crate::error::{Error, Result};
use crate::nodes::{DataType, NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::nodes::widgets::InputConfig;
use crate::plugin_interface::{NodeData, NodeOutput};

/// Walk `path` through `json_text`; `None` when a key is missing
pub fn lookup(json_text: &str, path: &str) -> Result<Option<Value>> {
    let mut value: Value = serde_json::from_str(json_text)?;
    for key in path.split('.') {
        value = match value {
            Value::Object(mut map) => match map.remove(key) {
                Some(next) => next,
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
    }
    Ok(Some(value))
}

/// Render a found value as text; strings are taken verbatim
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

/// Convert a found value to an integer, truncating floats toward zero
pub fn value_to_int(path: &str, value: &Value) -> Result<i64> {
    let fail = |reason: String| Error::JsonExtract { path: path.to_string(), expected: "INT", reason };
    match value {
        Value::Number(n) => n.as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(|| fail(format!("{n} does not fit an integer"))),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => s.trim().parse().map_err(|e| fail(format!("{s:?}: {e}"))),
        other => Err(fail(format!("unsupported value {other}"))),
    }
}

/// Convert a found value to a float
pub fn value_to_float(path: &str, value: &Value) -> Result<f64> {
    let fail = |reason: String| Error::JsonExtract { path: path.to_string(), expected: "FLOAT", reason };
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| fail(format!("{n} is not a float"))),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse().map_err(|e| fail(format!("{s:?}: {e}"))),
        other => Err(fail(format!("unsupported value {other}"))),
    }
}

fn extract_metadata(
    node_type: &'static str,
    description: &'static str,
    output: DataType,
    default: PortDefinition,
) -> NodeMetadata {
    let output_name = output.type_tag();
    NodeMetadata::new(node_type, node_type, NodeCategory::utils(), description)
        .with_inputs(vec![
            PortDefinition::required("json_text", DataType::String)
                .with_widget(InputConfig::new().with_default("")),
            PortDefinition::required("path", DataType::String)
                .with_description("period separated path to json value")
                .with_widget(InputConfig::new().with_default("")),
            default,
        ])
        .with_outputs(vec![PortDefinition::required(output_name, output).with_description("Extracted value.")])
        .with_tags(vec!["json"])
}

fn text_input(inputs: &[NodeData], index: usize) -> &str {
    inputs.get(index).and_then(NodeData::as_str).unwrap_or("")
}

#[derive(Default)]
pub struct JsonExtractStringNode;

impl NodeFactory for JsonExtractStringNode {
    fn metadata() -> NodeMetadata {
        extract_metadata(
            "JsonExtractString",
            "Extract string from json text.",
            DataType::String,
            PortDefinition::required("default", DataType::String)
                .with_widget(InputConfig::new().with_default("")),
        )
    }

    fn execute(inputs: &[NodeData]) -> Result<NodeOutput> {
        let value = match lookup(text_input(inputs, 0), text_input(inputs, 1))? {
            Some(found) => value_to_string(&found),
            None => text_input(inputs, 2).to_string(),
        };
        Ok(NodeOutput::values(vec![NodeData::String(value)]))
    }
}

#[derive(Default)]
pub struct JsonExtractIntNode;

impl NodeFactory for JsonExtractIntNode {
    fn metadata() -> NodeMetadata {
        extract_metadata(
            "JsonExtractInt",
            "Extract integer from json text.",
            DataType::Integer,
            PortDefinition::required("default", DataType::Integer)
                .with_widget(InputConfig::new().with_default(NodeData::Integer(0))),
        )
    }

    fn execute(inputs: &[NodeData]) -> Result<NodeOutput> {
        let path = text_input(inputs, 1);
        let value = match lookup(text_input(inputs, 0), path)? {
            Some(found) => value_to_int(path, &found)?,
            None => match inputs.get(2) {
                Some(NodeData::Integer(default)) => *default,
                _ => 0,
            },
        };
        Ok(NodeOutput::values(vec![NodeData::Integer(value)]))
    }
}

#[derive(Default)]
pub struct JsonExtractFloatNode;

impl NodeFactory for JsonExtractFloatNode {
    fn metadata() -> NodeMetadata {
        extract_metadata(
            "JsonExtractFloat",
            "Extract float from json text.",
            DataType::Float,
            PortDefinition::required("default", DataType::Float)
                .with_widget(InputConfig::new().with_default(NodeData::Float(0.0))),
        )
    }

    fn execute(inputs: &[NodeData]) -> Result<NodeOutput> {
        let path = text_input(inputs, 1);
        let value = match lookup(text_input(inputs, 0), path)? {
            Some(found) => value_to_float(path, &found)?,
            None => match inputs.get(2) {
                Some(NodeData::Float(default)) => *default,
                Some(NodeData::Integer(default)) => *default as f64,
                _ => 0.0,
            },
        };
        Ok(NodeOutput::values(vec![NodeData::Float(value)]))
    }
}
