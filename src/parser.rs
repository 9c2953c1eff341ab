//! Document parsing for JSON, YAML and TOML.
//!
//! This module turns structured text into a [`Node`] tree. The format is
//! detected from the file extension; files with an unknown extension are
//! tried as JSON, then TOML, then YAML.
//!
//! # Examples
//!
//! ```no_run
//! use mapdiff::parser::parse_file;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let old = parse_file(Path::new("deploy-v1.yaml"))?;
//! let new = parse_file(Path::new("deploy-v2.yaml"))?;
//! # Ok(())
//! # }
//! ```

use crate::error::ParseError;
use crate::tree::{Map, Node, Scalar};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A supported input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Detects the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some("json") => Some(Format::Json),
            Some("yaml") | Some("yml") => Some(Format::Yaml),
            Some("toml") => Some(Format::Toml),
            _ => None,
        }
    }
}

/// Parses a file into a Node tree.
///
/// # Errors
///
/// This function will return an error if:
/// - The file does not exist (`ParseError::FileNotFound`)
/// - The file cannot be read (`ParseError::ReadError`)
/// - The content is invalid for its detected format (`JsonError`, `YamlError`, `TomlError`)
/// - The extension is unknown and no format parses the content (`ParseError::UnknownFormat`)
pub fn parse_file(path: &Path) -> Result<Node, ParseError> {
    let origin = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(ParseError::file_not_found(origin));
    }

    let content = fs::read_to_string(path).map_err(|e| ParseError::read_error(&origin, e))?;

    match Format::from_path(path) {
        Some(format) => {
            debug!(path = %origin, ?format, "parsing by extension");
            parse_str(&content, format, &origin)
        }
        None => {
            debug!(path = %origin, "unknown extension, trying each format");
            parse_any_format(&content).ok_or_else(|| ParseError::unknown_format(origin))
        }
    }
}

/// Tries JSON, then TOML, then YAML.
///
/// YAML goes last because it accepts almost any text as a plain string
/// scalar, which would shadow a TOML document.
fn parse_any_format(content: &str) -> Option<Node> {
    parse_json(content)
        .ok()
        .or_else(|| parse_toml(content).ok())
        .or_else(|| parse_yaml(content).ok())
}

/// Parses content in a known format. `origin` names the source in errors.
pub fn parse_str(content: &str, format: Format, origin: &str) -> Result<Node, ParseError> {
    match format {
        Format::Json => parse_json(content).map_err(|e| ParseError::json_error(origin, e)),
        Format::Yaml => parse_yaml(content).map_err(|e| ParseError::yaml_error(origin, e)),
        Format::Toml => parse_toml(content).map_err(|e| ParseError::toml_error(origin, e)),
    }
}

/// Parses a JSON string into a Node.
///
/// ```
/// use mapdiff::parser::parse_json;
///
/// let node = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert_eq!(node.as_map().unwrap().len(), 2);
/// ```
pub fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(json_to_node(value))
}

/// Parses a YAML string into a Node.
pub fn parse_yaml(content: &str) -> Result<Node, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_node(value))
}

/// Parses a TOML document into a Node.
pub fn parse_toml(content: &str) -> Result<Node, toml::de::Error> {
    let value: toml::Value = toml::from_str(content)?;
    Ok(toml_to_node(value))
}

fn json_to_node(value: serde_json::Value) -> Node {
    match value {
        serde_json::Value::Null => Node::null(),
        serde_json::Value::Bool(b) => Node::from(b),
        serde_json::Value::Number(n) => number_to_node(n.as_i64(), n.as_u64(), n.as_f64()),
        serde_json::Value::String(s) => Node::from(s),
        serde_json::Value::Array(arr) => Node::List(arr.into_iter().map(json_to_node).collect()),
        serde_json::Value::Object(obj) => {
            let map: Map = obj.into_iter().map(|(k, v)| (k, json_to_node(v))).collect();
            Node::Map(map)
        }
    }
}

/// Converts YAML into a Node.
///
/// Non-string keys are stringified. A tagged mapping or sequence
/// (`!secret {user: a, pass: b}`) is a fixed-shape value and becomes an
/// opaque scalar; a tagged scalar is evaluated to its inner value.
fn yaml_to_node(value: serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::null(),
        serde_yaml::Value::Bool(b) => Node::from(b),
        serde_yaml::Value::Number(n) => number_to_node(n.as_i64(), n.as_u64(), n.as_f64()),
        serde_yaml::Value::String(s) => Node::from(s),
        serde_yaml::Value::Sequence(seq) => {
            Node::List(seq.into_iter().map(yaml_to_node).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let map: Map = mapping
                .into_iter()
                .map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        other => format!("{:?}", other),
                    };
                    (key, yaml_to_node(v))
                })
                .collect();
            Node::Map(map)
        }
        serde_yaml::Value::Tagged(tagged) => match yaml_to_node(tagged.value) {
            composite @ (Node::Map(_) | Node::List(_)) => Node::opaque(composite),
            scalar => scalar,
        },
    }
}

/// Integers stay integers: `i64` when they fit, `u64` above that.
fn number_to_node(signed: Option<i64>, unsigned: Option<u64>, float: Option<f64>) -> Node {
    match (signed, unsigned) {
        (Some(i), _) => Node::from(i),
        (None, Some(u)) => Node::Scalar(Scalar::UInt(u)),
        (None, None) => Node::from(float.unwrap_or(f64::NAN)),
    }
}

fn toml_to_node(value: toml::Value) -> Node {
    match value {
        toml::Value::String(s) => Node::from(s),
        toml::Value::Integer(i) => Node::from(i),
        toml::Value::Float(f) => Node::from(f),
        toml::Value::Boolean(b) => Node::from(b),
        toml::Value::Datetime(dt) => Node::Scalar(Scalar::String(dt.to_string())),
        toml::Value::Array(arr) => Node::List(arr.into_iter().map(toml_to_node).collect()),
        toml::Value::Table(table) => {
            let map: Map = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_node(v)))
                .collect();
            Node::Map(map)
        }
    }
}
