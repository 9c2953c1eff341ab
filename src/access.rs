//! Nested-key lookup and assignment.
//!
//! Paths descend through maps only, one segment per level. A path can be
//! given as a dotted string (`"spec.template.metadata"`) or as an explicit
//! list of segments, which allows keys that themselves contain a `.`.
//!
//! # Examples
//!
//! ```
//! use mapdiff::access::{get_items, get_str, set_items};
//! use mapdiff::{parse_json, Node};
//!
//! let mut root = parse_json(r#"{"metadata": {"labels": {"app": "nginx"}}}"#).unwrap();
//! let map = root.as_map_mut().unwrap();
//!
//! assert_eq!(get_str(map, "metadata.labels.app"), "nginx");
//! assert!(get_items(map, "metadata.name").is_err());
//!
//! set_items(map, ["metadata", "name"], Node::from("web")).unwrap();
//! assert_eq!(get_str(map, "metadata.name"), "web");
//! ```

use crate::error::AccessError;
use crate::tree::{Map, Node};

/// A sequence of map keys to descend through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> KeyPath<'a> {
    /// Splits a dotted path into segments.
    pub fn dotted(path: &'a str) -> Self {
        Self {
            segments: path.split('.').collect(),
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }
}

impl<'a> From<&'a str> for KeyPath<'a> {
    fn from(path: &'a str) -> Self {
        KeyPath::dotted(path)
    }
}

impl<'a> From<&'a String> for KeyPath<'a> {
    fn from(path: &'a String) -> Self {
        KeyPath::dotted(path)
    }
}

impl<'a> From<&'a [&'a str]> for KeyPath<'a> {
    fn from(segments: &'a [&'a str]) -> Self {
        Self {
            segments: segments.to_vec(),
        }
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for KeyPath<'a> {
    fn from(segments: [&'a str; N]) -> Self {
        Self {
            segments: segments.to_vec(),
        }
    }
}

impl<'a> From<&'a [String]> for KeyPath<'a> {
    fn from(segments: &'a [String]) -> Self {
        Self {
            segments: segments.iter().map(String::as_str).collect(),
        }
    }
}

/// Looks up the value at `path`.
///
/// # Errors
///
/// - `AccessError::EmptyPath` if the path has no segments
/// - `AccessError::MissingKey` if any segment is absent
/// - `AccessError::NotAMap` if an intermediate value is not a map
pub fn get_items<'a, 'p>(
    obj: &'a Map,
    path: impl Into<KeyPath<'p>>,
) -> Result<&'a Node, AccessError> {
    let path = path.into();
    let (last, parents) = path
        .segments
        .split_last()
        .ok_or(AccessError::EmptyPath)?;

    let mut current = obj;
    for segment in parents {
        current = match current.get(*segment) {
            Some(Node::Map(map)) => map,
            Some(_) => return Err(AccessError::not_a_map(*segment)),
            None => return Err(AccessError::missing_key(*segment)),
        };
    }

    current
        .get(*last)
        .ok_or_else(|| AccessError::missing_key(*last))
}

/// Looks up the value at `path`, falling back to `default` on any error.
pub fn get<'a, 'p>(obj: &'a Map, path: impl Into<KeyPath<'p>>, default: &'a Node) -> &'a Node {
    get_items(obj, path).unwrap_or(default)
}

/// Boolean at `path`, or `false`.
pub fn get_bool<'p>(obj: &Map, path: impl Into<KeyPath<'p>>) -> bool {
    get_items(obj, path)
        .ok()
        .and_then(Node::as_bool)
        .unwrap_or(false)
}

/// Integer at `path`, or `0`.
pub fn get_int<'p>(obj: &Map, path: impl Into<KeyPath<'p>>) -> i64 {
    get_items(obj, path).ok().and_then(Node::as_i64).unwrap_or(0)
}

/// Float at `path`, or `0.0`.
pub fn get_float<'p>(obj: &Map, path: impl Into<KeyPath<'p>>) -> f64 {
    get_items(obj, path)
        .ok()
        .and_then(Node::as_f64)
        .unwrap_or(0.0)
}

/// String at `path`, or `""`.
pub fn get_str<'a, 'p>(obj: &'a Map, path: impl Into<KeyPath<'p>>) -> &'a str {
    get_items(obj, path)
        .ok()
        .and_then(Node::as_str)
        .unwrap_or("")
}

/// List at `path`, or an empty slice.
pub fn get_list<'a, 'p>(obj: &'a Map, path: impl Into<KeyPath<'p>>) -> &'a [Node] {
    get_items(obj, path)
        .ok()
        .and_then(Node::as_list)
        .unwrap_or(&[])
}

/// Map at `path`, if there is one.
pub fn get_map<'a, 'p>(obj: &'a Map, path: impl Into<KeyPath<'p>>) -> Option<&'a Map> {
    get_items(obj, path).ok().and_then(Node::as_map)
}

/// Assigns `value` at `path`, replacing any existing value.
///
/// Every segment but the last must already exist and hold a map.
pub fn set_items<'p>(
    obj: &mut Map,
    path: impl Into<KeyPath<'p>>,
    value: Node,
) -> Result<(), AccessError> {
    let path = path.into();
    let (last, parents) = path
        .segments
        .split_last()
        .ok_or(AccessError::EmptyPath)?;

    let mut current = obj;
    for segment in parents {
        current = match current.get_mut(*segment) {
            Some(Node::Map(map)) => map,
            Some(_) => return Err(AccessError::not_a_map(*segment)),
            None => return Err(AccessError::missing_key(*segment)),
        };
    }

    current.insert((*last).to_string(), value);
    Ok(())
}
