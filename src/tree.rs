//! Tree representation for untyped nested data.
//!
//! A tree is built from three kinds of positions: string-keyed maps, ordered
//! lists and scalar leaves. Only [`Node::Map`] and [`Node::List`] are walked
//! by the differ; everything else is compared as a whole.

use std::collections::HashMap;
use std::fmt;

/// The canonical generic map shape.
pub type Map = HashMap<String, Node>;

/// A position in a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Map(Map),
    List(Vec<Node>),
    Scalar(Scalar),
}

/// A leaf value.
///
/// `Opaque` wraps a fixed-shape composite (for example a tagged YAML mapping)
/// that must be compared and reported as a single value rather than expanded.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    /// An unsigned integer above `i64::MAX`
    UInt(u64),
    Float(f64),
    String(String),
    Opaque(Box<Node>),
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    /// Wraps a composite so that it is treated as an atomic leaf.
    pub fn opaque(inner: Node) -> Self {
        Node::Scalar(Scalar::Opaque(Box::new(inner)))
    }

    pub fn type_name(&self) -> &str {
        match self {
            Node::Map(_) => "map",
            Node::List(_) => "list",
            Node::Scalar(scalar) => scalar.type_name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(list) => Some(list.as_slice()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Scalar(Scalar::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Node::Scalar(Scalar::Int(i)) => u64::try_from(*i).ok(),
            Node::Scalar(Scalar::UInt(u)) => Some(*u),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Scalar(Scalar::Float(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Deep structural equality.
    ///
    /// Maps ignore key order, lists compare element by element, and leaves
    /// compare per kind. An integer never equals a float, and NaN equals NaN
    /// so that every tree is equal to itself.
    pub fn structural_eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Map(a), Node::Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(key, value)| b.get(key).is_some_and(|v| value.structural_eq(v)))
            }
            (Node::List(a), Node::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structural_eq(y))
            }
            (Node::Scalar(a), Node::Scalar(b)) => a.structural_eq(b),
            _ => false,
        }
    }

    /// Converts the node into a `serde_json::Value`.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Node::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
            Node::List(list) => Value::Array(list.iter().map(Node::to_json_value).collect()),
            Node::Scalar(scalar) => match scalar {
                Scalar::Null => Value::Null,
                Scalar::Bool(b) => Value::Bool(*b),
                Scalar::Int(i) => Value::from(*i),
                Scalar::UInt(u) => Value::from(*u),
                Scalar::Float(f) => serde_json::Number::from_f64(*f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                Scalar::String(s) => Value::String(s.clone()),
                Scalar::Opaque(inner) => inner.to_json_value(),
            },
        }
    }
}

impl Scalar {
    pub fn type_name(&self) -> &str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "boolean",
            Scalar::Int(_) | Scalar::UInt(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
            Scalar::Opaque(_) => "opaque",
        }
    }

    pub fn structural_eq(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::UInt(a), Scalar::UInt(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Scalar::String(a), Scalar::String(b)) => a == b,
            (Scalar::Opaque(a), Scalar::Opaque(b)) => a.structural_eq(b),
            _ => false,
        }
    }
}

/// Natural string form: strings are written raw, null as `<nil>`, and
/// composites as compact JSON.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(scalar) => write!(f, "{}", scalar),
            composite => write!(f, "{}", composite.to_json_value()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("<nil>"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::UInt(u) => write!(f, "{}", u),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => f.write_str(s),
            Scalar::Opaque(inner) => write!(f, "{}", inner.to_json_value()),
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Node::Map(map)
    }
}

impl From<Vec<Node>> for Node {
    fn from(list: Vec<Node>) -> Self {
        Node::List(list)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Scalar(Scalar::Int(i))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Scalar(Scalar::Float(f))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(Scalar::String(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Node::null().to_string(), "<nil>");
        assert_eq!(Node::from("v1").to_string(), "v1");
        assert_eq!(Node::from(3i64).to_string(), "3");
        assert_eq!(Node::from(6.5).to_string(), "6.5");
        assert_eq!(Node::from(true).to_string(), "true");
    }

    #[test]
    fn test_display_composites() {
        let mut map = Map::new();
        map.insert("a".to_string(), Node::from(1i64));
        assert_eq!(Node::Map(map).to_string(), r#"{"a":1}"#);

        let list = Node::List(vec![Node::from(1i64), Node::from("x")]);
        assert_eq!(list.to_string(), r#"[1,"x"]"#);
    }

    #[test]
    fn test_int_and_float_are_distinct() {
        assert!(!Node::from(3i64).structural_eq(&Node::from(3.0)));
    }

    #[test]
    fn test_unsigned_integers() {
        let max = Node::Scalar(Scalar::UInt(u64::MAX));
        let below = Node::Scalar(Scalar::UInt(u64::MAX - 1));
        assert!(!max.structural_eq(&below));
        assert_eq!(max.to_string(), "18446744073709551615");
        assert_eq!(max.to_json_value(), serde_json::json!(u64::MAX));
        assert_eq!(max.as_u64(), Some(u64::MAX));
        assert_eq!(Node::from(7i64).as_u64(), Some(7));
        assert_eq!(Node::from(-1i64).as_u64(), None);
    }

    #[test]
    fn test_nan_is_self_equal() {
        assert!(Node::from(f64::NAN).structural_eq(&Node::from(f64::NAN)));
    }
}
