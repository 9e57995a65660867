//! Value types for nested maps.
//!
//! A [`Value`] is either a scalar leaf (null, boolean, number, text) or a
//! nested [`Node`]. A stored [`Value::Null`] is an ordinary value: reads of a
//! missing key return `None`, never `Null`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Node, NodeError};

/// Values that can be stored in a [`Node`].
///
/// `Value` implements `PartialEq` with primitive types for ergonomic
/// comparisons:
///
/// ```
/// # use atomtree::node::Value;
/// let text = Value::from("hello");
/// let number = Value::from(42);
///
/// assert!(text == "hello");
/// assert!(number == 42);
/// assert!(!(text == 42));
/// ```
///
/// Serialization maps directly onto JSON: nodes become objects, the rest
/// become the matching JSON scalar. JSON numbers that fit in an `i64` load
/// as [`Value::Int`], every other number as [`Value::Float`].
///
/// Floats compare by bit pattern, so `NaN` equals itself and `0.0` differs
/// from `-0.0`. An `Int` never equals a `Float`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),
    /// Nested map
    Node(Node),
}

impl Value {
    /// Returns true if this is a scalar (anything but a nested node)
    pub fn is_scalar(&self) -> bool {
        !self.is_node()
    }

    /// Returns true if this is a nested node
    pub fn is_node(&self) -> bool {
        matches!(self, Value::Node(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Node(_) => "node",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to borrow the nested node
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Consumes the value, returning the nested node if there is one
    pub fn into_node(self) -> Option<Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            _ => false,
        }
    }
}

// Bitwise float comparison keeps equality reflexive.
impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Node(node) => write!(f, "{node}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Node> for Value {
    fn from(value: Node) -> Self {
        Value::Node(value)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl TryFrom<&Value> for String {
    type Error = NodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            _ => Err(NodeError::TypeMismatch {
                expected: "text".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = NodeError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(NodeError::TypeMismatch {
                expected: "text".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = NodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(*n),
            _ => Err(NodeError::TypeMismatch {
                expected: "int".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = NodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(x) => Ok(*x),
            _ => Err(NodeError::TypeMismatch {
                expected: "float".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = NodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(NodeError::TypeMismatch {
                expected: "bool".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for Node {
    type Error = NodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Node(node) => Ok(node.clone()),
            _ => Err(NodeError::TypeMismatch {
                expected: "node".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Value::Int(n) if *n == *other as i64)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(x) if x.to_bits() == other.to_bits())
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

impl PartialEq<Node> for Value {
    fn eq(&self, other: &Node) -> bool {
        matches!(self, Value::Node(node) if node == other)
    }
}
