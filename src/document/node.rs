//! Tree node representation.
//!
//! `Node` is the value model every path, query and walker in this crate works
//! against: objects with ordered string keys, arrays, and primitive leaves.
//! Array children are addressed with decimal string keys (`"0"`, `"1"`, ...)
//! so that paths stay sequences of strings.
//!
//! # Example
//!
//! ```
//! use treequery::document::node::{Node, Number};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), Node::from("treequery"));
//! map.insert("version".to_string(), Node::Number(Number::Integer(1)));
//! let object = Node::Object(map);
//!
//! assert!(object.is_container());
//! assert_eq!(object.keys(), vec!["name", "version"]);
//! assert_eq!(object.child("name"), Some(&Node::from("treequery")));
//! ```

use indexmap::IndexMap;
use serde::Serialize;

/// Represents numbers (integer or float).
///
/// Integers and floats compare numerically, so `Integer(1)` equals
/// `Float(1.0)`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }
}

/// A value in a tree.
///
/// Objects and arrays contain further `Node`s; everything else is a leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// Null leaf
    Null,
    /// Boolean leaf
    Boolean(bool),
    /// Numeric leaf
    Number(Number),
    /// String leaf
    String(String),
    /// Ordered sequence of children, addressed by decimal index keys
    Array(Vec<Node>),
    /// Key-value pairs in insertion order
    Object(IndexMap<String, Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Object(IndexMap::new())
    }
}

impl Node {
    /// Returns true if this node is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    /// Returns true if this node is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// Returns true if this node can have children (object or array).
    ///
    /// # Example
    ///
    /// ```
    /// use treequery::document::node::Node;
    ///
    /// assert!(Node::Array(vec![]).is_container());
    /// assert!(!Node::Null.is_container());
    /// assert!(!Node::from("leaf").is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Object(_) | Node::Array(_))
    }

    /// Returns true for strings, numbers and booleans.
    ///
    /// Null is *not* primitive here: it groups with objects and arrays, so a
    /// primitive-type pattern never matches a null leaf.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Node::Boolean(_) | Node::Number(_) | Node::String(_))
    }

    /// Returns the string content of a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        match self {
            Node::Object(entries) => entries.len(),
            Node::Array(items) => items.len(),
            _ => 0,
        }
    }

    /// Returns true if the node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of the direct children: object keys in order, or array indices
    /// rendered as decimal strings. Leaves have no keys.
    pub fn keys(&self) -> Vec<String> {
        match self {
            Node::Object(entries) => entries.keys().cloned().collect(),
            Node::Array(items) => (0..items.len()).map(|idx| idx.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the child stored under `key`, if any.
    ///
    /// Array children are found only through canonical decimal keys, so
    /// `"01"` does not address index 1.
    pub fn child(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(entries) => entries.get(key),
            Node::Array(items) => items.get(array_index(key)?),
            _ => None,
        }
    }

    /// Mutable variant of [`Node::child`].
    pub fn child_mut(&mut self, key: &str) -> Option<&mut Node> {
        match self {
            Node::Object(entries) => entries.get_mut(key),
            Node::Array(items) => items.get_mut(array_index(key)?),
            _ => None,
        }
    }

    /// Returns true if `key` addresses an existing child.
    pub fn has_child(&self, key: &str) -> bool {
        self.child(key).is_some()
    }

    /// Renders the node as a single line of text.
    ///
    /// String leaves come out verbatim, other leaves in their literal form and
    /// containers as compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Node::Null => "null".to_string(),
            Node::Boolean(b) => b.to_string(),
            Node::Number(n) => n.to_string(),
            Node::String(s) => s.clone(),
            Node::Array(_) | Node::Object(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }
}

/// Parses a canonical decimal array index key.
pub(crate) fn array_index(key: &str) -> Option<usize> {
    let idx = key.parse::<usize>().ok()?;
    (idx.to_string() == key).then_some(idx)
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Boolean(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Number(Number::Integer(value.into()))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(Number::Integer(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(Number::Float(value))
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Array(value)
    }
}

impl From<IndexMap<String, Node>> for Node {
    fn from(value: IndexMap<String, Node>) -> Self {
        Node::Object(value)
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Number(Number::Integer(i)),
                None => Node::Number(Number::Float(n.as_f64().unwrap_or(0.0))),
            },
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Object(
                map.into_iter()
                    .map(|(key, child)| (key, Node::from(child)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_yaml::Value> for Node {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Number(Number::Integer(i)),
                None => Node::Number(Number::Float(n.as_f64().unwrap_or(0.0))),
            },
            Value::String(s) => Node::String(s),
            Value::Sequence(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Object(
                map.into_iter()
                    .map(|(key, child)| {
                        // Non-string keys (numbers, booleans) become their text form
                        (Node::from(key).to_text(), Node::from(child))
                    })
                    .collect(),
            ),
            Value::Tagged(tagged) => Node::from(tagged.value),
        }
    }
}
