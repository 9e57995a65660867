//! Persistent nested maps.
//!
//! This module provides [`Node`], an immutable map from [`Key`] to [`Value`]
//! where values may themselves be nodes. Every "mutating" operation takes
//! `&self` and returns a new `Node`; the original is left untouched.
//!
//! Nodes are backed by [`im::HashMap`], so cloning is O(1) and an update only
//! rebuilds the nodes along the modified path. Every subtree off that path is
//! shared by reference with the original, which [`Node::ptr_eq`] exposes.
//!
//! # Usage
//!
//! ```
//! use atomtree::{node, path};
//!
//! let people = node! {
//!     "braden" => node! { "age" => 22 },
//! };
//!
//! // Single-level access
//! let older = people.update("braden", |info| {
//!     let info = info.and_then(|v| v.as_node()).cloned().unwrap_or_default();
//!     info.update("age", |age| (age.and_then(|v| v.as_int()).unwrap_or(0) + 1).into())
//!         .into()
//! });
//! assert_eq!(older.get_in(path!["braden", "age"]).and_then(|v| v.as_int()), Some(23));
//!
//! // Arbitrary depth; intermediate nodes are created on demand
//! let with_pet = people.assoc_in(
//!     path!["braden", "pets", "bird"],
//!     node! { "name" => "Dante", "age" => 13 },
//! );
//! assert_eq!(
//!     with_pet.get_in("braden.pets.bird.name").and_then(|v| v.as_text()),
//!     Some("Dante"),
//! );
//!
//! // Deep delete composes update_in with a removal function
//! let without_pet = with_pet.update_in(path!["braden", "pets"], node::without("bird"));
//! assert!(without_pet.get_in("braden.pets.bird").is_none());
//!
//! // The original is unchanged
//! assert!(people.get_in("braden.pets").is_none());
//! ```

use std::{convert::Infallible, fmt};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

pub mod errors;
pub mod key;
pub mod path;
pub mod value;

pub use errors::NodeError;
pub use key::Key;
pub use path::Path;
pub use value::Value;

/// An immutable map from [`Key`] to [`Value`].
///
/// # Examples
///
/// ```
/// # use atomtree::node::Node;
/// let empty = Node::new();
/// let one = empty.assoc("name", "Alice");
///
/// assert!(empty.is_empty());
/// assert_eq!(one.get_as::<&str>("name"), Some("Alice"));
/// assert_eq!(one.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct Node {
    entries: im::HashMap<Key, Value>,
}

impl Node {
    /// Creates a new empty node
    pub fn new() -> Self {
        Self {
            entries: im::HashMap::new(),
        }
    }

    /// Returns the number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the node has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the node contains the given key
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        let key: Key = key.into();
        self.entries.contains_key(&key)
    }

    /// Returns true if both nodes share the same underlying storage.
    ///
    /// Two nodes that are `ptr_eq` are always equal; the converse does not
    /// hold. Subtrees untouched by an update stay `ptr_eq` with their
    /// counterparts in the original tree.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        self.entries.ptr_eq(&other.entries)
    }

    /// Returns an iterator over all key-value pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    /// Returns an iterator over all keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Returns an iterator over all values, in no particular order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Returns the entries sorted by key
    pub fn sorted_entries(&self) -> Vec<(&Key, &Value)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }

    /// Gets the value for `key`, or `None` if it is absent
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        let key: Key = key.into();
        self.entries.get(&key)
    }

    /// Gets a value by key with automatic type conversion using `TryFrom`.
    ///
    /// Returns `None` if the key is absent or holds another type.
    pub fn get_as<'a, T>(&'a self, key: impl Into<Key>) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = NodeError>,
    {
        T::try_from(self.get(key)?).ok()
    }

    /// Follows `path` key by key.
    ///
    /// Returns `None` as soon as a key is missing or an intermediate value is
    /// not a node while keys remain. The empty path yields `None`.
    pub fn get_in(&self, path: impl Into<Path>) -> Option<&Value> {
        let path = path.into();
        let (first, rest) = path.keys().split_first()?;
        let mut current = self.entries.get(first)?;
        for key in rest {
            current = current.as_node()?.entries.get(key)?;
        }
        Some(current)
    }

    /// Typed form of [`Node::get_in`]
    pub fn get_in_as<'a, T>(&'a self, path: impl Into<Path>) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = NodeError>,
    {
        T::try_from(self.get_in(path)?).ok()
    }

    /// Returns a new node where `key` maps to `value`
    pub fn assoc(&self, key: impl Into<Key>, value: impl Into<Value>) -> Node {
        Node {
            entries: self.entries.update(key.into(), value.into()),
        }
    }

    /// Returns a new node with every pair applied left to right.
    ///
    /// Later pairs win when a key repeats.
    pub fn assoc_all<K, V, I>(&self, pairs: I) -> Node
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries = self.entries.clone();
        for (key, value) in pairs {
            entries.insert(key.into(), value.into());
        }
        Node { entries }
    }

    /// Returns a new node without `key`. Removing an absent key is a no-op.
    pub fn dissoc(&self, key: impl Into<Key>) -> Node {
        Node {
            entries: self.entries.without(&Into::<Key>::into(key)),
        }
    }

    /// Returns a new node without any of `keys`
    pub fn dissoc_all<K, I>(&self, keys: I) -> Node
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        let mut entries = self.entries.clone();
        for key in keys {
            let key: Key = key.into();
            entries.remove(&key);
        }
        Node { entries }
    }

    /// Returns a new node where `key` maps to `f(current)`.
    ///
    /// `current` is `None` when the key is absent. Extra arguments are
    /// captured by the closure.
    pub fn update<F>(&self, key: impl Into<Key>, f: F) -> Node
    where
        F: FnOnce(Option<&Value>) -> Value,
    {
        let key = key.into();
        let next = f(self.entries.get(&key));
        Node {
            entries: self.entries.update(key, next),
        }
    }

    /// Fallible form of [`Node::update`].
    ///
    /// An error from `f` is returned unchanged.
    pub fn try_update<F, E>(&self, key: impl Into<Key>, f: F) -> Result<Node, E>
    where
        F: FnOnce(Option<&Value>) -> Result<Value, E>,
    {
        let key = key.into();
        let next = f(self.entries.get(&key))?;
        Ok(Node {
            entries: self.entries.update(key, next),
        })
    }

    /// Returns a new node where the value at `path` is `value`.
    ///
    /// Missing intermediate nodes are created empty. A scalar found part way
    /// down the path is replaced by an empty node (see
    /// [`Node::try_assoc_in`] for the strict form). The empty path returns
    /// the node unchanged.
    pub fn assoc_in(&self, path: impl Into<Path>, value: impl Into<Value>) -> Node {
        let value = value.into();
        self.update_in(path, move |_| value)
    }

    /// Strict form of [`Node::assoc_in`].
    ///
    /// Fails with [`NodeError::EmptyPath`] for the empty path and with
    /// [`NodeError::NotANode`] when a scalar sits where a nested node is
    /// needed.
    pub fn try_assoc_in(
        &self,
        path: impl Into<Path>,
        value: impl Into<Value>,
    ) -> Result<Node, NodeError> {
        let path = path.into();
        let Some((_, parents)) = path.keys().split_last() else {
            return Err(NodeError::EmptyPath);
        };

        let mut current = self;
        for (depth, key) in parents.iter().enumerate() {
            match current.entries.get(key) {
                Some(Value::Node(child)) => current = child,
                Some(other) => {
                    return Err(NodeError::NotANode {
                        path: Path::from(&parents[..=depth]).to_string(),
                        found: other.type_name().to_string(),
                    });
                }
                None => break,
            }
        }

        Ok(self.assoc_in(path, value))
    }

    /// Returns a new node where the value at `path` is replaced by
    /// `f(current)`.
    ///
    /// Equivalent to `assoc_in(path, f(get_in(path)))`. Deleting a nested
    /// key is done by passing a removal function such as [`without`] with
    /// the parent path.
    pub fn update_in<F>(&self, path: impl Into<Path>, f: F) -> Node
    where
        F: FnOnce(Option<&Value>) -> Value,
    {
        let path = path.into();
        match self.rebuild::<_, Infallible>(path.keys(), |current| Ok(f(current))) {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`Node::update_in`].
    ///
    /// An error from `f` is returned unchanged and no new node is produced.
    pub fn try_update_in<F, E>(&self, path: impl Into<Path>, f: F) -> Result<Node, E>
    where
        F: FnOnce(Option<&Value>) -> Result<Value, E>,
    {
        let path = path.into();
        self.rebuild(path.keys(), f)
    }

    /// Returns a new node holding every key of `self` and `other`; `other`
    /// wins on shared keys. The merge is shallow.
    pub fn merge(&self, other: &Node) -> Node {
        Node {
            entries: other.entries.clone().union(self.entries.clone()),
        }
    }

    /// Serializes the node as a JSON object with keys in sorted order
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON object into a node
    pub fn from_json_str(json: &str) -> crate::Result<Node> {
        Ok(serde_json::from_str(json)?)
    }

    // Copies the nodes along `keys`, reusing every other child as is.
    fn rebuild<F, E>(&self, keys: &[Key], f: F) -> Result<Node, E>
    where
        F: FnOnce(Option<&Value>) -> Result<Value, E>,
    {
        let Some((first, rest)) = keys.split_first() else {
            return Ok(self.clone());
        };

        let next = if rest.is_empty() {
            f(self.entries.get(first))?
        } else {
            let child = match self.entries.get(first) {
                Some(Value::Node(child)) => child.clone(),
                Some(other) => {
                    tracing::debug!(
                        key = %first,
                        found = other.type_name(),
                        "Replacing scalar with empty node along path"
                    );
                    Node::new()
                }
                None => Node::new(),
            };
            Value::Node(child.rebuild(rest, f)?)
        };

        Ok(Node {
            entries: self.entries.update(first.clone(), next),
        })
    }
}

/// Returns a removal function for use with [`Node::update_in`].
///
/// The returned closure removes `key` from the node it is given. A scalar
/// is returned unchanged and an absent value becomes an empty node.
///
/// ```
/// # use atomtree::{node, path, node::without};
/// let tree = node! { "a" => node! { "b" => 1, "c" => 2 } };
/// let pruned = tree.update_in(path!["a"], without("b"));
/// assert_eq!(pruned, node! { "a" => node! { "c" => 2 } });
/// ```
pub fn without(key: impl Into<Key>) -> impl FnOnce(Option<&Value>) -> Value {
    let key = key.into();
    move |current| match current {
        Some(Value::Node(node)) => Value::Node(node.dissoc(key)),
        Some(other) => other.clone(),
        None => Value::Node(Node::new()),
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries = self.sorted_entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.sorted_entries().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Node {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Node {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Builds a [`Node`] literal.
///
/// Keys go through `Into<Key>` and values through `Into<Value>`, so nested
/// literals compose:
///
/// ```
/// # use atomtree::node;
/// let dante = node! { "name" => "Dante", "age" => 13, "color" => "red" };
/// let braden = node! { "age" => 22, "pets" => node! { "bird" => dante } };
/// assert_eq!(braden.len(), 2);
/// assert!(node! {}.is_empty());
/// ```
#[macro_export]
macro_rules! node {
    () => {
        $crate::node::Node::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::node::Node::new().assoc_all([
            $(($crate::node::Key::from($key), $crate::node::Value::from($value))),+
        ])
    };
}
