//! Paths for addressing values at depth inside a [`Node`](super::Node).
//!
//! A [`Path`] is an ordered sequence of [`Key`]s, root to leaf. Paths can be
//! built from arrays or vectors of keys, incrementally with [`Path::push`],
//! with the [`path!`](crate::path) macro, or by parsing dot notation.
//!
//! # Usage
//!
//! ```rust
//! use atomtree::node::{Key, Path};
//! use atomtree::path;
//!
//! // Parse dot notation (empty components are dropped)
//! let parsed: Path = "braden..pets.bird.".parse().unwrap();
//!
//! // Build incrementally
//! let built = Path::new().push("braden").push("pets").push("bird");
//!
//! // Build with the macro
//! let from_macro = path!["braden", "pets", "bird"];
//!
//! assert_eq!(parsed, built);
//! assert_eq!(built, from_macro);
//! assert_eq!(parsed.to_string(), "braden.pets.bird");
//!
//! // Components starting with ':' are keywords
//! let keyed: Path = "braden.:age".parse().unwrap();
//! assert_eq!(keyed.last(), Some(&Key::keyword("age")));
//! ```

use std::{fmt, str::FromStr};

use super::Key;

/// An owned path of keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    keys: Vec<Key>,
}

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Parses a dot-separated path.
    ///
    /// Leading, trailing and consecutive dots are ignored, so `".a..b."`
    /// parses the same as `"a.b"`. Each component goes through
    /// [`Key::parse`].
    pub fn parse(s: &str) -> Self {
        Self {
            keys: s
                .split('.')
                .filter(|component| !component.is_empty())
                .map(Key::parse)
                .collect(),
        }
    }

    /// Appends a key, builder style.
    pub fn push(mut self, key: impl Into<Key>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Appends every key of `other`.
    pub fn join(mut self, other: impl Into<Path>) -> Self {
        self.keys.extend(other.into().keys);
        self
    }

    /// Returns the keys of this path.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Returns the number of keys in the path.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the path has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the path without its last key, or `None` for the empty path.
    pub fn parent(&self) -> Option<Path> {
        let (_, init) = self.keys.split_last()?;
        Some(Path {
            keys: init.to_vec(),
        })
    }

    /// Returns the last key, or `None` for the empty path.
    pub fn last(&self) -> Option<&Key> {
        self.keys.last()
    }

    /// Returns an iterator over the keys.
    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.keys.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "(empty path)");
        }
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl AsRef<[Key]> for Path {
    fn as_ref(&self) -> &[Key] {
        &self.keys
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Path::parse(value)
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        Path::parse(&value)
    }
}

impl From<Key> for Path {
    fn from(value: Key) -> Self {
        Path { keys: vec![value] }
    }
}

impl From<&Path> for Path {
    fn from(value: &Path) -> Self {
        value.clone()
    }
}

impl<K: Into<Key>> From<Vec<K>> for Path {
    fn from(value: Vec<K>) -> Self {
        Path {
            keys: value.into_iter().map(Into::into).collect(),
        }
    }
}

impl<K: Into<Key>, const N: usize> From<[K; N]> for Path {
    fn from(value: [K; N]) -> Self {
        Path {
            keys: value.into_iter().map(Into::into).collect(),
        }
    }
}

impl<K: Into<Key> + Clone> From<&[K]> for Path {
    fn from(value: &[K]) -> Self {
        Path {
            keys: value.iter().cloned().map(Into::into).collect(),
        }
    }
}

impl<K: Into<Key>> FromIterator<K> for Path {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        Path {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Builds a [`Path`] from a list of keys.
///
/// Each argument goes through `Into<Key>`, so string literals become plain
/// string keys and [`Key::keyword`] values stay keywords. Unlike parsing,
/// the macro never splits on dots.
///
/// ```
/// # use atomtree::{node::Key, path};
/// let p = path!["braden", Key::keyword("pets"), "bird"];
/// assert_eq!(p.len(), 3);
/// assert_eq!(p.to_string(), "braden.:pets.bird");
///
/// let empty = path![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::node::Path::new()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::node::Path::new()$(.push($key))+
    };
}
