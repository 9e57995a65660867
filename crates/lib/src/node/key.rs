//! Keys for nested maps.
//!
//! A [`Key`] is either a plain string or a symbol-like keyword. Keywords
//! display (and serialize) with a leading colon, so `Key::keyword("age")`
//! renders as `:age` while `Key::from("age")` renders as `age`.
//!
//! A string key that itself starts with `:` or `\` is written with a `\`
//! prefix, so `Key::from(":age")` renders as `\:age`. Every key therefore
//! parses back to exactly the key that was written.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const KEYWORD_PREFIX: char = ':';
const ESCAPE: char = '\\';

/// A key in a [`Node`](super::Node).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Plain string key
    Str(String),
    /// Symbol-like keyword key, written `:name`
    Keyword(String),
}

impl Key {
    /// Creates a keyword key. The name is stored without the leading colon.
    pub fn keyword(name: impl Into<String>) -> Self {
        Key::Keyword(name.into())
    }

    /// Parses a textual key, the inverse of its `Display` form.
    ///
    /// A leading `:` yields a keyword and a leading `\` is dropped from a
    /// string key; anything else is a plain string key.
    ///
    /// ```
    /// # use atomtree::node::Key;
    /// assert_eq!(Key::parse(":age"), Key::keyword("age"));
    /// assert_eq!(Key::parse("age"), Key::from("age"));
    /// assert_eq!(Key::parse(":"), Key::keyword(""));
    /// assert_eq!(Key::parse("\\:age"), Key::from(":age"));
    /// ```
    pub fn parse(s: &str) -> Self {
        if let Some(escaped) = s.strip_prefix(ESCAPE) {
            Key::Str(escaped.to_string())
        } else if let Some(name) = s.strip_prefix(KEYWORD_PREFIX) {
            Key::Keyword(name.to_string())
        } else {
            Key::Str(s.to_string())
        }
    }

    /// Returns the key name, without the colon for keywords.
    pub fn as_str(&self) -> &str {
        match self {
            Key::Str(s) | Key::Keyword(s) => s,
        }
    }

    /// Returns true if this is a keyword key.
    pub fn is_keyword(&self) -> bool {
        matches!(self, Key::Keyword(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) if s.starts_with([KEYWORD_PREFIX, ESCAPE]) => write!(f, "{ESCAPE}{s}"),
            Key::Str(s) => write!(f, "{s}"),
            Key::Keyword(name) => write!(f, "{KEYWORD_PREFIX}{name}"),
        }
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Key::parse(s))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::Str(value.clone())
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

// Keys always travel as strings so that nodes map onto JSON objects. The
// `Display` form is unambiguous, so it doubles as the wire form.
impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Key::parse(&raw))
    }
}
