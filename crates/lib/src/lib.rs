//!
//! atomtree: persistent nested maps and an atomic state cell.
//!
//! ## Core Concepts
//!
//! * **Nodes (`node::Node`)**: Immutable, structurally shared maps from keys to values, where
//!   values may be further nodes. Reads and updates work at a single key or along a `node::Path`
//!   of keys at any depth, and always return a new tree.
//! * **Atoms (`atom::Atom`)**: A single mutable slot holding an immutable value. Reads are
//!   lock-free; updates are atomic read-compute-install steps that never lose a write.
//! * **Accounts (`accounts`)**: A small state service showing how the two compose, keeping a
//!   map of accounts and their pets inside one atom.

pub mod accounts;
pub mod atom;
pub mod constants;
pub mod node;

/// Re-export the most used types for easier access.
pub use atom::Atom;
pub use node::{Key, Node, Path, Value};

/// Result type used throughout the atomtree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the atomtree library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured errors from the node module
    #[error(transparent)]
    Node(node::NodeError),

    /// Structured errors from the atom module
    #[error(transparent)]
    Atom(atom::AtomError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Node(_) => "node",
            Error::Atom(_) => "atom",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error is a value type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Node(node_err) => node_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error came from an invalid path traversal.
    pub fn is_path_error(&self) -> bool {
        match self {
            Error::Node(node_err) => node_err.is_path_error(),
            _ => false,
        }
    }

    /// Check if this error is validation-related.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Atom(atom_err) => atom_err.is_validation_error(),
            _ => false,
        }
    }

    /// Check if this error is a JSON (de)serialization failure.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }
}
