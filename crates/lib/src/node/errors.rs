//! Error types for nested-map operations.
//!
//! Reading a missing key is never an error; these variants only cover typed
//! reads that find the wrong kind of value and the strict path setters.

use thiserror::Error;

/// Structured error types for [`Node`](super::Node) operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NodeError {
    /// A typed read found a value of another type
    #[error("Node value type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A strict path operation found a scalar where a nested node was needed
    #[error("Cannot descend into {found} at '{path}'")]
    NotANode { path: String, found: String },

    /// A path operation that needs at least one key was given none
    #[error("Empty path is not allowed for this operation")]
    EmptyPath,
}

impl NodeError {
    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, NodeError::TypeMismatch { .. })
    }

    /// Check if this error is related to path traversal
    pub fn is_path_error(&self) -> bool {
        matches!(self, NodeError::NotANode { .. } | NodeError::EmptyPath)
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            NodeError::NotANode { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<NodeError> for crate::Error {
    fn from(err: NodeError) -> Self {
        crate::Error::Node(err)
    }
}
