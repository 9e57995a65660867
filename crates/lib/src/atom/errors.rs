//! Atom specific errors
//!
//! Failures of user transformation functions are never wrapped in these
//! types; `Atom::try_swap` hands them back as they are. The variants here
//! cover what the atom itself refuses.

use thiserror::Error;

/// Errors raised by an [`Atom`](super::Atom)
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AtomError {
    /// The installed validator rejected a candidate value
    #[error("Atom validator rejected new state: {reason}")]
    ValidationFailed { reason: String },
}

impl AtomError {
    /// Check if this error is a validator rejection
    pub fn is_validation_error(&self) -> bool {
        matches!(self, AtomError::ValidationFailed { .. })
    }
}

impl From<AtomError> for crate::Error {
    fn from(err: AtomError) -> Self {
        crate::Error::Atom(err)
    }
}
