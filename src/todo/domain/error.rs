//! Error types for task domain validation and parsing.

use crate::user::domain::UserDomainError;
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The owner reference is not a valid user identifier.
    #[error(transparent)]
    InvalidOwner(#[from] UserDomainError),

    /// The position value is not an integer.
    #[error("invalid position '{0}', expected an integer")]
    InvalidPosition(String),

    /// The task identifier is not a UUID.
    #[error("invalid task id '{0}'")]
    InvalidTodoId(String),

    /// Shifting or appending would leave the 64-bit position range.
    #[error("position overflow in lane '{0}'")]
    PositionOverflow(String),
}
