//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user identifier is not a positive integer.
    #[error("invalid user id '{0}', expected a positive integer")]
    InvalidUserId(String),
}
