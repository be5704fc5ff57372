//! Identifier types for the user directory.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric identifier assigned to a user by the directory.
///
/// Task records carry this value as their owner reference, so it is exposed
/// to clients as a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidUserId`] when the value is not a
    /// positive integer.
    pub fn new(value: i64) -> Result<Self, UserDomainError> {
        if value <= 0 {
            return Err(UserDomainError::InvalidUserId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = UserDomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| UserDomainError::InvalidUserId(raw.to_owned()))?;
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
