//! Directory port for user persistence and lookup.

use crate::user::domain::{User, UserId, UserProfile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Registers a new user and returns it with its assigned identifier.
    async fn register(
        &self,
        profile: &UserProfile,
        created_at: DateTime<Utc>,
    ) -> UserDirectoryResult<User>;

    /// Persists changes to an existing user, including soft deletion.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::NotFound`] when the user does not exist.
    async fn update(&self, user: &User) -> UserDirectoryResult<()>;

    /// Finds a user by identifier, including soft-deleted users.
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>>;

    /// Returns every user that has not been soft-deleted, ordered by id.
    async fn list_active(&self) -> UserDirectoryResult<Vec<User>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
