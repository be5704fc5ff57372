//! Service layer over the user directory port.

use crate::user::{
    domain::{User, UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// The user does not exist or has been removed.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// Directory operation failed.
    #[error(transparent)]
    Directory(UserDirectoryError),
}

impl From<UserDirectoryError> for UserServiceError {
    fn from(err: UserDirectoryError) -> Self {
        match err {
            UserDirectoryError::NotFound(id) => Self::NotFound(id),
            other @ UserDirectoryError::Persistence(_) => Self::Directory(other),
        }
    }
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User directory orchestration service.
pub struct UserService<D, C>
where
    D: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<D, C> Clone for UserService<D, C>
where
    D: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<D, C> UserService<D, C>
where
    D: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(directory: Arc<D>, clock: Arc<C>) -> Self {
        Self { directory, clock }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Directory`] when persistence fails.
    pub async fn create(&self, profile: UserProfile) -> UserServiceResult<User> {
        let user = self.directory.register(&profile, self.clock.utc()).await?;
        tracing::info!(user_id = %user.id(), "registered user");
        Ok(user)
    }

    /// Fetches an active user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user is unknown or
    /// soft-deleted.
    pub async fn get(&self, id: UserId) -> UserServiceResult<User> {
        self.directory
            .find_by_id(id)
            .await?
            .filter(User::is_active)
            .ok_or(UserServiceError::NotFound(id))
    }

    /// Lists all active users.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Directory`] when the lookup fails.
    pub async fn list(&self) -> UserServiceResult<Vec<User>> {
        Ok(self.directory.list_active().await?)
    }

    /// Replaces the profile fields of an active user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user is unknown or
    /// soft-deleted.
    pub async fn update(&self, id: UserId, profile: UserProfile) -> UserServiceResult<User> {
        let mut user = self.get(id).await?;
        user.apply_profile(profile, &*self.clock);
        self.directory.update(&user).await?;
        Ok(user)
    }

    /// Soft-deletes an active user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when the user is unknown or
    /// already removed.
    pub async fn remove(&self, id: UserId) -> UserServiceResult<User> {
        let mut user = self.get(id).await?;
        user.mark_deleted(&*self.clock);
        self.directory.update(&user).await?;
        tracing::info!(user_id = %id, "removed user");
        Ok(user)
    }
}
