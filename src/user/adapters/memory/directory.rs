//! In-memory user directory for tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{PersistedUserData, User, UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: BTreeMap<UserId, User>,
    last_id: i64,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> UserDirectoryError {
    UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn register(
        &self,
        profile: &UserProfile,
        created_at: DateTime<Utc>,
    ) -> UserDirectoryResult<User> {
        let mut state = self.state.write().map_err(lock_error)?;
        let next = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| lock_error("user id sequence exhausted"))?;
        let id = UserId::new(next).map_err(UserDirectoryError::persistence)?;
        state.last_id = next;

        let user = User::from_persisted(PersistedUserData {
            id,
            name: profile.name.clone(),
            job_position: profile.job_position.clone(),
            created_at,
            updated_at: created_at,
            deleted_at: None,
        });
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .users
            .get_mut(&user.id())
            .ok_or(UserDirectoryError::NotFound(user.id()))?;
        *slot = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn list_active(&self) -> UserDirectoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .users
            .values()
            .filter(|user| user.is_active())
            .cloned()
            .collect())
    }
}
