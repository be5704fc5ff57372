//! Service layer for task creation, editing, reordering and removal.

use super::ordering::{LaneOrderingError, LanePositionManager};
use crate::todo::{
    domain::{LaneKey, Position, ShiftPolicy, Todo, TodoDomainError, TodoFields, TodoId},
    ports::{TodoRepository, TodoRepositoryError},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Raw task fields as received from a client.
///
/// The owner reference arrives as text and is validated by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoRequest {
    title: String,
    description: String,
    owner: String,
    lane: String,
}

impl TodoRequest {
    /// Creates a request with every field supplied.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
        lane: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            owner: owner.into(),
            lane: lane.into(),
        }
    }

    fn into_fields(self) -> Result<TodoFields, TodoDomainError> {
        let owner = self.owner.parse::<UserId>()?;
        Ok(TodoFields {
            title: self.title,
            description: self.description,
            owner,
            lane: LaneKey::new(self.lane),
        })
    }
}

/// Request payload for moving a task to an explicit position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePositionRequest {
    todo_id: TodoId,
    position: String,
}

impl ChangePositionRequest {
    /// Creates a move request; the position is parsed by the service.
    #[must_use]
    pub fn new(todo_id: TodoId, position: impl Into<String>) -> Self {
        Self {
            todo_id,
            position: position.into(),
        }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// The task does not exist or has been soft-deleted.
    #[error("task not found: {0}")]
    NotFound(TodoId),
    /// A numeric input could not be parsed or is out of range.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] TodoDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(TodoRepositoryError),
}

impl From<TodoRepositoryError> for TodoServiceError {
    fn from(err: TodoRepositoryError) -> Self {
        match err {
            TodoRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

impl From<LaneOrderingError> for TodoServiceError {
    fn from(err: LaneOrderingError) -> Self {
        match err {
            LaneOrderingError::NotFound(id) => Self::NotFound(id),
            LaneOrderingError::Domain(domain) => Self::InvalidInput(domain),
            LaneOrderingError::Repository(repository) => Self::Repository(repository),
        }
    }
}

/// Result type for task service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Task orchestration service.
pub struct TodoService<R, C>
where
    R: TodoRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    ordering: LanePositionManager<R, C>,
}

impl<R, C> Clone for TodoService<R, C>
where
    R: TodoRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            ordering: self.ordering.clone(),
        }
    }
}

impl<R, C> TodoService<R, C>
where
    R: TodoRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a service that shifts every sibling on explicit moves.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_policy(repository, clock, ShiftPolicy::default())
    }

    /// Creates a service with an explicit sibling shift policy.
    #[must_use]
    pub fn with_policy(repository: Arc<R>, clock: Arc<C>, policy: ShiftPolicy) -> Self {
        let ordering =
            LanePositionManager::with_policy(Arc::clone(&repository), Arc::clone(&clock), policy);
        Self {
            repository,
            clock,
            ordering,
        }
    }

    /// Returns the lane position manager used by this service.
    #[must_use]
    pub const fn ordering(&self) -> &LanePositionManager<R, C> {
        &self.ordering
    }

    /// Creates a task at the end of the lane named by the request.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::InvalidInput`] for a malformed owner and
    /// [`TodoServiceError::Repository`] when persistence fails.
    pub async fn create(&self, request: TodoRequest) -> TodoServiceResult<Todo> {
        let fields = request.into_fields()?;
        Ok(self.ordering.create_in_lane(fields).await?)
    }

    /// Fetches an active task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] when the task is unknown or
    /// soft-deleted.
    pub async fn get(&self, id: TodoId) -> TodoServiceResult<Todo> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(Todo::is_active)
            .ok_or(TodoServiceError::NotFound(id))
    }

    /// Lists all active tasks ordered by lane, then position.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when the lookup fails.
    pub async fn list(&self) -> TodoServiceResult<Vec<Todo>> {
        Ok(self.repository.find_active().await?)
    }

    /// Lists the active tasks of one lane ordered by position.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Repository`] when the lookup fails.
    pub async fn list_lane(&self, lane: &LaneKey) -> TodoServiceResult<Vec<Todo>> {
        Ok(self.repository.find_active_in_lane(lane).await?)
    }

    /// Overwrites title, description, owner and lane of an active task.
    ///
    /// No reordering happens here: a task that changes lane keeps its
    /// position value, which may collide with tasks already in the new lane.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] for an unknown or removed task
    /// and [`TodoServiceError::InvalidInput`] for a malformed owner.
    pub async fn update(&self, id: TodoId, request: TodoRequest) -> TodoServiceResult<Todo> {
        let fields = request.into_fields()?;
        let mut todo = self.get(id).await?;
        let previous_lane = todo.lane().clone();
        todo.apply_fields(fields, &*self.clock);
        let stored = self.repository.update(&todo).await?;
        if stored.lane() != &previous_lane {
            tracing::debug!(
                todo_id = %id,
                from = %previous_lane,
                to = %stored.lane(),
                position = stored.position().value(),
                "task changed lane without reordering"
            );
        }
        Ok(stored)
    }

    /// Moves a task to an explicit position.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::InvalidInput`] for a non-numeric position,
    /// [`TodoServiceError::NotFound`] for an unknown or removed task and
    /// [`TodoServiceError::Repository`] when the atomic move fails.
    pub async fn change_position(&self, request: ChangePositionRequest) -> TodoServiceResult<Todo> {
        let position = request.position.parse::<Position>()?;
        Ok(self.ordering.move_position(request.todo_id, position).await?)
    }

    /// Soft-deletes a task without renumbering its lane.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] for an unknown or removed task.
    pub async fn remove(&self, id: TodoId) -> TodoServiceResult<Todo> {
        Ok(self.ordering.remove_task(id).await?)
    }
}
