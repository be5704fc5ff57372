//! Repository port for task persistence and lane-scoped position updates.

use crate::todo::domain::{LaneKey, LaneShift, Todo, TodoId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Outcome of an atomically applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneMoveOutcome {
    /// The moved task as stored after the move.
    pub moved: Todo,
    /// Number of siblings whose position was shifted.
    pub shifted: u64,
}

/// Task persistence contract.
///
/// Positions are written only by [`TodoRepository::store`] and
/// [`TodoRepository::apply_move`]; the other mutations leave them alone so a
/// stale in-memory copy can never undo a concurrent shift.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateTodo`] when the task ID already
    /// exists.
    async fn store(&self, todo: &Todo) -> TodoRepositoryResult<()>;

    /// Persists title, description, owner, lane and update timestamp of an
    /// active task and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when no active task has the
    /// given identifier.
    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<Todo>;

    /// Finds a task by identifier, including soft-deleted tasks.
    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>>;

    /// Returns all active tasks ordered by lane, then position.
    async fn find_active(&self) -> TodoRepositoryResult<Vec<Todo>>;

    /// Returns the active tasks of one lane ordered by position.
    async fn find_active_in_lane(&self, lane: &LaneKey) -> TodoRepositoryResult<Vec<Todo>>;

    /// Counts the active tasks of one lane.
    async fn count_active_in_lane(&self, lane: &LaneKey) -> TodoRepositoryResult<u64>;

    /// Writes the new position of `moved` and applies `shift` to its
    /// siblings as one all-or-nothing unit.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when `moved` is missing or
    /// soft-deleted; nothing is written in that case or on any other error.
    async fn apply_move(
        &self,
        moved: &Todo,
        shift: &LaneShift,
    ) -> TodoRepositoryResult<LaneMoveOutcome>;

    /// Sets the soft-delete marker of an active task and returns the stored
    /// record. Positions are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when no active task has the
    /// given identifier.
    async fn soft_delete(
        &self,
        id: TodoId,
        deleted_at: DateTime<Utc>,
    ) -> TodoRepositoryResult<Todo>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTodo(TodoId),

    /// The task was not found among active records.
    #[error("task not found: {0}")]
    NotFound(TodoId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
