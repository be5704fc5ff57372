//! Lane position management: assigning, moving and freezing positions.

use super::locks::{LaneGuard, LaneLocks};
use crate::todo::{
    domain::{LaneKey, LaneShift, Position, ShiftPolicy, Todo, TodoDomainError, TodoFields, TodoId},
    ports::{TodoRepository, TodoRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by lane ordering operations.
#[derive(Debug, Error)]
pub enum LaneOrderingError {
    /// The task does not exist or has been soft-deleted.
    #[error("task not found: {0}")]
    NotFound(TodoId),
    /// The lane cannot take another position.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// Repository operation failed; nothing was applied.
    #[error(transparent)]
    Repository(TodoRepositoryError),
}

impl From<TodoRepositoryError> for LaneOrderingError {
    fn from(err: TodoRepositoryError) -> Self {
        match err {
            TodoRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for lane ordering operations.
pub type LaneOrderingResult<T> = Result<T, LaneOrderingError>;

/// Computes and applies task positions within lanes.
///
/// Creations and moves in the same lane are serialized through
/// [`LaneLocks`]; moves are handed to the repository as one atomic
/// [`TodoRepository::apply_move`] call.
pub struct LanePositionManager<R, C>
where
    R: TodoRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    locks: LaneLocks,
    policy: ShiftPolicy,
}

impl<R, C> Clone for LanePositionManager<R, C>
where
    R: TodoRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            locks: self.locks.clone(),
            policy: self.policy,
        }
    }
}

impl<R, C> LanePositionManager<R, C>
where
    R: TodoRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a manager using the default [`ShiftPolicy::All`].
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_policy(repository, clock, ShiftPolicy::default())
    }

    /// Creates a manager with an explicit sibling shift policy.
    #[must_use]
    pub fn with_policy(repository: Arc<R>, clock: Arc<C>, policy: ShiftPolicy) -> Self {
        Self {
            repository,
            clock,
            locks: LaneLocks::new(),
            policy,
        }
    }

    /// Returns the configured sibling shift policy.
    #[must_use]
    pub const fn policy(&self) -> ShiftPolicy {
        self.policy
    }

    /// Locks `lane` against other position writers of this manager.
    pub async fn lock_lane(&self, lane: &LaneKey) -> LaneGuard {
        self.locks.acquire(lane).await
    }

    /// Returns the position a task joining `lane` would take now: the number
    /// of active tasks in the lane plus one.
    ///
    /// Reads only. Callers that persist the result should hold
    /// [`Self::lock_lane`] until the task is stored, as
    /// [`Self::create_in_lane`] does.
    ///
    /// # Errors
    ///
    /// Returns [`LaneOrderingError::Repository`] when the count fails and
    /// [`LaneOrderingError::Domain`] when the lane is full.
    pub async fn assign_position(&self, lane: &LaneKey) -> LaneOrderingResult<Position> {
        let active = self.repository.count_active_in_lane(lane).await?;
        let position = Position::after_count(active)
            .ok_or_else(|| TodoDomainError::PositionOverflow(lane.to_string()))?;
        tracing::debug!(lane = %lane, active, position = position.value(), "assigned lane position");
        Ok(position)
    }

    /// Creates a task at the tail of its lane.
    ///
    /// Counting and storing happen under the lane lock, so two concurrent
    /// creations in one lane always receive distinct positions.
    ///
    /// # Errors
    ///
    /// Returns [`LaneOrderingError`] when the count or the insert fails; no
    /// task is stored in that case.
    pub async fn create_in_lane(&self, fields: TodoFields) -> LaneOrderingResult<Todo> {
        let _guard = self.lock_lane(&fields.lane).await;
        let position = self.assign_position(&fields.lane).await?;
        let todo = Todo::new(fields, position, &*self.clock);
        self.repository.store(&todo).await?;
        tracing::info!(
            todo_id = %todo.id(),
            lane = %todo.lane(),
            position = position.value(),
            "created task"
        );
        Ok(todo)
    }

    /// Moves a task to `new_position` and pushes its active siblings down.
    ///
    /// The target is stored as given, without range checks. Which siblings
    /// move depends on the configured [`ShiftPolicy`]; with the default every
    /// other active task of the lane moves down by one.
    ///
    /// # Errors
    ///
    /// Returns [`LaneOrderingError::NotFound`] when the task is missing or
    /// soft-deleted and [`LaneOrderingError::Repository`] when the write
    /// fails. In both cases no position has changed.
    pub async fn move_position(
        &self,
        id: TodoId,
        new_position: Position,
    ) -> LaneOrderingResult<Todo> {
        loop {
            let lane = self.find_active(id).await?.lane().clone();
            let _guard = self.lock_lane(&lane).await;

            // The lane may have changed while waiting for the lock.
            let mut todo = self.find_active(id).await?;
            if todo.lane() != &lane {
                continue;
            }

            let previous = todo.position();
            todo.reposition(new_position, &*self.clock);
            let shift = LaneShift::for_move(&todo, self.policy);
            let outcome = self.repository.apply_move(&todo, &shift).await?;
            tracing::info!(
                todo_id = %id,
                lane = %lane,
                from = previous.value(),
                to = new_position.value(),
                shifted = outcome.shifted,
                "moved task"
            );
            return Ok(outcome.moved);
        }
    }

    /// Soft-deletes a task.
    ///
    /// The removed task keeps its position and the remaining tasks are not
    /// renumbered, so the lane may have a gap afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`LaneOrderingError::NotFound`] when the task is missing or
    /// already removed.
    pub async fn remove_task(&self, id: TodoId) -> LaneOrderingResult<Todo> {
        let todo = self.find_active(id).await?;
        let removed = self
            .repository
            .soft_delete(todo.id(), self.clock.utc())
            .await?;
        tracing::info!(
            todo_id = %id,
            lane = %removed.lane(),
            position = removed.position().value(),
            "removed task"
        );
        Ok(removed)
    }

    async fn find_active(&self, id: TodoId) -> LaneOrderingResult<Todo> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(Todo::is_active)
            .ok_or(LaneOrderingError::NotFound(id))
    }
}
