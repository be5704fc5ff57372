//! In-memory task repository for tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::todo::{
    domain::{LaneKey, LaneShift, Todo, TodoId},
    ports::{LaneMoveOutcome, TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Every mutation runs under one write lock, which makes
/// [`TodoRepository::apply_move`] atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    state: Arc<RwLock<InMemoryTodoState>>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    todos: HashMap<TodoId, Todo>,
}

impl InMemoryTodoRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryTodoState {
    fn active_mut(&mut self, id: TodoId) -> TodoRepositoryResult<&mut Todo> {
        self.todos
            .get_mut(&id)
            .filter(|todo| todo.is_active())
            .ok_or(TodoRepositoryError::NotFound(id))
    }

    fn active_in_lane<'a>(&'a self, lane: &'a LaneKey) -> impl Iterator<Item = &'a Todo> + 'a {
        self.todos
            .values()
            .filter(move |todo| todo.is_active() && todo.lane() == lane)
    }
}

fn lock_error(err: impl std::fmt::Display) -> TodoRepositoryError {
    TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sort_by_lane_position(todos: &mut [Todo]) {
    todos.sort_by(|left, right| {
        left.lane()
            .cmp(right.lane())
            .then_with(|| left.position().cmp(&right.position()))
            .then_with(|| left.created_at().cmp(&right.created_at()))
    });
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn store(&self, todo: &Todo) -> TodoRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.todos.contains_key(&todo.id()) {
            return Err(TodoRepositoryError::DuplicateTodo(todo.id()));
        }
        state.todos.insert(todo.id(), todo.clone());
        Ok(())
    }

    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<Todo> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state.active_mut(todo.id())?;

        let mut data = todo.clone().into_persisted();
        data.position = stored.position();
        data.created_at = stored.created_at();
        data.deleted_at = stored.deleted_at();
        *stored = Todo::from_persisted(data);
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.todos.get(&id).cloned())
    }

    async fn find_active(&self) -> TodoRepositoryResult<Vec<Todo>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut todos: Vec<Todo> = state
            .todos
            .values()
            .filter(|todo| todo.is_active())
            .cloned()
            .collect();
        sort_by_lane_position(&mut todos);
        Ok(todos)
    }

    async fn find_active_in_lane(&self, lane: &LaneKey) -> TodoRepositoryResult<Vec<Todo>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut todos: Vec<Todo> = state.active_in_lane(lane).cloned().collect();
        sort_by_lane_position(&mut todos);
        Ok(todos)
    }

    async fn count_active_in_lane(&self, lane: &LaneKey) -> TodoRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        let count = state.active_in_lane(lane).count();
        u64::try_from(count).map_err(TodoRepositoryError::persistence)
    }

    async fn apply_move(
        &self,
        moved: &Todo,
        shift: &LaneShift,
    ) -> TodoRepositoryResult<LaneMoveOutcome> {
        let mut state = self.state.write().map_err(lock_error)?;
        let at = moved.updated_at();

        // Compute every new row before writing any of them.
        let mut shifted_rows = Vec::new();
        for todo in state.todos.values().filter(|todo| shift.applies_to(todo)) {
            let mut next = todo.clone();
            next.shift_down(at).map_err(TodoRepositoryError::persistence)?;
            shifted_rows.push(next);
        }

        let stored = state.active_mut(moved.id())?;
        let mut data = stored.clone().into_persisted();
        data.position = moved.position();
        data.updated_at = at;
        *stored = Todo::from_persisted(data);
        let updated = stored.clone();

        let shifted = u64::try_from(shifted_rows.len()).map_err(TodoRepositoryError::persistence)?;
        for row in shifted_rows {
            state.todos.insert(row.id(), row);
        }

        Ok(LaneMoveOutcome {
            moved: updated,
            shifted,
        })
    }

    async fn soft_delete(
        &self,
        id: TodoId,
        deleted_at: DateTime<Utc>,
    ) -> TodoRepositoryResult<Todo> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state.active_mut(id)?;
        let mut data = stored.clone().into_persisted();
        data.deleted_at = Some(deleted_at);
        data.updated_at = deleted_at;
        *stored = Todo::from_persisted(data);
        Ok(stored.clone())
    }
}
