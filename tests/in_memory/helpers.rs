//! Shared test helpers for in-memory repository integration tests.

use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use todolane::todo::{
    adapters::memory::InMemoryTodoRepository,
    domain::{LaneKey, PersistedTodoData, Position, Todo, TodoFields, TodoId},
};
use todolane::user::domain::UserId;

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> InMemoryTodoRepository {
    InMemoryTodoRepository::new()
}

/// Provides a clock for task creation.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// Builds task fields owned by user 1.
#[must_use]
pub fn fields(title: &str, lane: &str) -> TodoFields {
    TodoFields {
        title: title.to_owned(),
        description: format!("{title} description"),
        owner: UserId::new(1).expect("constant owner id is valid"),
        lane: LaneKey::new(lane),
    }
}

/// Builds a task at an explicit position with deterministic timestamps.
#[must_use]
pub fn todo_at(title: &str, lane: &str, position: i64) -> Todo {
    let created_at = Utc
        .with_ymd_and_hms(2026, 1, 1, 9, 0, 0)
        .single()
        .expect("fixed timestamp is unambiguous");
    let TodoFields {
        title,
        description,
        owner,
        lane,
    } = fields(title, lane);
    Todo::from_persisted(PersistedTodoData {
        id: TodoId::new(),
        title,
        description,
        owner_id: owner,
        lane,
        position: Position::new(position),
        created_at,
        updated_at: created_at,
        deleted_at: None,
    })
}
