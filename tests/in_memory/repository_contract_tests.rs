//! Contract tests for the in-memory task repository.

use super::helpers::{clock, repo, todo_at};
use mockable::{Clock, DefaultClock};
use rstest::rstest;
use todolane::todo::{
    adapters::memory::InMemoryTodoRepository,
    domain::{LaneKey, LaneShift, Position, ShiftPolicy, TodoId},
    ports::{TodoRepository, TodoRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_ids(repo: InMemoryTodoRepository) {
    let todo = todo_at("A", "todo", 1);
    repo.store(&todo).await.expect("first store should succeed");

    let result = repo.store(&todo).await;

    assert!(matches!(result, Err(TodoRepositoryError::DuplicateTodo(id)) if id == todo.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn count_ignores_removed_tasks_and_other_lanes(
    repo: InMemoryTodoRepository,
    clock: DefaultClock,
) {
    let a = todo_at("A", "todo", 1);
    let b = todo_at("B", "todo", 2);
    let c = todo_at("C", "done", 1);
    for todo in [&a, &b, &c] {
        repo.store(todo).await.expect("store should succeed");
    }
    repo.soft_delete(b.id(), clock.utc())
        .await
        .expect("soft delete should succeed");

    let todo_count = repo
        .count_active_in_lane(&LaneKey::new("todo"))
        .await
        .expect("count should succeed");
    let empty_count = repo
        .count_active_in_lane(&LaneKey::new("review"))
        .await
        .expect("count should succeed");

    assert_eq!(todo_count, 1);
    assert_eq!(empty_count, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_never_writes_position(repo: InMemoryTodoRepository, clock: DefaultClock) {
    let original = todo_at("A", "todo", 1);
    repo.store(&original).await.expect("store should succeed");

    let mut stale = original.clone();
    stale.reposition(Position::new(40), &clock);

    let stored = repo.update(&stale).await.expect("update should succeed");

    assert_eq!(stored.position(), Position::new(1));
    assert_eq!(stored.created_at(), original.created_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn apply_move_reports_shifted_siblings(repo: InMemoryTodoRepository, clock: DefaultClock) {
    let a = todo_at("A", "todo", 1);
    let b = todo_at("B", "todo", 2);
    let c = todo_at("C", "todo", 3);
    for todo in [&a, &b, &c] {
        repo.store(todo).await.expect("store should succeed");
    }

    let mut moved = c.clone();
    moved.reposition(Position::new(1), &clock);
    let outcome = repo
        .apply_move(&moved, &LaneShift::for_move(&moved, ShiftPolicy::All))
        .await
        .expect("move should succeed");

    assert_eq!(outcome.shifted, 2);
    assert_eq!(outcome.moved.position(), Position::new(1));
    let lane = repo
        .find_active_in_lane(&LaneKey::new("todo"))
        .await
        .expect("lane listing should succeed");
    let order: Vec<(&str, i64)> = lane
        .iter()
        .map(|todo| (todo.title(), todo.position().value()))
        .collect();
    assert_eq!(order, vec![("C", 1), ("A", 2), ("B", 3)]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn apply_move_of_missing_task_writes_nothing(repo: InMemoryTodoRepository) {
    let a = todo_at("A", "todo", 1);
    repo.store(&a).await.expect("store should succeed");

    let ghost = todo_at("ghost", "todo", 1);
    let result = repo
        .apply_move(&ghost, &LaneShift::for_move(&ghost, ShiftPolicy::All))
        .await;

    assert!(matches!(result, Err(TodoRepositoryError::NotFound(id)) if id == ghost.id()));
    let stored = repo
        .find_by_id(a.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.position(), Position::new(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn apply_move_overflow_writes_nothing(repo: InMemoryTodoRepository, clock: DefaultClock) {
    let a = todo_at("A", "todo", 1);
    let top = todo_at("top", "todo", i64::MAX);
    repo.store(&a).await.expect("store should succeed");
    repo.store(&top).await.expect("store should succeed");

    let mut moved = a.clone();
    moved.reposition(Position::new(5), &clock);
    let result = repo
        .apply_move(&moved, &LaneShift::for_move(&moved, ShiftPolicy::All))
        .await;

    assert!(matches!(result, Err(TodoRepositoryError::Persistence(_))));
    let stored = repo
        .find_by_id(a.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.position(), Position::new(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn soft_delete_keeps_row_and_position(repo: InMemoryTodoRepository, clock: DefaultClock) {
    let a = todo_at("A", "todo", 7);
    repo.store(&a).await.expect("store should succeed");

    let deleted_at = clock.utc();
    let removed = repo
        .soft_delete(a.id(), deleted_at)
        .await
        .expect("soft delete should succeed");

    assert_eq!(removed.deleted_at(), Some(deleted_at));
    assert_eq!(removed.position(), Position::new(7));
    assert!(repo.find_active().await.expect("listing should succeed").is_empty());
    assert!(matches!(
        repo.soft_delete(a.id(), deleted_at).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
    assert!(matches!(
        repo.soft_delete(TodoId::new(), deleted_at).await,
        Err(TodoRepositoryError::NotFound(_))
    ));
}
