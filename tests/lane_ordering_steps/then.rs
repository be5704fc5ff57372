//! Then steps for lane ordering BDD scenarios.

use super::world::LaneOrderingWorld;
use eyre::ensure;
use rstest_bdd_macros::then;
use todolane::todo::services::TodoServiceError;

#[then(r#"task "{title}" has position {position:u64}"#)]
fn task_has_position(
    world: &LaneOrderingWorld,
    title: String,
    position: u64,
) -> Result<(), eyre::Report> {
    let expected = i64::try_from(position)?;
    let actual = world.reload(&title)?.position().value();
    ensure!(
        actual == expected,
        "expected task {title} at position {expected}, found {actual}"
    );
    Ok(())
}

#[then(r#"task "{title}" is marked deleted"#)]
fn task_is_marked_deleted(world: &LaneOrderingWorld, title: String) -> Result<(), eyre::Report> {
    let stored = world.reload(&title)?;
    ensure!(
        stored.deleted_at().is_some(),
        "expected task {title} to be soft-deleted"
    );
    Ok(())
}

#[then("the move fails because the task was not found")]
fn move_fails_not_found(world: &LaneOrderingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    ensure!(
        matches!(result, Err(TodoServiceError::NotFound(_))),
        "expected NotFound error, got {result:?}"
    );
    Ok(())
}
