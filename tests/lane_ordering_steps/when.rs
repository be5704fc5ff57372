//! When steps for lane ordering BDD scenarios.

use super::world::{LaneOrderingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use todolane::todo::{domain::TodoId, services::ChangePositionRequest};

#[when(r#"task "{title}" is created in lane "{lane}""#)]
fn create_task(
    world: &mut LaneOrderingWorld,
    title: String,
    lane: String,
) -> Result<(), eyre::Report> {
    world.create(&title, &lane).wrap_err("create task")
}

#[when(r#"task "{title}" is moved to position {position:u64}"#)]
fn move_task(
    world: &mut LaneOrderingWorld,
    title: String,
    position: u64,
) -> Result<(), eyre::Report> {
    let id = world.task(&title)?.id();
    let result = run_async(
        world
            .service
            .change_position(ChangePositionRequest::new(id, position.to_string())),
    );
    if let Ok(ref moved) = result {
        world.tasks.insert(title, moved.clone());
    }
    world.last_move_result = Some(result);
    Ok(())
}

#[when("an unknown task is moved to position {position:u64}")]
fn move_unknown_task(world: &mut LaneOrderingWorld, position: u64) {
    let result = run_async(world.service.change_position(ChangePositionRequest::new(
        TodoId::new(),
        position.to_string(),
    )));
    world.last_move_result = Some(result);
}

#[when(r#"task "{title}" is removed"#)]
fn remove_task(world: &mut LaneOrderingWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task(&title)?.id();
    let removed = run_async(world.service.remove(id)).wrap_err("remove task")?;
    world.tasks.insert(title, removed);
    Ok(())
}
