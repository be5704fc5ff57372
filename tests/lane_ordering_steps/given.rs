//! Given steps for lane ordering BDD scenarios.

use super::world::{LaneOrderingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todolane::todo::services::ChangePositionRequest;

#[given("an empty board")]
fn empty_board(world: &mut LaneOrderingWorld) {
    world.tasks.clear();
}

#[given(r#"task "{title}" exists in lane "{lane}""#)]
fn task_exists(
    world: &mut LaneOrderingWorld,
    title: String,
    lane: String,
) -> Result<(), eyre::Report> {
    world
        .create(&title, &lane)
        .wrap_err("create task in scenario setup")
}

#[given(r#"task "{title}" has been moved to position {position:u64}"#)]
fn task_has_been_moved(
    world: &mut LaneOrderingWorld,
    title: String,
    position: u64,
) -> Result<(), eyre::Report> {
    let id = world.task(&title)?.id();
    let moved = run_async(
        world
            .service
            .change_position(ChangePositionRequest::new(id, position.to_string())),
    )
    .wrap_err("move task in scenario setup")?;
    world.tasks.insert(title, moved);
    Ok(())
}
