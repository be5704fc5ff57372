//! Application services for lane-ordered tasks.

mod lifecycle;
mod locks;
mod ordering;

pub use lifecycle::{
    ChangePositionRequest, TodoRequest, TodoService, TodoServiceError, TodoServiceResult,
};
pub use locks::{LaneGuard, LaneLocks};
pub use ordering::{LaneOrderingError, LaneOrderingResult, LanePositionManager};
