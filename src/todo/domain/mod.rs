//! Domain model for lane-ordered tasks.
//!
//! A task lives in exactly one lane and carries an integer position within
//! it. The types here hold no infrastructure concerns; sequencing decisions
//! live in [`crate::todo::services`].

mod error;
mod ids;
mod lane;
mod todo;

pub use error::TodoDomainError;
pub use ids::{Position, TodoId};
pub use lane::{LaneKey, LaneShift, ParseShiftPolicyError, ShiftPolicy};
pub use todo::{PersistedTodoData, Todo, TodoFields};
