//! Port contracts for lane-ordered task storage.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{LaneMoveOutcome, TodoRepository, TodoRepositoryError, TodoRepositoryResult};
