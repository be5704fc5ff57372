//! Lane-ordered task tracking.
//!
//! Every task belongs to one lane and holds an integer position in it. This
//! module assigns positions on creation, re-sequences a lane when a task is
//! moved explicitly, and freezes positions on soft deletion:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
