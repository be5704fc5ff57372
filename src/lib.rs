//! Todolane: a to-do backend that keeps tasks ordered within status lanes.
//!
//! Tasks join the tail of their lane, can be moved to an explicit position
//! (shifting their siblings down in one atomic step) and are soft-deleted
//! without renumbering the lane.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`todo`]: Lane-ordered tasks and position management
//! - [`user`]: Users referenced as task owners
//! - [`http`]: Form-encoded JSON API over both services
//! - [`config`]: Environment-driven runtime configuration
//! - [`persistence`]: Connection pool and schema bootstrap

pub mod config;
pub mod http;
pub mod persistence;
pub mod todo;
pub mod user;
