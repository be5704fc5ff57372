//! User directory.
//!
//! Users are referenced by task owners but are never touched by the lane
//! ordering logic. The module mirrors the layout of [`crate::todo`]:
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
