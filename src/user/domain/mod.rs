//! Domain model for the user directory.

mod error;
mod ids;
mod user;

pub use error::UserDomainError;
pub use ids::UserId;
pub use user::{PersistedUserData, User, UserProfile};
