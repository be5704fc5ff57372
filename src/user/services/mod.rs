//! Application services for the user directory.

mod directory;

pub use directory::{UserService, UserServiceError, UserServiceResult};
