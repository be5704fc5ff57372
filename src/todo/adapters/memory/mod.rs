//! In-memory adapters for task storage.

mod todo;

pub use todo::InMemoryTodoRepository;
