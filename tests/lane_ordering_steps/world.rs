//! Shared world state for lane ordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use todolane::todo::{
    adapters::memory::InMemoryTodoRepository,
    domain::Todo,
    ports::TodoRepository,
    services::{TodoRequest, TodoService, TodoServiceError},
};

/// Service type used by the BDD world.
pub type TestTodoService = TodoService<InMemoryTodoRepository, DefaultClock>;

/// Scenario world for lane ordering behaviour tests.
pub struct LaneOrderingWorld {
    pub repository: Arc<InMemoryTodoRepository>,
    pub service: TestTodoService,
    pub tasks: HashMap<String, Todo>,
    pub last_move_result: Option<Result<Todo, TodoServiceError>>,
}

impl LaneOrderingWorld {
    /// Creates a world over an empty board.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTodoRepository::new());
        let service = TodoService::new(Arc::clone(&repository), Arc::new(DefaultClock));

        Self {
            repository,
            service,
            tasks: HashMap::new(),
            last_move_result: None,
        }
    }

    /// Creates a task named `title` in `lane` and remembers it.
    pub fn create(&mut self, title: &str, lane: &str) -> Result<(), eyre::Report> {
        let created = run_async(
            self.service
                .create(TodoRequest::new(title, "", "1", lane)),
        )?;
        self.tasks.insert(title.to_owned(), created);
        Ok(())
    }

    /// Returns the remembered task named `title`.
    pub fn task(&self, title: &str) -> Result<&Todo, eyre::Report> {
        self.tasks
            .get(title)
            .ok_or_else(|| eyre::eyre!("task {title} was never created in this scenario"))
    }

    /// Reloads the task named `title` from the store, including removed tasks.
    pub fn reload(&self, title: &str) -> Result<Todo, eyre::Report> {
        let id = self.task(title)?.id();
        run_async(self.repository.find_by_id(id))?
            .ok_or_else(|| eyre::eyre!("task {title} is missing from the store"))
    }
}

impl Default for LaneOrderingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LaneOrderingWorld {
    LaneOrderingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
