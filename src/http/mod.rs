//! HTTP surface.
//!
//! Routes live under `/api/v1` and accept form-encoded bodies. Every
//! response is a JSON envelope carrying the affected record.

mod envelope;
mod error;
mod todos;
mod users;

pub use envelope::{ApiEnvelope, ApiErrorBody};
pub use error::{ApiErrorResponse, NOT_FOUND_MESSAGE};
pub use todos::{ChangeOrderForm, TodoForm};
pub use users::UserForm;

use crate::todo::{domain::ShiftPolicy, ports::TodoRepository, services::TodoService};
use crate::user::{ports::UserDirectory, services::UserService};
use axum::{
    Json, Router,
    routing::{get, post},
};
use mockable::DefaultClock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Task service as held by the router.
pub type SharedTodoService = TodoService<dyn TodoRepository, DefaultClock>;

/// User service as held by the router.
pub type SharedUserService = UserService<dyn UserDirectory, DefaultClock>;

/// Result type of every handler.
pub type ApiResult<T> = Result<Json<ApiEnvelope<T>>, ApiErrorResponse>;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Task operations.
    pub todos: SharedTodoService,
    /// User operations.
    pub users: SharedUserService,
}

impl AppState {
    /// Bundles the two services.
    #[must_use]
    pub const fn new(todos: SharedTodoService, users: SharedUserService) -> Self {
        Self { todos, users }
    }

    /// Builds both services over the given storage with the system clock.
    #[must_use]
    pub fn from_storage(
        todos: Arc<dyn TodoRepository>,
        users: Arc<dyn UserDirectory>,
        policy: ShiftPolicy,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            todos: TodoService::with_policy(todos, Arc::clone(&clock), policy),
            users: UserService::new(users, clock),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/user/", get(users::list_users).post(users::create_user))
        .route(
            "/user/{id}",
            get(users::get_user)
                .post(users::update_user)
                .delete(users::delete_user),
        )
        .route("/to-do/", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/to-do/{id}",
            get(todos::get_todo)
                .post(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route("/to-do/{id}/change-order-id", post(todos::change_order));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[expect(clippy::unused_async, reason = "axum handlers must be async")]
async fn health() -> Json<ApiEnvelope<()>> {
    Json(ApiEnvelope::ok("healthy", ()))
}
