//! Handlers for the `/to-do` routes.

use super::{ApiResult, AppState, envelope::ApiEnvelope, error::ApiErrorResponse};
use crate::todo::{
    domain::{Todo, TodoId},
    services::{ChangePositionRequest, TodoRequest},
};
use axum::{
    Form, Json,
    extract::{Path, State},
};
use serde::Deserialize;

/// Form fields of the create and update routes. Missing fields read as
/// empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TodoForm {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub desc: String,
    /// Owning user id, as text.
    pub user_id: String,
    /// Lane label.
    pub status: String,
}

impl From<TodoForm> for TodoRequest {
    fn from(form: TodoForm) -> Self {
        Self::new(form.title, form.desc, form.user_id, form.status)
    }
}

/// Form fields of the change-order route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChangeOrderForm {
    /// Target position, as text.
    pub order_id: String,
}

/// A malformed id can never name a record, so it resolves to 404.
fn parse_todo_id(raw: &str) -> Result<TodoId, ApiErrorResponse> {
    raw.parse::<TodoId>()
        .map_err(|_| ApiErrorResponse::not_found(raw))
}

/// `GET /to-do/`
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Vec<Todo>> {
    let todos = state.todos.list().await?;
    Ok(Json(ApiEnvelope::ok("fetched all tasks", todos)))
}

/// `GET /to-do/{id}`
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Todo> {
    let todo = state.todos.get(parse_todo_id(&id)?).await?;
    Ok(Json(ApiEnvelope::ok("fetched task", todo)))
}

/// `POST /to-do/`
pub async fn create_todo(
    State(state): State<AppState>,
    Form(form): Form<TodoForm>,
) -> ApiResult<Todo> {
    let todo = state.todos.create(form.into()).await?;
    Ok(Json(ApiEnvelope::ok("created task", todo)))
}

/// `POST /to-do/{id}`
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<TodoForm>,
) -> ApiResult<Todo> {
    let todo_id = parse_todo_id(&id)?;
    let todo = state.todos.update(todo_id, form.into()).await?;
    Ok(Json(ApiEnvelope::ok("updated task", todo)))
}

/// `POST /to-do/{id}/change-order-id`
pub async fn change_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ChangeOrderForm>,
) -> ApiResult<Todo> {
    let todo_id = parse_todo_id(&id)?;
    let todo = state
        .todos
        .change_position(ChangePositionRequest::new(todo_id, form.order_id))
        .await?;
    Ok(Json(ApiEnvelope::ok("changed task position", todo)))
}

/// `DELETE /to-do/{id}`
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Todo> {
    let todo = state.todos.remove(parse_todo_id(&id)?).await?;
    Ok(Json(ApiEnvelope::ok("removed task", todo)))
}
