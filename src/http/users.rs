//! Handlers for the `/user` routes.

use super::{ApiResult, AppState, envelope::ApiEnvelope, error::ApiErrorResponse};
use crate::user::domain::{User, UserId, UserProfile};
use axum::{
    Form, Json,
    extract::{Path, State},
};
use serde::Deserialize;

/// Form fields of the user create and update routes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    /// Display name.
    pub name: String,
    /// Job title.
    pub position: String,
}

impl From<UserForm> for UserProfile {
    fn from(form: UserForm) -> Self {
        Self::new(form.name, form.position)
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiErrorResponse> {
    raw.parse::<UserId>()
        .map_err(|_| ApiErrorResponse::not_found(raw))
}

/// `GET /user/`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.users.list().await?;
    Ok(Json(ApiEnvelope::ok("fetched all users", users)))
}

/// `GET /user/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<User> {
    let user = state.users.get(parse_user_id(&id)?).await?;
    Ok(Json(ApiEnvelope::ok("fetched user", user)))
}

/// `POST /user/`
pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<UserForm>,
) -> ApiResult<User> {
    let user = state.users.create(form.into()).await?;
    Ok(Json(ApiEnvelope::ok("created user", user)))
}

/// `POST /user/{id}`
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UserForm>,
) -> ApiResult<User> {
    let user_id = parse_user_id(&id)?;
    let user = state.users.update(user_id, form.into()).await?;
    Ok(Json(ApiEnvelope::ok("updated user", user)))
}

/// `DELETE /user/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<User> {
    let user = state.users.remove(parse_user_id(&id)?).await?;
    Ok(Json(ApiEnvelope::ok("removed user", user)))
}
