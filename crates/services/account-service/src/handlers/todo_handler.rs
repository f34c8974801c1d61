//! Todo handlers.
//!
//! Create and update take form-urlencoded bodies, which is what the todo
//! page posts when it intercepts its own form submission.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{de, Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::Todo;

use crate::extractors::ValidatedForm;
use crate::state::AppState;

/// Todo form fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TodoParams {
    /// Surrounding whitespace is stripped before validation
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Description can't be blank"))]
    #[schema(example = "milk")]
    pub description: String,
    /// Missing or blank means 0
    #[serde(default, deserialize_with = "blank_as_zero")]
    #[schema(example = 1)]
    pub priority: i32,
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

fn blank_as_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "" => Ok(0),
        value => value.parse().map_err(de::Error::custom),
    }
}

/// Create todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/:id",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todos",
    responses(
        (status = 200, description = "Todos, highest priority first", body = Vec<Todo>)
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> AppResult<Json<Vec<Todo>>> {
    Ok(Json(state.todos.list_todos().await?))
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todos",
    request_body(content = TodoParams, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedForm(params): ValidatedForm<TodoParams>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    let todo = state
        .todos
        .create_todo(params.description, params.priority)
        .await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "Todos",
    params(
        ("id" = i32, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo", body = Todo),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn get_todo(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Todo>> {
    Ok(Json(state.todos.get_todo(id).await?))
}

#[utoipa::path(
    patch,
    path = "/todos/{id}",
    tag = "Todos",
    params(
        ("id" = i32, Path, description = "Todo ID")
    ),
    request_body(content = TodoParams, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedForm(params): ValidatedForm<TodoParams>,
) -> AppResult<Json<Todo>> {
    let todo = state
        .todos
        .update_todo(id, params.description, params.priority)
        .await?;
    Ok(Json(todo))
}

#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "Todos",
    params(
        ("id" = i32, Path, description = "Todo ID")
    ),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "Todo not found")
    )
)]
pub async fn delete_todo(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.todos.delete_todo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
