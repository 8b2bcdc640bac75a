//! Todo CRUD handlers. Unknown ids on update and delete are silent no-ops.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use focus_store::{normalize_title, Todo};

use crate::dto::{parse_json_body, CreateTodoRequest, SuccessResponse};
use crate::error::AppError;
use crate::ServerState;

/// GET /api/todos - All todos, newest first.
pub async fn list(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = state.store.list()?;
    Ok(Json(todos))
}

/// POST /api/todos - Create a todo from `{ "title": ... }`.
pub async fn create(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<Todo>, AppError> {
    let req: CreateTodoRequest = parse_json_body(&body)?;
    let title = req
        .title
        .as_deref()
        .and_then(normalize_title)
        .ok_or_else(|| AppError::BadRequest("Title is required".into()))?;

    let todo = state.store.create(&title)?;
    Ok(Json(todo))
}

/// PUT /api/todos/:id/done
pub async fn mark_done(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.set_done(id, true)?;
    Ok(Json(SuccessResponse::ok()))
}

/// PUT /api/todos/:id/undone
pub async fn mark_undone(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.set_done(id, false)?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/todos/:id
pub async fn delete(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.delete(id)?;
    Ok(Json(SuccessResponse::ok()))
}
