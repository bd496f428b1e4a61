//! Handlers for `/api/todos`.
//!
//! Each handler validates its input, makes exactly one store call, and maps
//! the outcome to a status. Store failures on list and delete are server
//! errors; on the write paths they are client errors.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::config::NotFoundMode;
use crate::error::ServiceError;
use crate::model::{CreateTodo, Message, Todo, ToggleTodo, UpdateTodo};
use crate::AppState;

pub const DELETED_MESSAGE: &str = "Todo deleted successfully";

type Payload<T> = Result<Json<T>, JsonRejection>;
type TodoId = Result<Path<Uuid>, PathRejection>;

fn require_title(title: &str) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::BadRequest("title must not be empty".to_string()));
    }
    Ok(())
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ServiceError> {
    let todos = state.store.list().await.map_err(ServiceError::internal)?;
    tracing::debug!(count = todos.len(), "listed todos");
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Payload<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ServiceError> {
    let Json(input) = payload?;
    require_title(&input.title)?;
    let todo = state.store.insert(input).await.map_err(ServiceError::rejected)?;
    tracing::info!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn replace_todo(
    State(state): State<AppState>,
    id: TodoId,
    payload: Payload<UpdateTodo>,
) -> Result<Json<Option<Todo>>, ServiceError> {
    let Path(id) = id?;
    let Json(changes) = payload?;
    if let Some(title) = &changes.title {
        require_title(title)?;
    }
    apply_update(&state, id, changes).await
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    id: TodoId,
    payload: Payload<ToggleTodo>,
) -> Result<Json<Option<Todo>>, ServiceError> {
    let Path(id) = id?;
    let Json(toggle) = payload?;
    apply_update(&state, id, toggle.into()).await
}

async fn apply_update(
    state: &AppState,
    id: Uuid,
    changes: UpdateTodo,
) -> Result<Json<Option<Todo>>, ServiceError> {
    let updated = state
        .store
        .update(id, changes)
        .await
        .map_err(ServiceError::rejected)?;
    match (updated, state.not_found) {
        (Some(todo), _) => {
            tracing::info!(%id, completed = todo.completed, "updated todo");
            Ok(Json(Some(todo)))
        }
        (None, NotFoundMode::Status) => Err(ServiceError::NotFound),
        (None, NotFoundMode::Null) => {
            tracing::debug!(%id, "update matched no todo");
            Ok(Json(None))
        }
    }
}

pub async fn delete_todo(
    State(state): State<AppState>,
    id: TodoId,
) -> Result<Json<Message>, ServiceError> {
    let Path(id) = id?;
    let removed = state.store.delete(id).await.map_err(ServiceError::internal)?;
    if removed.is_some() {
        tracing::info!(%id, "deleted todo");
    } else {
        tracing::debug!(%id, "delete matched no todo");
    }
    Ok(Json(Message::new(DELETED_MESSAGE)))
}
