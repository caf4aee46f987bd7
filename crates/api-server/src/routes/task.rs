//! Task API endpoints
//!
//! JSON API for task CRUD operations.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use tt_core::task::{TaskCreate, TaskId, TaskView};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Path ids that are not integers name no task
fn parse_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| ApiError::TaskNotFound)
}

/// GET /api/tasks - List all tasks in insertion order
async fn list_tasks(State(state): State<AppState>) -> Json<Vec<TaskView>> {
    Json(state.task_service().get_all_tasks().await)
}

/// POST /api/tasks - Create a new task
///
/// The body is read leniently: anything that is not a JSON object is treated
/// as an object without a title.
async fn create_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TaskView>), ApiError> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let input = TaskCreate::from_json(payload.get("title"), payload.get("description"))
        .map_err(ApiError::Validation)?;

    let created = state.task_service().add_validated(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/tasks/{id} - Mark a task completed
async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskView>, ApiError> {
    let id = parse_id(&id)?;
    state
        .task_service()
        .complete_task(id)
        .await?
        .map(Json)
        .ok_or(ApiError::TaskNotFound)
}

/// DELETE /api/tasks/{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    match state.task_service().delete_task(id).await? {
        Some(_) => Ok(Json(MessageResponse {
            message: "Task deleted",
        })),
        None => Err(ApiError::TaskNotFound),
    }
}

/// POST /api/tasks/reset - Remove every task (development and tests)
async fn reset_tasks(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    state.task_service().clear_tasks().await?;
    Ok(Json(MessageResponse {
        message: "Tasks reset successfully",
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/reset", post(reset_tasks))
        .route("/api/tasks/{id}", put(complete_task).delete(delete_task))
}
