//! Server-rendered web UI
//!
//! Form posts follow post-redirect-get: every successful mutation answers
//! with a redirect to the task list.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tera::Context;

use tt_core::task::{TaskCreate, TaskId};
use tt_core::time::TIMEZONES;

use crate::error::ApiError;
use crate::routes::time::TimeQuery;
use crate::state::AppState;
use crate::templates::render;

#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn form_page(
    state: &AppState,
    error: Option<String>,
    form: &TaskForm,
) -> Result<Html<String>, ApiError> {
    let mut context = Context::new();
    context.insert("error", &error);
    context.insert("title", &form.title.as_deref().unwrap_or_default());
    context.insert("description", &form.description.as_deref().unwrap_or_default());
    render(state.templates(), "add_task.html", &context)
}

/// GET /
async fn home() -> Redirect {
    Redirect::to("/tasks/new")
}

/// GET /tasks/new
async fn new_task_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    form_page(&state, None, &TaskForm::default())
}

/// POST /tasks/new
async fn submit_task(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Response, ApiError> {
    let input = match TaskCreate::new(form.title.as_deref(), form.description.as_deref()) {
        Ok(input) => input,
        Err(e) => return Ok(form_page(&state, Some(e.message), &form)?.into_response()),
    };

    match state.task_service().add_validated(input).await {
        Ok(_) => Ok(Redirect::to("/tasks").into_response()),
        Err(e) => {
            tracing::error!("Failed to create task from form: {}", e);
            let message = "Error creating task. Please try again.".to_string();
            Ok(form_page(&state, Some(message), &form)?.into_response())
        }
    }
}

/// GET /tasks
async fn show_tasks(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let mut context = Context::new();
    context.insert("tasks", &state.task_service().get_all_tasks().await);
    render(state.templates(), "task_list.html", &context)
}

/// POST /tasks/{id}/complete
async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let Ok(id) = id.parse::<TaskId>() else {
        tracing::debug!("Ignoring completion of non-numeric task id {:?}", id);
        return Ok(Redirect::to("/tasks"));
    };
    if state.task_service().complete_task(id).await?.is_none() {
        tracing::debug!("Ignoring completion of missing task {}", id);
    }
    Ok(Redirect::to("/tasks"))
}

/// POST /tasks/{id}/delete
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let Ok(id) = id.parse::<TaskId>() else {
        tracing::debug!("Ignoring deletion of non-numeric task id {:?}", id);
        return Ok(Redirect::to("/tasks"));
    };
    if state.task_service().delete_task(id).await?.is_none() {
        tracing::debug!("Ignoring deletion of missing task {}", id);
    }
    Ok(Redirect::to("/tasks"))
}

/// GET /tasks/report
async fn task_report(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let report = state.task_service().report().await;
    let context = Context::from_serialize(report)?;
    render(state.templates(), "report.html", &context)
}

/// GET /time
async fn show_time(
    State(state): State<AppState>,
    Query(query): Query<TimeQuery>,
) -> Result<Html<String>, ApiError> {
    let mut context = Context::new();
    match state.time_provider().current_time(&query.timezone).await {
        Ok(view) => {
            context.insert("time", &view);
            context.insert("error", &Option::<String>::None);
        }
        Err(e) => {
            tracing::warn!("Time provider failed: {}", e);
            context.insert("error", "Unable to fetch time from external API.");
        }
    }
    let zones: Vec<&str> = TIMEZONES.iter().map(|(name, _)| *name).collect();
    context.insert("timezones", &zones);
    render(state.templates(), "time_view.html", &context)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/tasks/new", get(new_task_form).post(submit_task))
        .route("/tasks", get(show_tasks))
        .route("/tasks/report", get(task_report))
        .route("/tasks/{id}/complete", post(complete_task))
        .route("/tasks/{id}/delete", post(delete_task))
        .route("/time", get(show_time))
}
