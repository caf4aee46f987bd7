//! Route handlers

pub mod health;
pub mod history;
pub mod task;
pub mod time;
pub mod ui;

use axum::{http::StatusCode, middleware, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ErrorResponse;
use crate::state::AppState;

async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not Found")))
}

/// Assemble the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(task::router())
        .merge(time::router())
        .merge(history::router())
        .merge(ui::router())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            history::track_requests,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
