//! Request history endpoints and the middleware feeding them

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tt_core::history::{HistoryEntry, HistoryStats};

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ClearedResponse {
    message: &'static str,
}

/// Record method, path, status and latency of every request
pub async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let endpoint = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    state
        .history()
        .add_request(method, endpoint, Some(response.status().as_u16()), Some(elapsed_ms))
        .await;
    response
}

/// GET /api/history - Recent requests, newest first
async fn list_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history().get_history().await)
}

/// GET /api/history/stats
async fn history_stats(State(state): State<AppState>) -> Json<HistoryStats> {
    Json(state.history().get_stats().await)
}

/// DELETE /api/history
async fn clear_history(State(state): State<AppState>) -> Json<ClearedResponse> {
    state.history().clear_history().await;
    Json(ClearedResponse {
        message: "History cleared",
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/history", get(list_history).delete(clear_history))
        .route("/api/history/stats", get(history_stats))
}
