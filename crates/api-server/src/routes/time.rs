//! Current time endpoint

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TimeQuery {
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Serialize)]
struct TimeErrorResponse {
    error: &'static str,
    details: Option<String>,
}

/// GET /api/time - Current time, never a server error
async fn get_time(State(state): State<AppState>, Query(query): Query<TimeQuery>) -> Response {
    match state.time_provider().current_time(&query.timezone).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => {
            tracing::warn!("Time provider failed: {}", e);
            Json(TimeErrorResponse {
                error: "Unable to fetch time from TimeService.",
                details: state.testing().then(|| e.to_string()),
            })
            .into_response()
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/time", get(get_time))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;
    use tt_core::config::StorageKind;

    use crate::state::test_support::{build_state, build_state_with, send, BrokenTime};

    #[tokio::test]
    async fn returns_provider_time() {
        let (state, _temp_dir) = build_state(StorageKind::File).await;
        let app = super::router().with_state(state);

        let (status, body) = send(&app, "GET", "/api/time", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "utc_datetime": "2025-06-01T12:00:00.000000Z",
                "timezone": "UTC",
                "source": "Fixed"
            })
        );

        let (_, body) = send(&app, "GET", "/api/time?timezone=Eastern", None).await;
        assert_eq!(body["timezone"], "Eastern");
    }

    #[tokio::test]
    async fn broken_provider_degrades_gracefully() {
        let (state, _temp_dir) =
            build_state_with(StorageKind::File, Arc::new(BrokenTime), true).await;
        let app = super::router().with_state(state);

        let (status, body) = send(&app, "GET", "/api/time", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Unable to fetch time from TimeService.");
        assert!(body["details"].as_str().unwrap().contains("provider exploded"));
    }

    #[tokio::test]
    async fn error_details_hidden_outside_testing() {
        let (state, _temp_dir) =
            build_state_with(StorageKind::File, Arc::new(BrokenTime), false).await;
        let app = super::router().with_state(state);

        let (status, body) = send(&app, "GET", "/api/time", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["details"], json!(null));
    }
}
