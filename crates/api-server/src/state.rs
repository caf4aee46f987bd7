//! Application state

use std::sync::Arc;

use tera::Tera;
use tt_core::history::HistoryService;
use tt_core::task::TaskService;
use tt_core::time::{TimeProvider, TimeService};

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::templates;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_service: TaskService,
    time_provider: Arc<dyn TimeProvider>,
    history: HistoryService,
    templates: Tera,
    testing: bool,
}

impl AppState {
    /// Open storage and build every service from the configuration
    pub async fn new(config: &ServerConfig) -> Result<Self, StartupError> {
        let repo = config.storage.open().await?;
        let task_service = TaskService::new(repo).await?;
        let time_provider = Arc::new(TimeService::new(config.time.clone())?);

        Self::with_services(
            task_service,
            time_provider,
            HistoryService::new(config.history_max),
            config.testing,
        )
    }

    /// Assemble state from already built services
    pub fn with_services(
        task_service: TaskService,
        time_provider: Arc<dyn TimeProvider>,
        history: HistoryService,
        testing: bool,
    ) -> Result<Self, StartupError> {
        Ok(Self {
            inner: Arc::new(AppStateInner {
                task_service,
                time_provider,
                history,
                templates: templates::load()?,
                testing,
            }),
        })
    }

    pub fn task_service(&self) -> &TaskService {
        &self.inner.task_service
    }

    pub fn time_provider(&self) -> &dyn TimeProvider {
        self.inner.time_provider.as_ref()
    }

    pub fn history(&self) -> &HistoryService {
        &self.inner.history
    }

    pub fn templates(&self) -> &Tera {
        &self.inner.templates
    }

    pub fn testing(&self) -> bool {
        self.inner.testing
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use tt_core::config::{StorageConfig, StorageKind};
    use tt_core::time::TimeView;
    use tt_core::Error;

    /// Always answers with the same instant
    pub struct FixedTime;

    #[async_trait]
    impl TimeProvider for FixedTime {
        async fn current_time(&self, timezone: &str) -> tt_core::Result<TimeView> {
            Ok(TimeView {
                utc_datetime: "2025-06-01T12:00:00.000000Z".to_string(),
                timezone: timezone.to_string(),
                source: "Fixed".to_string(),
            })
        }
    }

    /// Fails every lookup
    pub struct BrokenTime;

    #[async_trait]
    impl TimeProvider for BrokenTime {
        async fn current_time(&self, _timezone: &str) -> tt_core::Result<TimeView> {
            Err(Error::Time("provider exploded".to_string()))
        }
    }

    pub async fn build_state_with(
        kind: StorageKind,
        time_provider: Arc<dyn TimeProvider>,
        testing: bool,
    ) -> (AppState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = StorageConfig::in_dir(kind, temp_dir.path())
            .open()
            .await
            .unwrap();
        let task_service = TaskService::new(repo).await.unwrap();
        let state =
            AppState::with_services(task_service, time_provider, HistoryService::default(), testing)
                .unwrap();
        (state, temp_dir)
    }

    pub async fn build_state(kind: StorageKind) -> (AppState, TempDir) {
        build_state_with(kind, Arc::new(FixedTime), true).await
    }

    /// Send one request and decode the JSON body, `Value::Null` if empty
    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, payload)
    }
}
