//! Task service
//!
//! Owns the authoritative, insertion-ordered list of tasks. The repository is
//! a downstream mirror: it is read once on construction and every mutation is
//! pushed to it before the in-memory list changes.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::model::{Task, TaskId, TaskReport, TaskUpdate, TaskView};
use super::repository::TaskRepository;
use super::schema::TaskCreate;
use crate::{Error, Result};

pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
    tasks: Mutex<Vec<Task>>,
}

impl TaskService {
    /// Build the service and pull the stored tasks into memory
    pub async fn new(repo: Arc<dyn TaskRepository>) -> Result<Self> {
        let tasks = repo.list().await?;
        info!("Loaded {} task(s) from storage", tasks.len());
        Ok(Self {
            repo,
            tasks: Mutex::new(tasks),
        })
    }

    pub async fn get_all_tasks(&self) -> Vec<TaskView> {
        self.tasks.lock().await.iter().map(Task::view).collect()
    }

    pub async fn get_task(&self, id: TaskId) -> Option<TaskView> {
        self.tasks
            .lock()
            .await
            .iter()
            .find(|t| t.id == id)
            .map(Task::view)
    }

    /// Validate the input and add a task with the next id
    pub async fn add_task(
        &self,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<TaskView> {
        let input = TaskCreate::new(title, description)?;
        self.add_validated(input).await
    }

    /// Add a task from input that already passed validation
    pub async fn add_validated(&self, input: TaskCreate) -> Result<TaskView> {
        let mut tasks = self.tasks.lock().await;
        let next_id = tasks
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| Error::Storage("task id space exhausted".to_string()))?;
        let task = Task::new(next_id, input.title, input.description).with_created_now();

        let stored = self.repo.create(task).await?;
        debug!("Added task {}", stored.id);
        let view = stored.view();
        tasks.push(stored);
        Ok(view)
    }

    /// Mark a task completed. Completing it again is a no-op success.
    pub async fn complete_task(&self, id: TaskId) -> Result<Option<TaskView>> {
        let mut tasks = self.tasks.lock().await;
        let Some(index) = tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let mut updated = tasks[index].clone();
        updated.mark_complete();

        if self.repo.update(id, TaskUpdate::completed()).await?.is_none() {
            warn!("Task {} missing from storage, writing it back", id);
            self.repo.create(updated.clone()).await?;
        }

        let view = updated.view();
        tasks[index] = updated;
        Ok(Some(view))
    }

    /// Remove a task, returning what was removed
    pub async fn delete_task(&self, id: TaskId) -> Result<Option<TaskView>> {
        let mut tasks = self.tasks.lock().await;
        let Some(index) = tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        if !self.repo.delete(id).await? {
            warn!("Task {} was already missing from storage", id);
        }

        let removed = tasks.remove(index);
        debug!("Deleted task {}", id);
        Ok(Some(removed.into()))
    }

    /// Drop every task, in memory and in storage
    pub async fn clear_tasks(&self) -> Result<()> {
        let mut tasks = self.tasks.lock().await;
        self.repo.clear().await?;
        tasks.clear();
        info!("Cleared all tasks");
        Ok(())
    }

    pub async fn report(&self) -> TaskReport {
        TaskReport::from_views(&self.get_all_tasks().await)
    }
}
