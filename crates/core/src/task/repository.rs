//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{Task, TaskId, TaskUpdate};
use crate::Result;

/// Row-level storage for tasks.
///
/// Implementations return tasks in ascending id order. A missing row is
/// reported through `Option`/`bool`, never as an error.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task row
    async fn create(&self, task: Task) -> Result<Task>;

    /// Get a task by ID
    async fn get(&self, id: TaskId) -> Result<Option<Task>>;

    /// Get all tasks
    async fn list(&self) -> Result<Vec<Task>>;

    /// Change some fields of an existing task
    async fn update(&self, id: TaskId, update: TaskUpdate) -> Result<Option<Task>>;

    /// Delete a task by ID
    async fn delete(&self, id: TaskId) -> Result<bool>;

    /// Remove every task
    async fn clear(&self) -> Result<()>;
}
