//! File-based task storage implementation
//!
//! Stores the whole task list as one JSON array. Each row-level operation
//! loads the file, changes the list and writes it back.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{error, warn};

use super::model::{Task, TaskId, TaskUpdate};
use super::repository::TaskRepository;
use crate::{Error, Result};

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// Serialises load-modify-save sequences within this process
    write_lock: Mutex<()>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every task from disk.
    ///
    /// A missing, unreadable or corrupt file yields an empty list.
    pub async fn load_tasks(&self) -> Vec<Task> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Failed to read tasks file {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(
                    "Ignoring malformed tasks file {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Read every task from disk, failing on anything but a missing file.
    ///
    /// Used before rewriting the file, so an unreadable file is never
    /// replaced by a partial list.
    pub async fn read_tasks(&self) -> Result<Vec<Task>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrite the file with the given tasks
    pub async fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.write(tasks).await.inspect_err(|e| {
            error!("Failed to save tasks to {}: {}", self.path.display(), e);
        })
    }

    async fn write(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string_pretty(tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write next to the target and rename, so readers never see half a file
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn create(&self, task: Task) -> Result<Task> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.read_tasks().await?;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(Error::Storage(format!(
                "Task with ID {} already exists",
                task.id
            )));
        }
        tasks.push(task.clone());
        self.save_tasks(&tasks).await?;
        Ok(task)
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let tasks = self.load_tasks().await;
        Ok(tasks.into_iter().find(|t| t.id == id))
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let mut tasks = self.load_tasks().await;
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    async fn update(&self, id: TaskId, update: TaskUpdate) -> Result<Option<Task>> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.read_tasks().await?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.apply(&update);
        let updated = task.clone();
        self.save_tasks(&tasks).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: TaskId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.read_tasks().await?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        let removed = tasks.len() != before;
        if removed {
            self.save_tasks(&tasks).await?;
        }
        Ok(removed)
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.save_tasks(&[]).await
    }
}
