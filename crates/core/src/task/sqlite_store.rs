//! SQLite task storage implementation
//!
//! One row per task in the `tasks` table. Every operation opens its own
//! connection on a blocking thread and closes it before returning.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::model::{Task, TaskId, TaskUpdate};
use super::repository::TaskRepository;
use crate::{Error, Result};

const SELECT_COLUMNS: &str = "SELECT id, title, description, completed, created_at FROM tasks";

/// Task store backed by a SQLite database file
pub struct SqliteTaskStore {
    db_path: PathBuf,
}

impl SqliteTaskStore {
    /// Open the database at `db_path`, creating the file and table if needed
    pub async fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            db_path: db_path.into(),
        };
        store.with_connection(|conn| init_schema(conn)).await?;
        debug!("SQLite task store ready at {}", store.db_path.display());
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run `f` against a fresh connection on the blocking pool
    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = open(&db_path)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| Error::Storage(format!("SQLite worker failed: {}", e)))?
    }
}

fn open(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT
        );
        ",
    )?;
    Ok(())
}

fn parse_task(row: &Row) -> rusqlite::Result<Task> {
    let description: Option<String> = row.get(2)?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: description.unwrap_or_default(),
        completed: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn select_by_id(conn: &Connection, id: TaskId) -> Result<Option<Task>> {
    let task = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id],
            parse_task,
        )
        .optional()?;
    Ok(task)
}

#[async_trait]
impl TaskRepository for SqliteTaskStore {
    async fn create(&self, task: Task) -> Result<Task> {
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO tasks (id, title, description, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    task.id,
                    task.title,
                    task.description,
                    task.completed,
                    task.created_at
                ],
            )?;
            Ok(task)
        })
        .await
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        self.with_connection(move |conn| select_by_id(conn, id)).await
    }

    async fn list(&self) -> Result<Vec<Task>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
            let tasks = stmt
                .query_map([], parse_task)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
        .await
    }

    async fn update(&self, id: TaskId, update: TaskUpdate) -> Result<Option<Task>> {
        self.with_connection(move |conn| {
            let tx = conn.transaction()?;
            let Some(mut task) = select_by_id(&tx, id)? else {
                return Ok(None);
            };
            task.apply(&update);
            tx.execute(
                "UPDATE tasks SET title = ?2, description = ?3, completed = ?4 WHERE id = ?1",
                params![task.id, task.title, task.description, task.completed],
            )?;
            tx.commit()?;
            Ok(Some(task))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> Result<bool> {
        self.with_connection(move |conn| {
            let rows = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            Ok(rows > 0)
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM tasks", [])?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (SqliteTaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteTaskStore::new(temp_dir.path().join("tasks.db"))
            .await
            .unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_new_creates_database_file() {
        let (store, _temp) = create_test_store().await;
        assert!(store.db_path().exists());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_get_task() {
        let (store, _temp) = create_test_store().await;

        let task = Task::new(1, "Test task", "A test description").with_created_now();
        store.create(task.clone()).await.unwrap();

        assert_eq!(store.get(1).await.unwrap(), Some(task));
        assert!(store.get(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let (store, _temp) = create_test_store().await;
        store.create(Task::new(1, "First", "")).await.unwrap();

        let result = store.create(Task::new(1, "Again", "")).await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn test_null_description_reads_as_empty() {
        let (store, _temp) = create_test_store().await;
        store
            .with_connection(|conn| {
                conn.execute("INSERT INTO tasks (id, title) VALUES (5, 'Legacy')", [])?;
                Ok(())
            })
            .await
            .unwrap();

        let task = store.get(5).await.unwrap().unwrap();
        assert_eq!(task.description, "");
        assert!(!task.completed);
        assert!(task.created_at.is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let (store, _temp) = create_test_store().await;
        for (id, title) in [(2, "Beta"), (1, "Alpha"), (3, "Gamma")] {
            store.create(Task::new(id, title, "")).await.unwrap();
        }

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[tokio::test]
    async fn test_update_fields() {
        let (store, _temp) = create_test_store().await;
        store.create(Task::new(1, "Original", "")).await.unwrap();

        let updated = store
            .update(
                1,
                TaskUpdate {
                    description: Some("Now described".to_string()),
                    ..TaskUpdate::completed()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.description, "Now described");

        let stored = store.get(1).await.unwrap().unwrap();
        assert_eq!(stored, updated);

        assert!(store.update(9, TaskUpdate::completed()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let (store, _temp) = create_test_store().await;
        store.create(Task::new(1, "One", "")).await.unwrap();
        store.create(Task::new(2, "Two", "")).await.unwrap();

        assert!(store.delete(1).await.unwrap());
        assert!(!store.delete(1).await.unwrap());

        store.clear().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.db");

        {
            let store = SqliteTaskStore::new(&path).await.unwrap();
            store.create(Task::new(1, "Survivor", "")).await.unwrap();
        }

        let store = SqliteTaskStore::new(&path).await.unwrap();
        assert_eq!(store.get(1).await.unwrap().unwrap().title, "Survivor");
    }
}
