//! Command implementations
//!
//! Each command returns the lines to print, so it can be checked in tests.

use anyhow::{bail, Context};
use tt_core::config::StorageConfig;
use tt_core::task::{TaskService, TaskView};

use crate::Commands;

fn describe(task: &TaskView) -> String {
    let mark = if task.completed { "x" } else { " " };
    if task.description.is_empty() {
        format!("[{}] {}. {}", mark, task.id, task.title)
    } else {
        format!("[{}] {}. {} - {}", mark, task.id, task.title, task.description)
    }
}

pub async fn run(storage: &StorageConfig, command: &Commands) -> anyhow::Result<Vec<String>> {
    let repo = storage
        .open()
        .await
        .with_context(|| format!("failed to open storage at {}", storage.path().display()))?;
    let service = TaskService::new(repo).await?;

    let output = match command {
        Commands::Add { title, description } => {
            let task = service
                .add_task(Some(title.as_str()), description.as_deref())
                .await?;
            vec![format!("Added task {}: {}", task.id, task.title)]
        }
        Commands::List => {
            let tasks = service.get_all_tasks().await;
            if tasks.is_empty() {
                vec!["No tasks yet.".to_string()]
            } else {
                tasks.iter().map(describe).collect()
            }
        }
        Commands::Complete { id } => match service.complete_task(*id).await? {
            Some(task) => vec![format!("Completed task {}: {}", task.id, task.title)],
            None => bail!("Task {} not found", id),
        },
        Commands::Delete { id } => match service.delete_task(*id).await? {
            Some(task) => vec![format!("Deleted task {}: {}", task.id, task.title)],
            None => bail!("Task {} not found", id),
        },
        Commands::Reset => {
            service.clear_tasks().await?;
            vec!["All tasks deleted.".to_string()]
        }
        Commands::Report => {
            let report = service.report().await;
            vec![
                format!("Total: {}", report.total),
                format!("Completed: {}", report.completed),
                format!("Remaining: {}", report.remaining),
            ]
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tt_core::config::StorageKind;

    fn add(title: &str, description: Option<&str>) -> Commands {
        Commands::Add {
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn add_list_complete_delete_round() {
        for kind in [StorageKind::File, StorageKind::Sqlite] {
            let temp_dir = TempDir::new().unwrap();
            let storage = StorageConfig::in_dir(kind, temp_dir.path());

            let out = run(&storage, &add("Buy milk", None)).await.unwrap();
            assert_eq!(out, vec!["Added task 1: Buy milk"]);
            run(&storage, &add("Call mum", Some("Sunday"))).await.unwrap();

            run(&storage, &Commands::Complete { id: 1 }).await.unwrap();
            let out = run(&storage, &Commands::List).await.unwrap();
            assert_eq!(out, vec!["[x] 1. Buy milk", "[ ] 2. Call mum - Sunday"]);

            let out = run(&storage, &Commands::Report).await.unwrap();
            assert_eq!(out, vec!["Total: 2", "Completed: 1", "Remaining: 1"]);

            run(&storage, &Commands::Delete { id: 1 }).await.unwrap();
            let err = run(&storage, &Commands::Delete { id: 1 }).await.unwrap_err();
            assert_eq!(err.to_string(), "Task 1 not found");

            run(&storage, &Commands::Reset).await.unwrap();
            let out = run(&storage, &Commands::List).await.unwrap();
            assert_eq!(out, vec!["No tasks yet."]);
        }
    }

    #[tokio::test]
    async fn blank_title_fails_validation() {
        let temp_dir = TempDir::new().unwrap();
        let storage = StorageConfig::in_dir(StorageKind::File, temp_dir.path());

        let err = run(&storage, &add("   ", None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
    }

    #[tokio::test]
    async fn completing_missing_task_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage = StorageConfig::in_dir(StorageKind::Sqlite, temp_dir.path());

        let err = run(&storage, &Commands::Complete { id: 7 }).await.unwrap_err();
        assert_eq!(err.to_string(), "Task 7 not found");
    }
}
