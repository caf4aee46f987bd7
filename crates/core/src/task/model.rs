//! Task model definitions

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Task identifier, assigned by the service
pub type TaskId = i64;

/// A task tracked by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
            created_at: None,
        }
    }

    /// Stamp the task with the current UTC time
    pub fn with_created_now(mut self) -> Self {
        self.created_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }

    /// Mark this task as completed
    pub fn mark_complete(&mut self) {
        self.completed = true;
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
    }

    pub fn view(&self) -> TaskView {
        TaskView::from(self)
    }
}

/// Wire representation of a task handed out to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: task.created_at.clone(),
        }
    }
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            completed: task.completed,
            created_at: task.created_at,
        }
    }
}

/// Field changes for a targeted row update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TaskUpdate {
    pub fn completed() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }
}

/// Completion totals for the report page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl TaskReport {
    pub fn from_views(tasks: &[TaskView]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total,
            completed,
            remaining: total - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task() {
        let task = Task::new(1, "Test task", "");
        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Test task");
        assert_eq!(task.description, "");
        assert!(!task.completed);
        assert!(task.created_at.is_none());
    }

    #[test]
    fn test_mark_complete_is_idempotent() {
        let mut task = Task::new(1, "Test task", "");
        task.mark_complete();
        task.mark_complete();
        assert!(task.completed);
    }

    #[test]
    fn test_view_omits_missing_created_at() {
        let task = Task::new(3, "Write report", "Quarterly");
        let json = serde_json::to_value(task.view()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "title": "Write report",
                "description": "Quarterly",
                "completed": false
            })
        );
    }

    #[test]
    fn test_view_includes_created_at_when_set() {
        let task = Task::new(1, "Test task", "").with_created_now();
        let json = serde_json::to_value(task.view()).unwrap();
        assert!(json["created_at"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_legacy_record_without_optional_fields() {
        let task: Task = serde_json::from_str(r#"{"id": 7, "title": "Old"}"#).unwrap();
        assert_eq!(task.description, "");
        assert!(!task.completed);
    }

    #[test]
    fn test_apply_update() {
        let mut task = Task::new(1, "Before", "");
        task.apply(&TaskUpdate {
            title: Some("After".to_string()),
            ..TaskUpdate::completed()
        });
        assert_eq!(task.title, "After");
        assert!(task.completed);
        assert_eq!(task.description, "");
    }

    #[test]
    fn test_report_counts() {
        let mut done = Task::new(2, "Done", "");
        done.mark_complete();
        let views = vec![Task::new(1, "Open", "").view(), done.view()];

        let report = TaskReport::from_views(&views);
        assert_eq!(report, TaskReport { total: 2, completed: 1, remaining: 1 });
    }
}
