//! Storage configuration
//!
//! Chooses and opens the repository a [`TaskService`](crate::task::TaskService)
//! is built on.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::task::{FileTaskStore, SqliteTaskStore, TaskRepository};
use crate::{Error, Result};

pub const JSON_FILE_NAME: &str = "tasks.json";
pub const SQLITE_FILE_NAME: &str = "tasks.db";

/// Storage backend kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    File,
    #[default]
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "sqlite" | "db" | "database" => Ok(Self::Sqlite),
            other => Err(Error::Config(format!("Unknown storage backend: {}", other))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Where and how tasks are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    File { path: PathBuf },
    Sqlite { path: PathBuf },
}

impl StorageConfig {
    /// Use the conventional file name for `kind` inside `dir`
    pub fn in_dir(kind: StorageKind, dir: &Path) -> Self {
        match kind {
            StorageKind::File => Self::File {
                path: dir.join(JSON_FILE_NAME),
            },
            StorageKind::Sqlite => Self::Sqlite {
                path: dir.join(SQLITE_FILE_NAME),
            },
        }
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            Self::File { .. } => StorageKind::File,
            Self::Sqlite { .. } => StorageKind::Sqlite,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::File { path } | Self::Sqlite { path } => path,
        }
    }

    /// Open the configured repository
    pub async fn open(&self) -> Result<Arc<dyn TaskRepository>> {
        info!("Opening {} task storage at {}", self.kind(), self.path().display());
        let repo: Arc<dyn TaskRepository> = match self {
            Self::File { path } => Arc::new(FileTaskStore::new(path.clone())),
            Self::Sqlite { path } => Arc::new(SqliteTaskStore::new(path.clone()).await?),
        };
        Ok(repo)
    }
}
