//! Command line front end for the task tracker
//!
//! Usage:
//!   tasks [--storage file|sqlite] [--path <file>] <command>

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tt_core::config::{StorageConfig, StorageKind};
use tt_core::task::TaskId;

#[derive(Parser)]
#[command(name = "tasks")]
#[command(about = "Manage tasks from the terminal")]
struct Cli {
    /// Storage backend
    #[arg(long, value_enum, default_value_t = Backend::Sqlite)]
    storage: Backend,

    /// Storage file; defaults to tasks.db or tasks.json in the current directory
    #[arg(long)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    File,
    Sqlite,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Add a task
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List all tasks
    List,
    /// Mark a task completed
    Complete { id: TaskId },
    /// Delete a task
    Delete { id: TaskId },
    /// Delete every task
    Reset,
    /// Show completion totals
    Report,
}

impl Cli {
    fn storage_config(&self) -> StorageConfig {
        let kind = match self.storage {
            Backend::File => StorageKind::File,
            Backend::Sqlite => StorageKind::Sqlite,
        };
        match &self.path {
            Some(path) if kind == StorageKind::File => StorageConfig::File { path: path.clone() },
            Some(path) => StorageConfig::Sqlite { path: path.clone() },
            None => StorageConfig::in_dir(kind, &PathBuf::from(".")),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let output = commands::run(&cli.storage_config(), &cli.command).await?;
    for line in output {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_description() {
        let cli = Cli::try_parse_from(["tasks", "add", "Buy milk", "-d", "2 litres"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Add {
                title: "Buy milk".to_string(),
                description: Some("2 litres".to_string()),
            }
        );
        assert_eq!(cli.storage, Backend::Sqlite);
    }

    #[test]
    fn storage_flags_select_backend_and_path() {
        let cli = Cli::try_parse_from(["tasks", "--storage", "file", "--path", "/tmp/t.json", "list"])
            .unwrap();
        assert_eq!(
            cli.storage_config(),
            StorageConfig::File { path: PathBuf::from("/tmp/t.json") }
        );

        let cli = Cli::try_parse_from(["tasks", "list"]).unwrap();
        assert_eq!(cli.storage_config().path(), PathBuf::from("./tasks.db"));
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["tasks", "complete", "abc"]).is_err());
    }
}
