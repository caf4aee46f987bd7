//! Task module
//!
//! This module contains task-related types and logic.

mod file_store;
mod model;
mod repository;
mod schema;
mod service;
mod sqlite_store;

pub use file_store::FileTaskStore;
pub use model::*;
pub use repository::TaskRepository;
pub use schema::{TaskCreate, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
pub use service::TaskService;
pub use sqlite_store::SqliteTaskStore;
