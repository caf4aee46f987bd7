//! Core library for the task tracker
//!
//! This crate contains the core business logic, including:
//! - Task entity, views and input validation
//! - Storage backends (JSON file and SQLite)
//! - The task service owning the in-memory task list
//! - Current time lookup and request history

pub mod config;
pub mod error;
pub mod history;
pub mod task;
pub mod time;

pub use error::{Error, ValidationDetails, ValidationError};
pub type Result<T> = std::result::Result<T, Error>;
