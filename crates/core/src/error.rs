//! Error types for the core library

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Time lookup error: {0}")]
    Time(String),
}

/// Length information attached to a length violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationDetails {
    pub length: usize,
    pub max: usize,
}

/// Task input that broke a business rule
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    #[serde(rename = "error")]
    pub message: String,
    pub field: &'static str,
    #[serde(flatten)]
    pub details: Option<ValidationDetails>,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field,
            details: None,
        }
    }

    pub fn with_details(mut self, length: usize, max: usize) -> Self {
        self.details = Some(ValidationDetails { length, max });
        self
    }
}
