//! Task input validation
//!
//! Every path that creates a task (JSON API, HTML form, CLI) goes through
//! [`TaskCreate`], so the title and description rules live in one place.

use serde_json::Value;

use crate::error::ValidationError;

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Validated and trimmed task input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCreate {
    pub title: String,
    pub description: String,
}

impl TaskCreate {
    /// Validate a title and optional description.
    ///
    /// A missing description becomes the empty string. Lengths are counted in
    /// characters after trimming.
    pub fn new(title: Option<&str>, description: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: validate_title(title)?,
            description: validate_description(description)?,
        })
    }

    /// Validate raw JSON values, as found in a request body.
    ///
    /// `null` counts as absent; any other non-string value is rejected.
    pub fn from_json(
        title: Option<&Value>,
        description: Option<&Value>,
    ) -> Result<Self, ValidationError> {
        let title = match title {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.as_str()),
            Some(_) => return Err(ValidationError::new("title", "Title must be a string")),
        };
        let description = match description {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.as_str()),
            Some(_) => {
                return Err(ValidationError::new(
                    "description",
                    "Description must be a string",
                ))
            }
        };
        Self::new(title, description)
    }
}

fn validate_title(title: Option<&str>) -> Result<String, ValidationError> {
    let trimmed = title.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ValidationError::new("title", "Title is required"));
    }

    let length = trimmed.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(ValidationError::new(
            "title",
            format!("Title must not exceed {MAX_TITLE_LENGTH} characters"),
        )
        .with_details(length, MAX_TITLE_LENGTH));
    }

    Ok(trimmed.to_string())
}

fn validate_description(description: Option<&str>) -> Result<String, ValidationError> {
    let Some(description) = description else {
        return Ok(String::new());
    };

    let trimmed = description.trim();
    let length = trimmed.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::new(
            "description",
            format!("Description must not exceed {MAX_DESCRIPTION_LENGTH} characters"),
        )
        .with_details(length, MAX_DESCRIPTION_LENGTH));
    }

    Ok(trimmed.to_string())
}
