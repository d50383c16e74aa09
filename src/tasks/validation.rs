//! Request bodies for the task routes and the rules that turn them into
//! store inputs. Nothing reaches the store until these checks pass.

use crate::error::{AppError, FieldError};
use crate::tasks::models::{NewTask, TaskId, TaskPatch};
use serde::Deserialize;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) -> String {
    let title = title.trim();
    if title.is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.push(FieldError::new(
            "title",
            format!("Title must be at most {} characters", TITLE_MAX_CHARS),
        ));
    }
    title.to_string()
}

fn check_description(description: &str, errors: &mut Vec<FieldError>) -> String {
    let description = description.trim();
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.push(FieldError::new(
            "description",
            format!("Description must be at most {} characters", DESCRIPTION_MAX_CHARS),
        ));
    }
    description.to_string()
}

impl CreateTaskRequest {
    pub fn validate(self, owner: &str) -> Result<NewTask, AppError> {
        let mut errors = Vec::new();

        let title = match self.title.as_deref() {
            Some(title) => check_title(title, &mut errors),
            None => {
                errors.push(FieldError::new("title", "Title is required"));
                String::new()
            }
        };
        let description = self
            .description
            .as_deref()
            .map(|d| check_description(d, &mut errors))
            .unwrap_or_default();

        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        Ok(NewTask {
            title,
            description,
            user_id: owner.to_string(),
        })
    }
}

impl UpdateTaskRequest {
    pub fn validate(self) -> Result<TaskPatch, AppError> {
        let mut errors = Vec::new();

        let title = self.title.as_deref().map(|t| check_title(t, &mut errors));
        let description = self
            .description
            .as_deref()
            .map(|d| check_description(d, &mut errors));

        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        Ok(TaskPatch {
            title,
            description,
            completed: self.completed,
        })
    }
}

/// Task ids in paths are positive integers.
pub fn parse_task_id(raw: &str) -> Result<TaskId, AppError> {
    match raw.parse::<TaskId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::validation("id", "Task ID must be a positive integer")),
    }
}
