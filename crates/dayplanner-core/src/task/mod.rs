//! Task records.
//!
//! A task is created `pending` and may move to `completed` exactly once.
//! Pending tasks feed the schedule builder in the order they were added.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schedule::BlockCategory;
use crate::scheduler::TaskRef;

/// Task status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(ValidationError::InvalidValue {
                field: "status".into(),
                message: format!("'{other}' is not pending or completed"),
            }),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("'{other}' is not low, medium or high"),
            }),
        }
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub description: String,
    pub priority: Priority,
    /// Free text such as "45 min" or "2h".
    pub duration: String,
    pub category: BlockCategory,
    pub preferences: Option<String>,
}

impl NewTask {
    pub fn new(description: impl Into<String>, category: BlockCategory) -> Self {
        Self {
            description: description.into(),
            priority: Priority::default(),
            duration: "30 min".to_string(),
            category,
            preferences: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyField("description"));
        }
        if self.duration.trim().is_empty() {
            return Err(ValidationError::EmptyField("duration"));
        }
        Ok(())
    }
}

/// A stored task owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub priority: Priority,
    pub duration: String,
    #[serde(rename = "type")]
    pub category: BlockCategory,
    pub preferences: Option<String>,
    pub status: TaskStatus,
    pub added_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn from_new(user_id: &str, new: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            description: new.description.trim().to_string(),
            priority: new.priority,
            duration: new.duration.trim().to_string(),
            category: new.category,
            preferences: new.preferences,
            status: TaskStatus::Pending,
            added_at: now,
            completed_at: None,
        }
    }

    /// Move a pending task to completed.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.status == TaskStatus::Completed {
            return Err(ValidationError::InvalidTransition {
                id: self.id.clone(),
                status: self.status.to_string(),
            });
        }
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
        Ok(())
    }

    pub fn to_ref(&self) -> TaskRef {
        TaskRef::new(self.description.clone(), self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_sets_timestamp_once() {
        let now = Utc::now();
        let mut task = Task::from_new("u1", NewTask::new("Write report", BlockCategory::Work), now);
        assert_eq!(task.status, TaskStatus::Pending);

        task.complete(now).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_at, Some(now));

        assert!(matches!(
            task.complete(now),
            Err(ValidationError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn new_task_requires_description() {
        let new = NewTask::new("   ", BlockCategory::Study);
        assert!(matches!(new.validate(), Err(ValidationError::EmptyField("description"))));
    }

    #[test]
    fn parse_priority_and_status() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!("Completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
    }

    #[test]
    fn task_serializes_category_as_type() {
        let task = Task::from_new("u1", NewTask::new("Gym", BlockCategory::Health), Utc::now());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "health");
        assert_eq!(json["status"], "pending");
    }
}
