//! Task records

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{Record, RecordId};

/// Completion state of a task, carried on the wire as 0 or 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskStatus {
    #[default]
    Incompleted,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Incompleted => "incompleted",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status code outside 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid task status: {0}")]
pub struct InvalidTaskStatus(pub u8);

impl TryFrom<u8> for TaskStatus {
    type Error = InvalidTaskStatus;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskStatus::Incompleted),
            1 => Ok(TaskStatus::Completed),
            other => Err(InvalidTaskStatus(other)),
        }
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Incompleted => 0,
            TaskStatus::Completed => 1,
        }
    }
}

/// A named task. `id` is 0 until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Create an unsaved task
    pub fn new(name: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: 0,
            name: name.into(),
            status,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

impl Record for Task {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}
