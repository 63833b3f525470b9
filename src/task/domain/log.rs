//! Append-only task audit log.

use super::TaskStatus;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action recorded by a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    /// Task created.
    Created,
    /// Task assigned, or assignment changed.
    Assigned,
    /// Task moved to pending.
    Pending,
    /// Task moved to review.
    InReview,
    /// Task completed.
    Completed,
    /// Task closed.
    Closed,
    /// Subtask appended.
    SubtaskAdded,
    /// Subtask edited.
    SubtaskModified,
    /// Subtask removed.
    SubtaskDeleted,
}

impl LogAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Assigned => "assigned",
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Completed => "completed",
            Self::Closed => "closed",
            Self::SubtaskAdded => "subtask_added",
            Self::SubtaskModified => "subtask_modified",
            Self::SubtaskDeleted => "subtask_deleted",
        }
    }
}

impl From<TaskStatus> for LogAction {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Created => Self::Created,
            TaskStatus::Assigned => Self::Assigned,
            TaskStatus::Pending => Self::Pending,
            TaskStatus::InReview => Self::InReview,
            TaskStatus::Completed => Self::Completed,
            TaskStatus::Closed => Self::Closed,
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable audit record appended on every task mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLogEntry {
    action: LogAction,
    timestamp: DateTime<Utc>,
    performed_by: UserId,
    details: String,
}

impl TaskLogEntry {
    /// Creates a log entry.
    #[must_use]
    pub fn new(
        action: LogAction,
        timestamp: DateTime<Utc>,
        performed_by: UserId,
        details: impl Into<String>,
    ) -> Self {
        Self {
            action,
            timestamp,
            performed_by,
            details: details.into(),
        }
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> LogAction {
        self.action
    }

    /// Returns when the action happened.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns who performed the action.
    #[must_use]
    pub const fn performed_by(&self) -> UserId {
        self.performed_by
    }

    /// Returns the human-readable details.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }
}
