//! Request payloads for task operations.
//!
//! Enum-valued fields arrive as text and are parsed by the service, so that
//! an unknown value surfaces as a bad request rather than a panic at the
//! boundary.

use crate::{
    project::domain::ProjectId,
    task::domain::{SubtaskId, TaskDetailsUpdate},
    user::domain::UserId,
};
use chrono::{DateTime, Utc};

/// Request payload for creating a task inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) project_id: ProjectId,
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) deadline: Option<DateTime<Utc>>,
    pub(super) flag: Option<String>,
    pub(super) assignee: Option<UserId>,
    pub(super) subtasks: Vec<(String, Option<String>)>,
    pub(super) attachments: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            deadline: None,
            flag: None,
            assignee: None,
            subtasks: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the priority flag (`none`, `low`, `medium`, `high`, `priority`).
    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Appends an initial subtask with the default pending status.
    #[must_use]
    pub fn with_subtask(mut self, title: impl Into<String>) -> Self {
        self.subtasks.push((title.into(), None));
        self
    }

    /// Appends an initial subtask with an explicit status.
    #[must_use]
    pub fn with_subtask_status(
        mut self,
        title: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        self.subtasks.push((title.into(), Some(status.into())));
        self
    }

    /// Sets the attachment references.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = String>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }
}

/// Request payload for editing task details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) details: TaskDetailsUpdate,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.details.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.details.description = Some(description.into());
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.details.deadline = Some(deadline);
        self
    }

    /// Replaces the attachment list.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = String>) -> Self {
        self.details.attachments = Some(attachments.into_iter().collect());
        self
    }
}

/// A change to a task's subtask list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtaskMutation {
    /// Append a subtask.
    Add {
        /// Subtask title.
        title: String,
        /// Optional status text; defaults to pending.
        status: Option<String>,
    },
    /// Edit an existing subtask.
    Modify {
        /// Subtask to edit.
        subtask_id: SubtaskId,
        /// Replacement title.
        title: Option<String>,
        /// Replacement status text.
        status: Option<String>,
    },
    /// Remove a subtask.
    Delete {
        /// Subtask to remove.
        subtask_id: SubtaskId,
    },
}
