//! Error types for task domain validation and lifecycle rules.

use super::{SubtaskId, TaskId, TaskStatus};
use crate::{error::ErrorKind, team::domain::Role, user::domain::UserId};
use thiserror::Error;

/// Errors returned by task aggregate operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The subtask title is empty after trimming.
    #[error("subtask title must not be empty")]
    EmptySubtaskTitle,

    /// The transition table does not list the requested move for the role.
    #[error("role {role} cannot move task {task_id} from {from} to {to}")]
    TransitionForbidden {
        /// Task being transitioned.
        task_id: TaskId,
        /// Role of the acting user.
        role: Role,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// A member tried to transition a task assigned to somebody else.
    #[error("user {actor} is not the assignee of task {task_id}")]
    NotAssignee {
        /// Task being transitioned.
        task_id: TaskId,
        /// Acting user.
        actor: UserId,
    },

    /// The task already has an assignee and cannot be taken.
    #[error("task {0} is already assigned to someone else")]
    AlreadyAssigned(TaskId),

    /// Only unassigned tasks in the created status can be taken.
    #[error("only unassigned tasks can be taken; task {task_id} is {status}")]
    NotTakeable {
        /// Task being taken.
        task_id: TaskId,
        /// Current status.
        status: TaskStatus,
    },

    /// The subtask does not exist on this task.
    #[error("subtask {0} not found")]
    SubtaskNotFound(SubtaskId),
}

impl TaskDomainError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTitle
            | Self::EmptySubtaskTitle
            | Self::AlreadyAssigned(_)
            | Self::NotTakeable { .. } => ErrorKind::BadRequest,
            Self::TransitionForbidden { .. } | Self::NotAssignee { .. } => ErrorKind::Forbidden,
            Self::SubtaskNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Error returned while parsing a task status from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task status '{0}'")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task flag from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task flag '{0}'")]
pub struct ParseTaskFlagError(pub String);

/// Error returned while parsing a subtask status from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid subtask status '{0}', expected pending or completed")]
pub struct ParseSubtaskStatusError(pub String);
