//! Error types for project validation.

use crate::{error::ErrorKind, task::domain::TaskId, user::domain::UserId};
use thiserror::Error;

/// Errors returned by project aggregate operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// A member proposed for assignment does not belong to the owning team.
    #[error("member {0} is not part of this team")]
    NotATeamMember(UserId),

    /// The task is already attached to the project.
    #[error("task {0} already belongs to this project")]
    TaskAlreadyAttached(TaskId),
}

impl ProjectDomainError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyProjectName | Self::NotATeamMember(_) | Self::TaskAlreadyAttached(_) => {
                ErrorKind::BadRequest
            }
        }
    }
}
