//! Authorization errors.

use crate::{
    error::ErrorKind,
    project::{domain::ProjectId, ports::ProjectRepositoryError},
    task::domain::TaskId,
    team::{
        domain::{Role, TeamId},
        ports::TeamRepositoryError,
    },
    user::domain::UserId,
};
use thiserror::Error;

/// Errors raised while resolving or checking access.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// The team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// No project lists the task.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// No team lists the project.
    #[error("project {0} does not belong to any team")]
    OrphanProject(ProjectId),

    /// The actor does not belong to the team.
    #[error("user {actor} is not a member of team {team_id}")]
    NotATeamMember {
        /// Resolved team.
        team_id: TeamId,
        /// Acting user.
        actor: UserId,
    },

    /// The action needs an admin or owner.
    #[error("only admins or owners can {action}; actor is {role}")]
    AdminOrOwnerRequired {
        /// Human-readable action name.
        action: &'static str,
        /// Role the actor holds.
        role: Role,
    },

    /// The action needs an owner.
    #[error("only owners can {action}; actor is {role}")]
    OwnerRequired {
        /// Human-readable action name.
        action: &'static str,
        /// Role the actor holds.
        role: Role,
    },

    /// Team lookup failed.
    #[error(transparent)]
    TeamRepository(#[from] TeamRepositoryError),

    /// Project lookup failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
}

impl AccessError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TeamNotFound(_)
            | Self::ProjectNotFound(_)
            | Self::TaskNotFound(_)
            | Self::OrphanProject(_) => ErrorKind::NotFound,
            Self::NotATeamMember { .. }
            | Self::AdminOrOwnerRequired { .. }
            | Self::OwnerRequired { .. } => ErrorKind::Forbidden,
            Self::TeamRepository(err) => err.kind(),
            Self::ProjectRepository(err) => err.kind(),
        }
    }
}
