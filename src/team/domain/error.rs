//! Error types for team membership rules.

use super::TeamId;
use crate::{error::ErrorKind, project::domain::ProjectId, user::domain::UserId};
use thiserror::Error;

/// Errors returned by team aggregate operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamDomainError {
    /// The team name is empty after trimming.
    #[error("team name must not be empty")]
    EmptyTeamName,

    /// The acting user does not belong to the team.
    #[error("user {actor} is not a member of team {team_id}")]
    ActorNotMember {
        /// Team being mutated.
        team_id: TeamId,
        /// Acting user.
        actor: UserId,
    },

    /// The targeted user does not belong to the team.
    #[error("user {0} is not a member of this team")]
    MemberNotFound(UserId),

    /// The user to add is already a member.
    #[error("user {0} is already a member of this team")]
    AlreadyMember(UserId),

    /// A member tried to remove somebody else.
    #[error("members can only remove themselves from the team")]
    MemberMayOnlyRemoveSelf,

    /// An admin tried to remove an owner.
    #[error("admins cannot remove owners from the team")]
    AdminCannotRemoveOwner,

    /// An admin tried to remove another admin.
    #[error("admins cannot remove other admins from the team")]
    AdminCannotRemoveOtherAdmin,

    /// A member tried to change a role.
    #[error("members cannot change roles of other members")]
    MemberCannotChangeRoles,

    /// An admin tried to change an owner's role.
    #[error("admins cannot change the role of owners")]
    AdminCannotChangeOwner,

    /// An admin tried to grant the owner role.
    #[error("admins cannot promote members to owner")]
    AdminCannotPromoteToOwner,

    /// An admin tried to change another admin's role.
    #[error("admins cannot change the role of other admins")]
    AdminCannotChangeOtherAdmin,

    /// Removing the member would leave the team without an owner.
    #[error("cannot remove the last owner from the team")]
    LastOwnerRemoval,

    /// Demoting another user would leave the team without an owner.
    #[error("cannot change role of the last owner; team must have at least one owner")]
    LastOwnerDemotion,

    /// The actor tried to demote themself while being the last owner.
    #[error("you cannot demote yourself as you are the last owner of this team")]
    LastOwnerSelfDemotion,

    /// The team still owns projects and cannot be deleted.
    #[error("team {team_id} still owns {count} project(s)")]
    TeamHasProjects {
        /// Team being deleted.
        team_id: TeamId,
        /// Number of projects still attached.
        count: usize,
    },

    /// The project is already attached to the team.
    #[error("project {0} already belongs to this team")]
    ProjectAlreadyAttached(ProjectId),
}

impl TeamDomainError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTeamName
            | Self::AlreadyMember(_)
            | Self::ProjectAlreadyAttached(_) => ErrorKind::BadRequest,
            Self::MemberNotFound(_) => ErrorKind::NotFound,
            Self::ActorNotMember { .. }
            | Self::MemberMayOnlyRemoveSelf
            | Self::AdminCannotRemoveOwner
            | Self::AdminCannotRemoveOtherAdmin
            | Self::MemberCannotChangeRoles
            | Self::AdminCannotChangeOwner
            | Self::AdminCannotPromoteToOwner
            | Self::AdminCannotChangeOtherAdmin => ErrorKind::Forbidden,
            Self::LastOwnerRemoval
            | Self::LastOwnerDemotion
            | Self::LastOwnerSelfDemotion
            | Self::TeamHasProjects { .. } => ErrorKind::Conflict,
        }
    }
}

/// Error returned while parsing a role from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid role '{0}', expected member, admin or owner")]
pub struct ParseRoleError(pub String);
