//! Resolved authorization context.

use super::AccessError;
use crate::{
    project::domain::{Project, ProjectId},
    task::domain::TaskId,
    team::domain::{Role, Team, TeamId},
    user::domain::UserId,
};
use std::fmt;

/// Entity an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessTarget {
    /// A team, addressed directly.
    Team(TeamId),
    /// A project; its team is found by reverse lookup.
    Project(ProjectId),
    /// A task; its project and team are found by reverse lookup.
    Task(TaskId),
}

impl fmt::Display for AccessTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Team(id) => write!(f, "team {id}"),
            Self::Project(id) => write!(f, "project {id}"),
            Self::Task(id) => write!(f, "task {id}"),
        }
    }
}

/// The team (and project, when the target lives inside one) an operation
/// acts on, together with the actor's role in that team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    team: Team,
    project: Option<Project>,
    actor: UserId,
    role: Role,
}

impl AccessContext {
    /// Builds a context for a team member.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotATeamMember`] when `actor` does not belong
    /// to `team`.
    pub fn new(team: Team, project: Option<Project>, actor: UserId) -> Result<Self, AccessError> {
        let role = team.role_of(actor).ok_or(AccessError::NotATeamMember {
            team_id: team.id(),
            actor,
        })?;
        Ok(Self {
            team,
            project,
            actor,
            role,
        })
    }

    /// Returns the resolved team.
    #[must_use]
    pub const fn team(&self) -> &Team {
        &self.team
    }

    /// Returns the resolved project, if the target was a project or task.
    #[must_use]
    pub const fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns the actor's role in the team.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Consumes the context, returning the loaded aggregates.
    #[must_use]
    pub fn into_parts(self) -> (Team, Option<Project>) {
        (self.team, self.project)
    }

    /// Admits admins and owners.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AdminOrOwnerRequired`] for plain members.
    pub const fn require_admin_or_owner(&self, action: &'static str) -> Result<(), AccessError> {
        if self.role.is_admin_or_owner() {
            return Ok(());
        }
        Err(AccessError::AdminOrOwnerRequired {
            action,
            role: self.role,
        })
    }

    /// Admits owners only.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::OwnerRequired`] for admins and members.
    pub const fn require_owner(&self, action: &'static str) -> Result<(), AccessError> {
        if self.role.is_owner() {
            return Ok(());
        }
        Err(AccessError::OwnerRequired {
            action,
            role: self.role,
        })
    }
}
