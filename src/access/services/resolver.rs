//! Reverse-link walk from a target to its team and the actor's role.

use crate::{
    access::domain::{AccessContext, AccessError, AccessTarget},
    project::{
        domain::{Project, ProjectId},
        ports::ProjectRepository,
    },
    task::domain::TaskId,
    team::{
        domain::{Team, TeamId},
        ports::TeamRepository,
    },
    user::domain::UserId,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves access contexts against team and project repositories.
pub struct AccessResolver<T, P>
where
    T: TeamRepository,
    P: ProjectRepository,
{
    teams: Arc<T>,
    projects: Arc<P>,
}

impl<T, P> Clone for AccessResolver<T, P>
where
    T: TeamRepository,
    P: ProjectRepository,
{
    fn clone(&self) -> Self {
        Self {
            teams: Arc::clone(&self.teams),
            projects: Arc::clone(&self.projects),
        }
    }
}

impl<T, P> AccessResolver<T, P>
where
    T: TeamRepository,
    P: ProjectRepository,
{
    /// Creates a resolver over the given repositories.
    #[must_use]
    pub const fn new(teams: Arc<T>, projects: Arc<P>) -> Self {
        Self { teams, projects }
    }

    /// Resolves `target` for `actor`.
    ///
    /// # Errors
    ///
    /// Returns a not-found variant of [`AccessError`] when a link in the
    /// chain is missing, [`AccessError::NotATeamMember`] when the actor does
    /// not belong to the resolved team, or a wrapped repository error.
    pub async fn resolve(
        &self,
        target: AccessTarget,
        actor: UserId,
    ) -> Result<AccessContext, AccessError> {
        let resolved = match target {
            AccessTarget::Team(team_id) => {
                return team_access(&*self.teams, team_id, actor).await;
            }
            AccessTarget::Project(project_id) => {
                let project = self.project(project_id).await?;
                let team = self.owning_team(&project).await?;
                AccessContext::new(team, Some(project), actor)
            }
            AccessTarget::Task(task_id) => {
                let project = self.project_of_task(task_id).await?;
                let team = self.owning_team(&project).await?;
                AccessContext::new(team, Some(project), actor)
            }
        };
        report(target, actor, resolved)
    }

    /// Resolves the team owning `task_id`.
    ///
    /// # Errors
    ///
    /// See [`AccessResolver::resolve`].
    pub async fn for_task(
        &self,
        task_id: TaskId,
        actor: UserId,
    ) -> Result<AccessContext, AccessError> {
        self.resolve(AccessTarget::Task(task_id), actor).await
    }

    /// Resolves the team owning `project_id`.
    ///
    /// # Errors
    ///
    /// See [`AccessResolver::resolve`].
    pub async fn for_project(
        &self,
        project_id: ProjectId,
        actor: UserId,
    ) -> Result<AccessContext, AccessError> {
        self.resolve(AccessTarget::Project(project_id), actor).await
    }

    /// Resolves `team_id` directly.
    ///
    /// # Errors
    ///
    /// See [`AccessResolver::resolve`].
    pub async fn for_team(
        &self,
        team_id: TeamId,
        actor: UserId,
    ) -> Result<AccessContext, AccessError> {
        self.resolve(AccessTarget::Team(team_id), actor).await
    }

    async fn project(&self, project_id: ProjectId) -> Result<Project, AccessError> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(AccessError::ProjectNotFound(project_id))
    }

    async fn project_of_task(&self, task_id: TaskId) -> Result<Project, AccessError> {
        self.projects
            .find_containing_task(task_id)
            .await?
            .ok_or(AccessError::TaskNotFound(task_id))
    }

    async fn owning_team(&self, project: &Project) -> Result<Team, AccessError> {
        self.teams
            .find_containing_project(project.id())
            .await?
            .ok_or(AccessError::OrphanProject(project.id()))
    }
}

/// Resolves `team_id` for `actor` with only a team repository at hand.
///
/// # Errors
///
/// Returns [`AccessError::TeamNotFound`], [`AccessError::NotATeamMember`]
/// or a wrapped repository error.
pub(crate) async fn team_access<T>(
    teams: &T,
    team_id: TeamId,
    actor: UserId,
) -> Result<AccessContext, AccessError>
where
    T: TeamRepository + ?Sized,
{
    let team = teams
        .find_by_id(team_id)
        .await?
        .ok_or(AccessError::TeamNotFound(team_id))?;
    report(
        AccessTarget::Team(team_id),
        actor,
        AccessContext::new(team, None, actor),
    )
}

fn report(
    target: AccessTarget,
    actor: UserId,
    resolved: Result<AccessContext, AccessError>,
) -> Result<AccessContext, AccessError> {
    match &resolved {
        Ok(context) => debug!(
            access_target = %target,
            team_id = %context.team().id(),
            actor = %actor,
            role = %context.role(),
            "access context resolved"
        ),
        Err(err) => warn!(access_target = %target, actor = %actor, error = %err, "access denied"),
    }
    resolved
}
