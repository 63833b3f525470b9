//! Project creation, membership assignment and project queries.

use crate::{
    access::{
        domain::AccessError,
        services::{AccessResolver, audit_gate},
    },
    error::ErrorKind,
    project::{
        domain::{Project, ProjectDomainError, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
    task::{
        domain::Task,
        ports::{TaskRepository, TaskRepositoryError},
    },
    team::{
        domain::{Role, Team, TeamDomainError, TeamId},
        ports::{TeamRepository, TeamRepositoryError},
    },
    user::domain::UserId,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// A project together with its loaded tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    /// The project aggregate.
    pub project: Project,
    /// Owning team.
    pub team_id: TeamId,
    /// Role of the requesting user in the owning team.
    pub viewer_role: Role,
    /// Tasks in project order. Dangling references are skipped.
    pub tasks: Vec<Task>,
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Access resolution or gating failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// A project rule rejected the mutation.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// A team rule rejected the mutation.
    #[error(transparent)]
    Team(#[from] TeamDomainError),
    /// Project persistence failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Team persistence failed.
    #[error(transparent)]
    TeamRepository(#[from] TeamRepositoryError),
    /// Task persistence failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

impl ProjectServiceError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::Domain(err) => err.kind(),
            Self::Team(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::TeamRepository(err) => err.kind(),
            Self::TaskRepository(err) => err.kind(),
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<T, P, K, C>
where
    T: TeamRepository,
    P: ProjectRepository,
    K: TaskRepository,
    C: Clock + Send + Sync,
{
    access: AccessResolver<T, P>,
    teams: Arc<T>,
    projects: Arc<P>,
    tasks: Arc<K>,
    clock: Arc<C>,
}

impl<T, P, K, C> ProjectService<T, P, K, C>
where
    T: TeamRepository,
    P: ProjectRepository,
    K: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a project service.
    #[must_use]
    pub fn new(teams: Arc<T>, projects: Arc<P>, tasks: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            access: AccessResolver::new(Arc::clone(&teams), Arc::clone(&projects)),
            teams,
            projects,
            tasks,
            clock,
        }
    }

    /// Creates an empty project under `team_id`. Owner only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when access is denied, the name is
    /// blank or persistence fails.
    pub async fn create_project(
        &self,
        team_id: TeamId,
        actor: UserId,
        name: impl Into<String> + Send,
    ) -> ProjectServiceResult<Project> {
        let context = self.access.for_team(team_id, actor).await?;
        audit_gate(context.require_owner("create projects"), &context)?;
        let (mut team, _) = context.into_parts();

        let project = Project::new(name, actor, &*self.clock)?;
        team.attach_project(project.id(), &*self.clock)?;
        self.projects.store(&project).await?;
        if let Err(err) = self.teams.update(&team).await {
            warn!(
                team_id = %team_id,
                project_id = %project.id(),
                error = %err,
                "team update failed, discarding new project"
            );
            if let Err(cleanup) = self.projects.delete(project.id()).await {
                warn!(
                    project_id = %project.id(),
                    error = %cleanup,
                    "discarding new project failed"
                );
            }
            return Err(err.into());
        }

        info!(
            team_id = %team_id,
            project_id = %project.id(),
            actor = %actor,
            name = project.name(),
            "project created"
        );
        Ok(project)
    }

    /// Renames a project. Admin or owner only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when access is denied, the name is
    /// blank or persistence fails.
    pub async fn rename_project(
        &self,
        project_id: ProjectId,
        actor: UserId,
        name: impl Into<String> + Send,
    ) -> ProjectServiceResult<Project> {
        let mut project = self.admin_project(project_id, actor, "rename projects").await?;
        project.rename(name, &*self.clock)?;
        self.projects.update(&project).await?;
        info!(project_id = %project_id, actor = %actor, name = project.name(), "project renamed");
        Ok(project)
    }

    /// Deletes a project, its tasks and its reference in the owning team.
    /// Admin or owner only.
    ///
    /// The team reference is removed first. When the project or its tasks
    /// cannot be deleted afterwards, the reference is restored so the call
    /// can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when access is denied or persistence
    /// fails.
    pub async fn delete_project(
        &self,
        project_id: ProjectId,
        actor: UserId,
    ) -> ProjectServiceResult<()> {
        let context = self.access.for_project(project_id, actor).await?;
        audit_gate(context.require_admin_or_owner("delete projects"), &context)?;
        let (mut team, loaded) = context.into_parts();
        let project = loaded.ok_or(AccessError::ProjectNotFound(project_id))?;

        if team.detach_project(project_id, &*self.clock) {
            self.teams.update(&team).await?;
        }
        let deleted_tasks = match self.purge(&project).await {
            Ok(count) => count,
            Err(err) => {
                warn!(
                    team_id = %team.id(),
                    project_id = %project_id,
                    error = %err,
                    "project purge failed, restoring team reference"
                );
                self.restore_reference(team, project_id).await;
                return Err(err);
            }
        };

        info!(
            team_id = %team.id(),
            project_id = %project_id,
            actor = %actor,
            deleted_tasks,
            "project deleted"
        );
        Ok(())
    }

    /// Assigns team members to the project. Admin or owner only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] when any identifier is not a
    /// team member, or another [`ProjectServiceError`] when access is denied
    /// or persistence fails.
    pub async fn assign_members(
        &self,
        project_id: ProjectId,
        actor: UserId,
        member_ids: &[UserId],
    ) -> ProjectServiceResult<Project> {
        let context = self.access.for_project(project_id, actor).await?;
        audit_gate(context.require_admin_or_owner("assign project members"), &context)?;
        let (team, loaded) = context.into_parts();
        let mut project = loaded.ok_or(AccessError::ProjectNotFound(project_id))?;

        let added = project.assign_members(&team, member_ids, &*self.clock)?;
        self.projects.update(&project).await?;
        info!(
            project_id = %project_id,
            actor = %actor,
            added = added.len(),
            total = project.assigned_members().len(),
            "project members assigned"
        );
        Ok(project)
    }

    /// Removes members from the project's assigned list. Admin or owner
    /// only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when access is denied or persistence
    /// fails.
    pub async fn remove_members(
        &self,
        project_id: ProjectId,
        actor: UserId,
        member_ids: &[UserId],
    ) -> ProjectServiceResult<Project> {
        let mut project = self
            .admin_project(project_id, actor, "remove project members")
            .await?;
        let removed = project.remove_members(member_ids, &*self.clock);
        self.projects.update(&project).await?;
        info!(project_id = %project_id, actor = %actor, removed, "project members removed");
        Ok(project)
    }

    /// Lists the team's projects in creation order. Any member may read.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when access is denied or the lookup
    /// fails.
    pub async fn list_team_projects(
        &self,
        team_id: TeamId,
        actor: UserId,
    ) -> ProjectServiceResult<Vec<Project>> {
        let context = self.access.for_team(team_id, actor).await?;
        let mut projects = Vec::with_capacity(context.team().projects().len());
        for project_id in context.team().projects() {
            if let Some(project) = self.projects.find_by_id(*project_id).await? {
                projects.push(project);
            }
        }
        Ok(projects)
    }

    /// Loads a project with its tasks. Any member may read.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when access is denied or a lookup
    /// fails.
    pub async fn project_details(
        &self,
        project_id: ProjectId,
        actor: UserId,
    ) -> ProjectServiceResult<ProjectDetails> {
        let context = self.access.for_project(project_id, actor).await?;
        let viewer_role = context.role();
        let (team, loaded) = context.into_parts();
        let project = loaded.ok_or(AccessError::ProjectNotFound(project_id))?;
        let tasks = self.tasks.find_many(project.tasks()).await?;
        Ok(ProjectDetails {
            project,
            team_id: team.id(),
            viewer_role,
            tasks,
        })
    }

    async fn purge(&self, project: &Project) -> ProjectServiceResult<usize> {
        let mut deleted_tasks = 0_usize;
        for task_id in project.tasks() {
            match self.tasks.delete(*task_id).await {
                Ok(()) => deleted_tasks = deleted_tasks.saturating_add(1),
                Err(TaskRepositoryError::NotFound(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }
        self.projects.delete(project.id()).await?;
        Ok(deleted_tasks)
    }

    async fn restore_reference(&self, mut team: Team, project_id: ProjectId) {
        if let Err(err) = team.attach_project(project_id, &*self.clock) {
            warn!(
                team_id = %team.id(),
                project_id = %project_id,
                error = %err,
                "project reference not restored"
            );
            return;
        }
        if let Err(err) = self.teams.update(&team).await {
            warn!(
                team_id = %team.id(),
                project_id = %project_id,
                error = %err,
                "team update failed while restoring project reference"
            );
        }
    }

    async fn admin_project(
        &self,
        project_id: ProjectId,
        actor: UserId,
        action: &'static str,
    ) -> ProjectServiceResult<Project> {
        let context = self.access.for_project(project_id, actor).await?;
        audit_gate(context.require_admin_or_owner(action), &context)?;
        let (_, loaded) = context.into_parts();
        Ok(loaded.ok_or(AccessError::ProjectNotFound(project_id))?)
    }
}
