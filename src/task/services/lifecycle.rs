//! Authorization-gated task lifecycle operations.

use super::{CreateTaskRequest, SubtaskMutation, UpdateTaskRequest};
use crate::{
    access::{
        domain::{AccessContext, AccessError},
        services::{AccessResolver, audit_gate},
    },
    config::EngineConfig,
    error::ErrorKind,
    project::{
        domain::{ProjectDomainError, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
    task::{
        domain::{
            NewTask, ParseSubtaskStatusError, ParseTaskFlagError, ParseTaskStatusError,
            SubtaskStatus, Task, TaskDomainError, TaskFlag, TaskId, TaskStatus,
        },
        ports::{TaskRepository, TaskRepositoryError},
    },
    team::{
        domain::{Team, TeamId},
        ports::TeamRepository,
    },
    user::domain::UserId,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Access resolution or gating failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// A task rule rejected the mutation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// A project rule rejected the mutation.
    #[error(transparent)]
    Project(#[from] ProjectDomainError),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project persistence failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
    /// The requested status is not a valid status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The requested flag is not a valid flag.
    #[error(transparent)]
    InvalidFlag(#[from] ParseTaskFlagError),
    /// The requested subtask status is not valid.
    #[error(transparent)]
    InvalidSubtaskStatus(#[from] ParseSubtaskStatusError),
    /// The project lists the task but the task itself is gone.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The proposed assignee does not belong to the owning team.
    #[error("assignee {assignee} is not a member of team {team_id}")]
    AssigneeNotMember {
        /// Owning team.
        team_id: TeamId,
        /// Rejected assignee.
        assignee: UserId,
    },
}

impl TaskServiceError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::Domain(err) => err.kind(),
            Self::Project(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::ProjectRepository(err) => err.kind(),
            Self::InvalidStatus(_)
            | Self::InvalidFlag(_)
            | Self::InvalidSubtaskStatus(_)
            | Self::AssigneeNotMember { .. } => ErrorKind::BadRequest,
            Self::TaskNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
///
/// Every operation resolves the owning team through the task's project,
/// checks the actor's role, applies one domain mutation and persists the
/// task as a whole.
#[derive(Clone)]
pub struct TaskLifecycleService<T, P, K, C>
where
    T: TeamRepository,
    P: ProjectRepository,
    K: TaskRepository,
    C: Clock + Send + Sync,
{
    access: AccessResolver<T, P>,
    projects: Arc<P>,
    tasks: Arc<K>,
    clock: Arc<C>,
    config: EngineConfig,
}

impl<T, P, K, C> TaskLifecycleService<T, P, K, C>
where
    T: TeamRepository,
    P: ProjectRepository,
    K: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a task lifecycle service with the default configuration.
    #[must_use]
    pub fn new(teams: Arc<T>, projects: Arc<P>, tasks: Arc<K>, clock: Arc<C>) -> Self {
        Self::with_config(teams, projects, tasks, clock, EngineConfig::default())
    }

    /// Creates a task lifecycle service with an explicit configuration.
    #[must_use]
    pub fn with_config(
        teams: Arc<T>,
        projects: Arc<P>,
        tasks: Arc<K>,
        clock: Arc<C>,
        config: EngineConfig,
    ) -> Self {
        Self {
            access: AccessResolver::new(teams, Arc::clone(&projects)),
            projects,
            tasks,
            clock,
            config,
        }
    }

    /// Creates a task and appends it to its project. Admin or owner only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when access is denied, a field is
    /// invalid, the assignee is not a team member (when enforced) or
    /// persistence fails.
    pub async fn create_task(
        &self,
        actor: UserId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let project_id = request.project_id;
        let context = self.access.for_project(project_id, actor).await?;
        audit_gate(context.require_admin_or_owner("create tasks"), &context)?;
        let input = build_new_task(request)?;
        if let Some(assignee) = input.assignee() {
            self.ensure_assignable(context.team(), assignee)?;
        }
        let (_, loaded) = context.into_parts();
        let mut project = loaded.ok_or(AccessError::ProjectNotFound(project_id))?;

        let task = Task::new(input, actor, &*self.clock);
        project.attach_task(task.id(), &*self.clock)?;
        self.tasks.store(&task).await?;
        if let Err(err) = self.projects.update(&project).await {
            warn!(
                project_id = %project.id(),
                task_id = %task.id(),
                error = %err,
                "project update failed, discarding new task"
            );
            if let Err(cleanup) = self.tasks.delete(task.id()).await {
                warn!(
                    task_id = %task.id(),
                    error = %cleanup,
                    "discarding new task failed"
                );
            }
            return Err(err.into());
        }

        info!(
            task_id = %task.id(),
            project_id = %project.id(),
            actor = %actor,
            status = %task.status(),
            "task created"
        );
        Ok(task)
    }

    /// Edits title, description, deadline and attachments. Admin or owner
    /// only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when access is denied, the title is
    /// blank or persistence fails.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        actor: UserId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let (context, mut task) = self.load(task_id, actor).await?;
        audit_gate(context.require_admin_or_owner("update tasks"), &context)?;
        task.update_details(request.details, actor, &*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, actor = %actor, "task updated");
        Ok(task)
    }

    /// Deletes a task and detaches it from its project. Admin or owner
    /// only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when access is denied or persistence
    /// fails.
    pub async fn delete_task(&self, task_id: TaskId, actor: UserId) -> TaskServiceResult<()> {
        let context = self.access.for_task(task_id, actor).await?;
        audit_gate(context.require_admin_or_owner("delete tasks"), &context)?;
        let (_, project) = context.into_parts();

        match self.tasks.delete(task_id).await {
            Ok(()) | Err(TaskRepositoryError::NotFound(_)) => {}
            Err(err) => return Err(err.into()),
        }
        if let Some(mut project) = project
            && project.detach_task(task_id, &*self.clock)
        {
            self.projects.update(&project).await?;
        }
        info!(task_id = %task_id, actor = %actor, "task deleted");
        Ok(())
    }

    /// Replaces the priority flag. Admin or owner only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidFlag`] for an unknown flag, or
    /// another [`TaskServiceError`] when access is denied or persistence
    /// fails.
    pub async fn update_flag(
        &self,
        task_id: TaskId,
        actor: UserId,
        flag: &str,
    ) -> TaskServiceResult<Task> {
        let next_flag = TaskFlag::try_from(flag)?;
        let (context, mut task) = self.load(task_id, actor).await?;
        audit_gate(context.require_admin_or_owner("update task flags"), &context)?;
        let previous = task.set_flag(next_flag, actor, &*self.clock);
        self.tasks.update(&task).await?;
        info!(
            task_id = %task_id,
            actor = %actor,
            from = %previous,
            to = %next_flag,
            "task flag changed"
        );
        Ok(task)
    }

    /// Adds, edits or removes a subtask. Admin or owner only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when access is denied, the subtask does
    /// not exist, a field is invalid or persistence fails.
    pub async fn update_subtask(
        &self,
        task_id: TaskId,
        actor: UserId,
        mutation: SubtaskMutation,
    ) -> TaskServiceResult<Task> {
        let (context, mut task) = self.load(task_id, actor).await?;
        audit_gate(context.require_admin_or_owner("update subtasks"), &context)?;
        let clock = &*self.clock;
        match mutation {
            SubtaskMutation::Add {
                title,
                status: status_text,
            } => {
                let status = parse_subtask_status(status_text.as_deref())?.unwrap_or_default();
                let subtask_id = task.add_subtask(title, status, actor, clock)?;
                info!(task_id = %task_id, actor = %actor, subtask_id = %subtask_id, "subtask added");
            }
            SubtaskMutation::Modify {
                subtask_id,
                title,
                status: status_text,
            } => {
                let status = parse_subtask_status(status_text.as_deref())?;
                task.modify_subtask(subtask_id, title, status, actor, clock)?;
                info!(task_id = %task_id, actor = %actor, subtask_id = %subtask_id, "subtask modified");
            }
            SubtaskMutation::Delete { subtask_id } => {
                task.delete_subtask(subtask_id, actor, clock)?;
                info!(task_id = %task_id, actor = %actor, subtask_id = %subtask_id, "subtask deleted");
            }
        }
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Assigns the task to `assignee`, forcing the assigned status. Admin
    /// or owner only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::AssigneeNotMember`] when membership is
    /// enforced and the assignee is not a team member, or another
    /// [`TaskServiceError`] when access is denied or persistence fails.
    pub async fn assign(
        &self,
        task_id: TaskId,
        actor: UserId,
        assignee: UserId,
    ) -> TaskServiceResult<Task> {
        let (context, mut task) = self.load(task_id, actor).await?;
        audit_gate(context.require_admin_or_owner("assign tasks"), &context)?;
        self.ensure_assignable(context.team(), assignee)?;
        let previous = task.assign(assignee, actor, &*self.clock);
        self.tasks.update(&task).await?;
        info!(
            task_id = %task_id,
            actor = %actor,
            assignee = %assignee,
            previous = ?previous,
            "task assigned"
        );
        Ok(task)
    }

    /// Clears the assignee without changing the status. Admin or owner
    /// only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when access is denied or persistence
    /// fails.
    pub async fn unassign(&self, task_id: TaskId, actor: UserId) -> TaskServiceResult<Task> {
        let (context, mut task) = self.load(task_id, actor).await?;
        audit_gate(context.require_admin_or_owner("unassign tasks"), &context)?;
        let previous = task.unassign(actor, &*self.clock);
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, actor = %actor, previous = ?previous, "task unassigned");
        Ok(task)
    }

    /// Lets any team member claim an unassigned task in the created status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the task is already
    /// assigned or not in the created status, or another
    /// [`TaskServiceError`] when access is denied or persistence fails.
    pub async fn take(&self, task_id: TaskId, actor: UserId) -> TaskServiceResult<Task> {
        let (_, mut task) = self.load(task_id, actor).await?;
        task.take(actor, &*self.clock).inspect_err(|err| {
            warn!(task_id = %task_id, actor = %actor, error = %err, "take rejected");
        })?;
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, actor = %actor, "task taken");
        Ok(task)
    }

    /// Moves the task to `status` according to the role-keyed transition
    /// table.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidStatus`] for an unknown status,
    /// [`TaskServiceError::Domain`] when the table or the assignee rule
    /// forbids the move, or another [`TaskServiceError`] when access is
    /// denied or persistence fails.
    pub async fn update_status(
        &self,
        task_id: TaskId,
        actor: UserId,
        status: &str,
    ) -> TaskServiceResult<Task> {
        let target = TaskStatus::try_from(status)?;
        let (context, mut task) = self.load(task_id, actor).await?;
        let from = task.status();
        task.transition(actor, context.role(), target, &*self.clock)
            .inspect_err(|err| {
                warn!(
                    task_id = %task_id,
                    actor = %actor,
                    role = %context.role(),
                    from = %from,
                    to = %target,
                    error = %err,
                    "status transition rejected"
                );
            })?;
        self.tasks.update(&task).await?;
        info!(
            task_id = %task_id,
            actor = %actor,
            role = %context.role(),
            from = %from,
            to = %target,
            "task status changed"
        );
        Ok(task)
    }

    /// Flips the task between completed and pending. Requires team
    /// membership but no particular role.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when access is denied or persistence
    /// fails.
    pub async fn toggle_status(&self, task_id: TaskId, actor: UserId) -> TaskServiceResult<Task> {
        let (_, mut task) = self.load(task_id, actor).await?;
        let previous = task.status();
        let current = task.toggle_completion(actor, &*self.clock);
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, actor = %actor, from = %previous, to = %current, "task toggled");
        Ok(task)
    }

    /// Loads one task. Any team member may read.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the task does not exist, access is
    /// denied or the lookup fails.
    pub async fn find_task(&self, task_id: TaskId, actor: UserId) -> TaskServiceResult<Task> {
        let (_, task) = self.load(task_id, actor).await?;
        Ok(task)
    }

    /// Lists a project's tasks in project order. Any team member may read.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when access is denied or the lookup
    /// fails.
    pub async fn list_project_tasks(
        &self,
        project_id: ProjectId,
        actor: UserId,
    ) -> TaskServiceResult<Vec<Task>> {
        let context = self.access.for_project(project_id, actor).await?;
        let task_ids = context
            .project()
            .map(|project| project.tasks().to_vec())
            .unwrap_or_default();
        Ok(self.tasks.find_many(&task_ids).await?)
    }

    async fn load(
        &self,
        task_id: TaskId,
        actor: UserId,
    ) -> TaskServiceResult<(AccessContext, Task)> {
        let context = self.access.for_task(task_id, actor).await?;
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))?;
        Ok((context, task))
    }

    fn ensure_assignable(&self, team: &Team, assignee: UserId) -> TaskServiceResult<()> {
        if !self.config.enforce_assignee_membership || team.is_member(assignee) {
            return Ok(());
        }
        warn!(team_id = %team.id(), assignee = %assignee, "assignee is not a team member");
        Err(TaskServiceError::AssigneeNotMember {
            team_id: team.id(),
            assignee,
        })
    }
}

fn build_new_task(request: CreateTaskRequest) -> TaskServiceResult<NewTask> {
    let mut input = NewTask::new(request.title)?;
    if let Some(description) = request.description {
        input = input.with_description(description);
    }
    if let Some(deadline) = request.deadline {
        input = input.with_deadline(deadline);
    }
    if let Some(flag) = request.flag {
        input = input.with_flag(TaskFlag::try_from(flag.as_str())?);
    }
    if let Some(assignee) = request.assignee {
        input = input.with_assignee(assignee);
    }
    for (title, status_text) in request.subtasks {
        let status = parse_subtask_status(status_text.as_deref())?.unwrap_or_default();
        input = input.with_subtask(title, status)?;
    }
    Ok(input.with_attachments(request.attachments))
}

fn parse_subtask_status(status: Option<&str>) -> TaskServiceResult<Option<SubtaskStatus>> {
    Ok(status.map(SubtaskStatus::try_from).transpose()?)
}
