//! Shared fixtures for unit tests: a manually driven clock and a seeded
//! board with one team, one project and a member of every role.

use crate::{
    config::EngineConfig,
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::{Project, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
        services::ProjectService,
    },
    statistics::services::TaskStatisticsService,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskId},
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
        services::TaskLifecycleService,
    },
    team::{
        adapters::memory::InMemoryTeamRepository,
        domain::{Team, TeamId},
        ports::{TeamRepository, TeamRepositoryError, TeamRepositoryResult},
        services::TeamMembershipService,
    },
    user::{
        adapters::memory::InMemoryUserDirectory,
        domain::{UserId, UserProfile},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub(crate) struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub(crate) fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub(crate) fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 2026-03-10T09:00:00Z.
pub(crate) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

pub(crate) type Teams =
    TeamMembershipService<InMemoryTeamRepository, InMemoryUserDirectory, ManualClock>;
pub(crate) type Projects = ProjectService<
    InMemoryTeamRepository,
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    ManualClock,
>;
pub(crate) type Tasks = TaskLifecycleService<
    InMemoryTeamRepository,
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    ManualClock,
>;
pub(crate) type Statistics = TaskStatisticsService<
    InMemoryTeamRepository,
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryUserDirectory,
    ManualClock,
>;

/// In-memory stores seeded with users of every role, a team and a project.
pub(crate) struct Board {
    pub(crate) clock: Arc<ManualClock>,
    pub(crate) teams: Arc<InMemoryTeamRepository>,
    pub(crate) projects: Arc<InMemoryProjectRepository>,
    pub(crate) tasks: Arc<InMemoryTaskRepository>,
    pub(crate) directory: Arc<InMemoryUserDirectory>,
    pub(crate) owner: UserId,
    pub(crate) admin: UserId,
    pub(crate) member: UserId,
    pub(crate) colleague: UserId,
    pub(crate) outsider: UserId,
    pub(crate) team_id: TeamId,
    pub(crate) project_id: ProjectId,
}

impl Board {
    /// Builds the board: alice owns the team, bob is admin, carol and dave
    /// are members, erin is registered but outside the team.
    pub(crate) async fn seeded() -> eyre::Result<Self> {
        let clock = Arc::new(ManualClock::starting_at(epoch()));
        let directory = Arc::new(InMemoryUserDirectory::new());
        let mut ids = Vec::new();
        for (handle, name) in [
            ("alice", "Alice Owner"),
            ("bob", "Bob Admin"),
            ("carol", "Carol Member"),
            ("dave", "Dave Member"),
            ("erin", "Erin Outsider"),
        ] {
            let id = UserId::new();
            directory.register(UserProfile::new(
                id,
                handle,
                name,
                format!("{handle}@example.com"),
            ))?;
            ids.push(id);
        }
        let [owner, admin, member, colleague, outsider] = ids.as_slice() else {
            eyre::bail!("expected five seeded users");
        };

        let teams = Arc::new(InMemoryTeamRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());

        let team_service: Teams =
            TeamMembershipService::new(Arc::clone(&teams), Arc::clone(&directory), Arc::clone(&clock));
        let team = team_service.create_team(*owner, "Platform").await?;
        for user in [admin, member, colleague] {
            team_service.add_member(team.id(), *owner, *user).await?;
        }
        team_service
            .change_role(team.id(), *owner, *admin, "admin")
            .await?;

        let project_service: Projects = ProjectService::new(
            Arc::clone(&teams),
            Arc::clone(&projects),
            Arc::clone(&tasks),
            Arc::clone(&clock),
        );
        let project = project_service
            .create_project(team.id(), *owner, "Launch")
            .await?;

        Ok(Self {
            clock,
            teams,
            projects,
            tasks,
            directory,
            owner: *owner,
            admin: *admin,
            member: *member,
            colleague: *colleague,
            outsider: *outsider,
            team_id: team.id(),
            project_id: project.id(),
        })
    }

    pub(crate) fn team_service(&self) -> Teams {
        TeamMembershipService::new(
            Arc::clone(&self.teams),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn project_service(&self) -> Projects {
        ProjectService::new(
            Arc::clone(&self.teams),
            Arc::clone(&self.projects),
            Arc::clone(&self.tasks),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn task_service(&self) -> Tasks {
        self.task_service_with(EngineConfig::default())
    }

    pub(crate) fn task_service_with(&self, config: EngineConfig) -> Tasks {
        TaskLifecycleService::with_config(
            Arc::clone(&self.teams),
            Arc::clone(&self.projects),
            Arc::clone(&self.tasks),
            Arc::clone(&self.clock),
            config,
        )
    }

    pub(crate) fn statistics_service(&self) -> Statistics {
        TaskStatisticsService::new(
            Arc::clone(&self.teams),
            Arc::clone(&self.projects),
            Arc::clone(&self.tasks),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
            &EngineConfig::default(),
        )
    }
}

/// Wraps an in-memory store and fails its next `failures` writes of one
/// kind: team and project `update`, task `delete`. Everything else
/// delegates.
pub(crate) struct Faulty<R> {
    inner: Arc<R>,
    failures: AtomicUsize,
}

impl<R> Faulty<R> {
    pub(crate) const fn new(inner: Arc<R>, failures: usize) -> Self {
        Self {
            inner,
            failures: AtomicUsize::new(failures),
        }
    }

    fn trips(&self) -> bool {
        self.failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

fn injected() -> std::io::Error {
    std::io::Error::other("injected failure")
}

#[async_trait]
impl TeamRepository for Faulty<InMemoryTeamRepository> {
    async fn store(&self, team: &Team) -> TeamRepositoryResult<()> {
        self.inner.store(team).await
    }

    async fn update(&self, team: &Team) -> TeamRepositoryResult<()> {
        if self.trips() {
            return Err(TeamRepositoryError::persistence(injected()));
        }
        self.inner.update(team).await
    }

    async fn delete(&self, id: TeamId) -> TeamRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>> {
        self.inner.find_by_id(id).await
    }

    async fn find_containing_project(
        &self,
        project_id: ProjectId,
    ) -> TeamRepositoryResult<Option<Team>> {
        self.inner.find_containing_project(project_id).await
    }

    async fn list_for_member(&self, user_id: UserId) -> TeamRepositoryResult<Vec<Team>> {
        self.inner.list_for_member(user_id).await
    }
}

#[async_trait]
impl ProjectRepository for Faulty<InMemoryProjectRepository> {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        self.inner.store(project).await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        if self.trips() {
            return Err(ProjectRepositoryError::persistence(injected()));
        }
        self.inner.update(project).await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.inner.find_by_id(id).await
    }

    async fn find_containing_task(
        &self,
        task_id: TaskId,
    ) -> ProjectRepositoryResult<Option<Project>> {
        self.inner.find_containing_task(task_id).await
    }
}

#[async_trait]
impl TaskRepository for Faulty<InMemoryTaskRepository> {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.store(task).await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.update(task).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        if self.trips() {
            return Err(TaskRepositoryError::persistence(injected()));
        }
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn find_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_many(ids).await
    }
}
