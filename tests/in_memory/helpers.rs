//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use teamboard::{
    config::EngineConfig,
    project::{adapters::memory::InMemoryProjectRepository, domain::ProjectId, services::ProjectService},
    statistics::services::TaskStatisticsService,
    task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService},
    team::{adapters::memory::InMemoryTeamRepository, domain::TeamId, services::TeamMembershipService},
    user::{
        adapters::memory::InMemoryUserDirectory,
        domain::{UserId, UserProfile},
    },
};

/// Team service over in-memory adapters.
pub type Teams = TeamMembershipService<InMemoryTeamRepository, InMemoryUserDirectory, DefaultClock>;
/// Project service over in-memory adapters.
pub type Projects = ProjectService<
    InMemoryTeamRepository,
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    DefaultClock,
>;
/// Task service over in-memory adapters.
pub type Tasks = TaskLifecycleService<
    InMemoryTeamRepository,
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    DefaultClock,
>;
/// Statistics service over in-memory adapters.
pub type Statistics = TaskStatisticsService<
    InMemoryTeamRepository,
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Services and seeded identifiers shared by the integration tests.
pub struct Workspace {
    pub teams: Teams,
    pub projects: Projects,
    pub tasks: Tasks,
    pub statistics: Statistics,
    pub task_repo: Arc<InMemoryTaskRepository>,
    pub directory: Arc<InMemoryUserDirectory>,
    pub owner: UserId,
    pub admin: UserId,
    pub member: UserId,
    pub colleague: UserId,
    pub outsider: UserId,
    pub team_id: TeamId,
    pub project_id: ProjectId,
}

/// Registers a user whose display name is the capitalised handle.
///
/// # Errors
///
/// Returns an error when the handle is already taken.
pub fn register(directory: &InMemoryUserDirectory, handle: &str) -> eyre::Result<UserId> {
    let id = UserId::new();
    let mut chars = handle.chars();
    let display = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect::<String>())
        .unwrap_or_default();
    directory.register(UserProfile::new(
        id,
        handle,
        display,
        format!("{handle}@example.com"),
    ))?;
    Ok(id)
}

/// Builds a workspace with one team ("Platform") and one project
/// ("Launch"). `olivia` owns the team, `adam` is admin, `mia` and `max` are
/// members and `otto` is registered but outside the team.
///
/// # Errors
///
/// Returns an error if any seeding step fails.
pub async fn workspace(config: EngineConfig) -> eyre::Result<Workspace> {
    let clock = Arc::new(DefaultClock);
    let team_repo = Arc::new(InMemoryTeamRepository::new());
    let project_repo = Arc::new(InMemoryProjectRepository::new());
    let task_repo = Arc::new(InMemoryTaskRepository::new());
    let directory = Arc::new(InMemoryUserDirectory::new());

    let owner = register(&directory, "olivia")?;
    let admin = register(&directory, "adam")?;
    let member = register(&directory, "mia")?;
    let colleague = register(&directory, "max")?;
    let outsider = register(&directory, "otto")?;

    let teams = TeamMembershipService::with_config(
        Arc::clone(&team_repo),
        Arc::clone(&directory),
        Arc::clone(&clock),
        &config,
    );
    let projects = ProjectService::new(
        Arc::clone(&team_repo),
        Arc::clone(&project_repo),
        Arc::clone(&task_repo),
        Arc::clone(&clock),
    );
    let tasks = TaskLifecycleService::with_config(
        Arc::clone(&team_repo),
        Arc::clone(&project_repo),
        Arc::clone(&task_repo),
        Arc::clone(&clock),
        config.clone(),
    );
    let statistics = TaskStatisticsService::new(
        Arc::clone(&team_repo),
        Arc::clone(&project_repo),
        Arc::clone(&task_repo),
        Arc::clone(&directory),
        Arc::clone(&clock),
        &config,
    );

    let team = teams.create_team(owner, "Platform").await?;
    teams.add_member_by_handle(team.id(), owner, "adam").await?;
    teams.change_role(team.id(), owner, admin, "admin").await?;
    teams.add_member_by_handle(team.id(), admin, "mia").await?;
    teams.add_member(team.id(), admin, colleague).await?;
    let project = projects.create_project(team.id(), owner, "Launch").await?;

    Ok(Workspace {
        teams,
        projects,
        tasks,
        statistics,
        task_repo,
        directory,
        owner,
        admin,
        member,
        colleague,
        outsider,
        team_id: team.id(),
        project_id: project.id(),
    })
}
