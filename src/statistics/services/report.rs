//! Access-gated project statistics.

use crate::{
    access::{domain::AccessError, services::AccessResolver},
    config::EngineConfig,
    error::ErrorKind,
    project::{domain::ProjectId, ports::ProjectRepository},
    statistics::domain::{StatisticsWindow, TaskStatistics, aggregate, member_universe},
    task::ports::{TaskRepository, TaskRepositoryError},
    team::ports::TeamRepository,
    user::{
        domain::{UserId, UserSummary},
        ports::UserDirectory,
        services::ProfileResolver,
    },
};
use mockable::Clock;
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tracing::debug;

/// Service-level errors for statistics.
#[derive(Debug, Error)]
pub enum StatisticsServiceError {
    /// Access resolution failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Loading the project's tasks failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl StatisticsServiceError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for statistics operations.
pub type StatisticsServiceResult<T> = Result<T, StatisticsServiceError>;

/// Computes project statistics for team members.
#[derive(Clone)]
pub struct TaskStatisticsService<T, P, K, U, C>
where
    T: TeamRepository,
    P: ProjectRepository,
    K: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    access: AccessResolver<T, P>,
    tasks: Arc<K>,
    profiles: ProfileResolver<U>,
    clock: Arc<C>,
    window_days: u32,
}

impl<T, P, K, U, C> TaskStatisticsService<T, P, K, U, C>
where
    T: TeamRepository,
    P: ProjectRepository,
    K: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a statistics service.
    #[must_use]
    pub fn new(
        teams: Arc<T>,
        projects: Arc<P>,
        tasks: Arc<K>,
        directory: Arc<U>,
        clock: Arc<C>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            access: AccessResolver::new(teams, projects),
            tasks,
            profiles: ProfileResolver::new(directory, config),
            clock,
            window_days: config.statistics_window_days,
        }
    }

    /// Aggregates statistics for a project. Any team member may read.
    ///
    /// Users the directory cannot resolve are reported with placeholder
    /// display data.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsServiceError`] when access is denied or the
    /// tasks cannot be loaded.
    pub async fn project_statistics(
        &self,
        project_id: ProjectId,
        actor: UserId,
    ) -> StatisticsServiceResult<TaskStatistics> {
        let context = self.access.for_project(project_id, actor).await?;
        let project = context
            .project()
            .ok_or(AccessError::ProjectNotFound(project_id))?;
        let tasks = self.tasks.find_many(project.tasks()).await?;

        let users = member_universe(project, &tasks);
        let summaries: HashMap<UserId, UserSummary> = self
            .profiles
            .summarize_all(&users)
            .await
            .into_iter()
            .map(|summary| (summary.user_id, summary))
            .collect();

        let window = StatisticsWindow::new(self.clock.utc().date_naive(), self.window_days);
        debug!(
            project_id = %project_id,
            actor = %actor,
            tasks = tasks.len(),
            window_end = %window.today(),
            window_days = self.window_days,
            "aggregating project statistics"
        );
        Ok(aggregate(project, &tasks, &window, |user_id| {
            summaries
                .get(&user_id)
                .cloned()
                .unwrap_or_else(|| self.profiles.placeholder(user_id))
        }))
    }
}
