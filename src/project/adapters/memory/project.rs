//! In-memory repository for projects.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    project::{
        domain::{Project, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    },
    task::domain::TaskId,
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    task_index: HashMap<TaskId, ProjectId>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn reindex(state: &mut InMemoryProjectState, previous: Option<&Project>, project: &Project) {
    if let Some(old) = previous {
        for task_id in old.tasks() {
            state.task_index.remove(task_id);
        }
    }
    for task_id in project.tasks() {
        state.task_index.insert(*task_id, project.id());
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        reindex(&mut state, None, project);
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let previous = state
            .projects
            .get(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?
            .clone();

        if previous.version().saturating_add(1) != project.version() {
            return Err(ProjectRepositoryError::VersionConflict {
                id: project.id(),
                stored: previous.version(),
                received: project.version(),
            });
        }

        reindex(&mut state, Some(&previous), project);
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .projects
            .remove(&id)
            .ok_or(ProjectRepositoryError::NotFound(id))?;
        for task_id in removed.tasks() {
            state.task_index.remove(task_id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_containing_task(
        &self,
        task_id: TaskId,
    ) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        let project = state
            .task_index
            .get(&task_id)
            .and_then(|project_id| state.projects.get(project_id))
            .cloned();
        Ok(project)
    }
}
