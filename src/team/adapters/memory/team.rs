//! In-memory repository for teams.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    project::domain::ProjectId,
    team::{
        domain::{Team, TeamId},
        ports::{TeamRepository, TeamRepositoryError, TeamRepositoryResult},
    },
    user::domain::UserId,
};

/// Thread-safe in-memory team repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamRepository {
    state: Arc<RwLock<InMemoryTeamState>>,
}

#[derive(Debug, Default)]
struct InMemoryTeamState {
    teams: HashMap<TeamId, Team>,
    project_index: HashMap<ProjectId, TeamId>,
}

impl InMemoryTeamRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TeamRepositoryError {
    TeamRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn reindex(state: &mut InMemoryTeamState, previous: Option<&Team>, team: &Team) {
    if let Some(old) = previous {
        for project_id in old.projects() {
            state.project_index.remove(project_id);
        }
    }
    for project_id in team.projects() {
        state.project_index.insert(*project_id, team.id());
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn store(&self, team: &Team) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.teams.contains_key(&team.id()) {
            return Err(TeamRepositoryError::DuplicateTeam(team.id()));
        }
        reindex(&mut state, None, team);
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn update(&self, team: &Team) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let previous = state
            .teams
            .get(&team.id())
            .ok_or(TeamRepositoryError::NotFound(team.id()))?
            .clone();

        if previous.version().saturating_add(1) != team.version() {
            return Err(TeamRepositoryError::VersionConflict {
                id: team.id(),
                stored: previous.version(),
                received: team.version(),
            });
        }

        reindex(&mut state, Some(&previous), team);
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn delete(&self, id: TeamId) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .teams
            .remove(&id)
            .ok_or(TeamRepositoryError::NotFound(id))?;
        for project_id in removed.projects() {
            state.project_index.remove(project_id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.teams.get(&id).cloned())
    }

    async fn find_containing_project(
        &self,
        project_id: ProjectId,
    ) -> TeamRepositoryResult<Option<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        let team = state
            .project_index
            .get(&project_id)
            .and_then(|team_id| state.teams.get(team_id))
            .cloned();
        Ok(team)
    }

    async fn list_for_member(&self, user_id: UserId) -> TeamRepositoryResult<Vec<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut teams: Vec<Team> = state
            .teams
            .values()
            .filter(|team| team.is_member(user_id))
            .cloned()
            .collect();
        teams.sort_by_key(Team::created_at);
        Ok(teams)
    }
}
