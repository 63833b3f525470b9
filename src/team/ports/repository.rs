//! Repository port for team persistence and reverse project lookup.

use crate::{
    error::ErrorKind,
    project::domain::ProjectId,
    team::domain::{Team, TeamId},
    user::domain::UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for team repository operations.
pub type TeamRepositoryResult<T> = Result<T, TeamRepositoryError>;

/// Team persistence contract.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores a new team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::DuplicateTeam`] when the identifier
    /// already exists.
    async fn store(&self, team: &Team) -> TeamRepositoryResult<()>;

    /// Persists a mutated team as a whole-document write.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::NotFound`] when the team does not exist
    /// and [`TeamRepositoryError::VersionConflict`] when the team's version
    /// is not exactly one past the stored version.
    async fn update(&self, team: &Team) -> TeamRepositoryResult<()>;

    /// Deletes a team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::NotFound`] when the team does not exist.
    async fn delete(&self, id: TeamId) -> TeamRepositoryResult<()>;

    /// Finds a team by identifier.
    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>>;

    /// Finds the team whose project list contains `project_id`.
    async fn find_containing_project(
        &self,
        project_id: ProjectId,
    ) -> TeamRepositoryResult<Option<Team>>;

    /// Returns every team `user_id` belongs to, regardless of role.
    async fn list_for_member(&self, user_id: UserId) -> TeamRepositoryResult<Vec<Team>>;
}

/// Errors returned by team repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TeamRepositoryError {
    /// A team with the same identifier already exists.
    #[error("duplicate team identifier: {0}")]
    DuplicateTeam(TeamId),

    /// The team was not found.
    #[error("team not found: {0}")]
    NotFound(TeamId),

    /// The team was modified concurrently.
    #[error("team {id} was modified concurrently (stored version {stored}, received {received})")]
    VersionConflict {
        /// Team identifier.
        id: TeamId,
        /// Version currently stored.
        stored: u64,
        /// Version carried by the rejected write.
        received: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TeamRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateTeam(_) | Self::VersionConflict { .. } => ErrorKind::Conflict,
            Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
