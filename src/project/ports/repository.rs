//! Repository port for project persistence and reverse task lookup.

use crate::{
    error::ErrorKind,
    project::domain::{Project, ProjectId},
    task::domain::TaskId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the
    /// identifier already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Persists a mutated project as a whole-document write.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist and [`ProjectRepositoryError::VersionConflict`] when the
    /// project's version is not exactly one past the stored version.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Deletes a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Finds the project whose task list contains `task_id`.
    async fn find_containing_task(&self, task_id: TaskId)
    -> ProjectRepositoryResult<Option<Project>>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The project was modified concurrently.
    #[error(
        "project {id} was modified concurrently (stored version {stored}, received {received})"
    )]
    VersionConflict {
        /// Project identifier.
        id: ProjectId,
        /// Version currently stored.
        stored: u64,
        /// Version carried by the rejected write.
        received: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateProject(_) | Self::VersionConflict { .. } => ErrorKind::Conflict,
            Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
