//! Repository port for task persistence and batch lookup.

use crate::{
    error::ErrorKind,
    task::domain::{Task, TaskId},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status, assignment, subtasks,
    /// log).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// and [`TaskRepositoryError::VersionConflict`] when another writer got
    /// there first.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Loads the tasks named by `ids` in the given order, skipping dangling
    /// references.
    async fn find_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task was modified concurrently.
    #[error("task {id} was modified concurrently (stored version {stored}, received {received})")]
    VersionConflict {
        /// Task identifier.
        id: TaskId,
        /// Version currently stored.
        stored: u64,
        /// Version carried by the rejected write.
        received: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateTask(_) | Self::VersionConflict { .. } => ErrorKind::Conflict,
            Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
