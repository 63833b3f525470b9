//! In-memory repository for tasks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        let stored = tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .version();
        if stored.saturating_add(1) != task.version() {
            return Err(TaskRepositoryError::VersionConflict {
                id: task.id(),
                stored,
                received: task.version(),
            });
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(ids.iter().filter_map(|id| tasks.get(id).cloned()).collect())
    }
}
