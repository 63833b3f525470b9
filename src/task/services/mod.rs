//! Service layer for task lifecycle orchestration.

mod lifecycle;
mod requests;

pub use lifecycle::{TaskLifecycleService, TaskServiceError, TaskServiceResult};
pub use requests::{CreateTaskRequest, SubtaskMutation, UpdateTaskRequest};
