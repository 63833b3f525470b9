//! Domain model for the task lifecycle.
//!
//! The task aggregate owns its status, assignment, subtasks and the
//! append-only audit log. Status changes are gated by the role-keyed
//! [`transition`] table; every successful mutation appends exactly one log
//! entry.

mod error;
mod flag;
mod log;
mod status;
mod subtask;
mod task;
pub mod transition;

pub use error::{
    ParseSubtaskStatusError, ParseTaskFlagError, ParseTaskStatusError, TaskDomainError,
};
pub use flag::TaskFlag;
pub use log::{LogAction, TaskLogEntry};
pub use status::TaskStatus;
pub use subtask::{Subtask, SubtaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskDetailsUpdate};
pub use transition::TransitionActor;

crate::ids::uuid_id! {
    /// Unique identifier for a task.
    TaskId
}

crate::ids::uuid_id! {
    /// Identifier of a subtask, unique within its task.
    SubtaskId
}
