//! Task aggregate root.

use super::{
    LogAction, Subtask, SubtaskId, SubtaskStatus, TaskDomainError, TaskFlag, TaskId,
    TaskLogEntry, TaskStatus, TransitionActor, transition,
};
use crate::{team::domain::Role, user::domain::UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    deadline: Option<DateTime<Utc>>,
    flag: TaskFlag,
    assignee: Option<UserId>,
    subtasks: Vec<(String, SubtaskStatus)>,
    attachments: Vec<String>,
}

impl NewTask {
    /// Creates task input with the given title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: validated_title(title)?,
            description: None,
            deadline: None,
            flag: TaskFlag::None,
            assignee: None,
            subtasks: Vec::new(),
            attachments: Vec::new(),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the priority flag.
    #[must_use]
    pub const fn with_flag(mut self, flag: TaskFlag) -> Self {
        self.flag = flag;
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Appends an initial subtask.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubtaskTitle`] when the title is
    /// blank.
    pub fn with_subtask(
        mut self,
        title: impl Into<String>,
        status: SubtaskStatus,
    ) -> Result<Self, TaskDomainError> {
        self.subtasks.push((validated_subtask_title(title)?, status));
        Ok(self)
    }

    /// Sets the attachment references.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = String>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Returns the requested assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }
}

/// Editable task details. Fields left as `None` are kept.
///
/// Status and assignee change only through the lifecycle operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDetailsUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Replacement attachment list.
    pub attachments: Option<Vec<String>>,
}

impl TaskDetailsUpdate {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.attachments.is_none()
    }
}

/// Task aggregate root.
///
/// Invariants: `closed_at` is set exactly when the status is completed or
/// closed, and the log grows by one entry per successful mutation (two for
/// a task created with an assignee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    deadline: Option<DateTime<Utc>>,
    status: TaskStatus,
    flag: TaskFlag,
    assignee: Option<UserId>,
    subtasks: Vec<Subtask>,
    attachments: Vec<String>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    logs: Vec<TaskLogEntry>,
    version: u64,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted flag.
    pub flag: TaskFlag,
    /// Persisted assignee.
    pub assignee: Option<UserId>,
    /// Persisted subtasks.
    pub subtasks: Vec<Subtask>,
    /// Persisted attachment references.
    pub attachments: Vec<String>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted close timestamp.
    pub closed_at: Option<DateTime<Utc>>,
    /// Persisted audit log.
    pub logs: Vec<TaskLogEntry>,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
}

impl Task {
    /// Creates a task in the created status, or in the assigned status when
    /// the input carries an assignee.
    ///
    /// A `created` log entry is always written; an `assigned` entry follows
    /// when an assignee is present.
    #[must_use]
    pub fn new(input: NewTask, creator: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let mut logs = vec![TaskLogEntry::new(
            LogAction::Created,
            timestamp,
            creator,
            "Task created",
        )];
        let status = if input.assignee.is_some() {
            logs.push(TaskLogEntry::new(
                LogAction::Assigned,
                timestamp,
                creator,
                "Task assigned during creation",
            ));
            TaskStatus::Assigned
        } else {
            TaskStatus::Created
        };

        Self {
            id: TaskId::new(),
            title: input.title,
            description: input.description,
            deadline: input.deadline,
            status,
            flag: input.flag,
            assignee: input.assignee,
            subtasks: input
                .subtasks
                .into_iter()
                .map(|(title, subtask_status)| Subtask::new(title, subtask_status))
                .collect(),
            attachments: input.attachments,
            created_by: creator,
            created_at: timestamp,
            updated_at: timestamp,
            closed_at: None,
            logs,
            version: 1,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            deadline: data.deadline,
            status: data.status,
            flag: data.flag,
            assignee: data.assignee,
            subtasks: data.subtasks,
            attachments: data.attachments,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
            closed_at: data.closed_at,
            logs: data.logs,
            version: data.version,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority flag.
    #[must_use]
    pub const fn flag(&self) -> TaskFlag {
        self.flag
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the subtasks in insertion order.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the attachment references.
    #[must_use]
    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the task entered completed or closed.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns the audit log, oldest first.
    #[must_use]
    pub fn logs(&self) -> &[TaskLogEntry] {
        &self.logs
    }

    /// Returns the optimistic-concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Moves the task to `to` on behalf of `actor` holding `role`, returning
    /// the previous status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TransitionForbidden`] when the table does
    /// not list the move for the role, and [`TaskDomainError::NotAssignee`]
    /// when a member moves a task assigned to somebody else.
    pub fn transition(
        &mut self,
        actor: UserId,
        role: Role,
        to: TaskStatus,
        clock: &impl Clock,
    ) -> Result<TaskStatus, TaskDomainError> {
        let from = self.status;
        let column = TransitionActor::from(role);
        if !transition::permits(column, from, to) {
            return Err(TaskDomainError::TransitionForbidden {
                task_id: self.id,
                role,
                from,
                to,
            });
        }
        if column == TransitionActor::Member && self.assignee != Some(actor) {
            return Err(TaskDomainError::NotAssignee {
                task_id: self.id,
                actor,
            });
        }
        self.apply_status(to, actor, clock);
        Ok(from)
    }

    /// Flips between completed and pending without consulting the
    /// transition table. Returns the new status.
    pub fn toggle_completion(&mut self, actor: UserId, clock: &impl Clock) -> TaskStatus {
        let target = if self.status == TaskStatus::Completed {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };
        self.apply_status(target, actor, clock);
        target
    }

    /// Assigns the task to `assignee` and forces the assigned status.
    /// Returns the previous assignee.
    pub fn assign(
        &mut self,
        assignee: UserId,
        actor: UserId,
        clock: &impl Clock,
    ) -> Option<UserId> {
        let previous = self.assignee.replace(assignee);
        self.status = TaskStatus::Assigned;
        self.closed_at = None;
        self.record(
            LogAction::Assigned,
            actor,
            format!("Task assigned to member {assignee}"),
            clock,
        );
        previous
    }

    /// Clears the assignee without changing the status. Returns the previous
    /// assignee.
    pub fn unassign(&mut self, actor: UserId, clock: &impl Clock) -> Option<UserId> {
        let previous = self.assignee.take();
        self.record(LogAction::Assigned, actor, "Task unassigned", clock);
        previous
    }

    /// Lets `actor` claim an unassigned task in the created status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyAssigned`] when somebody holds the
    /// task and [`TaskDomainError::NotTakeable`] when the status is not
    /// created.
    pub fn take(&mut self, actor: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.assignee.is_some() {
            return Err(TaskDomainError::AlreadyAssigned(self.id));
        }
        if self.status != TaskStatus::Created {
            return Err(TaskDomainError::NotTakeable {
                task_id: self.id,
                status: self.status,
            });
        }
        self.assignee = Some(actor);
        self.status = TaskStatus::Assigned;
        self.record(LogAction::Assigned, actor, "Member took the task", clock);
        Ok(())
    }

    /// Replaces the priority flag and returns the previous one.
    pub fn set_flag(&mut self, flag: TaskFlag, actor: UserId, clock: &impl Clock) -> TaskFlag {
        let previous = self.flag;
        self.flag = flag;
        self.record(
            LogAction::from(self.status),
            actor,
            format!("Flag changed from {previous} to {flag}"),
            clock,
        );
        previous
    }

    /// Appends a subtask and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubtaskTitle`] when the title is
    /// blank.
    pub fn add_subtask(
        &mut self,
        title: impl Into<String>,
        status: SubtaskStatus,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<SubtaskId, TaskDomainError> {
        let subtask = Subtask::new(validated_subtask_title(title)?, status);
        let id = subtask.id();
        let details = format!("Subtask \"{}\" added", subtask.title());
        self.subtasks.push(subtask);
        self.record(LogAction::SubtaskAdded, actor, details, clock);
        Ok(id)
    }

    /// Edits a subtask's title and/or status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SubtaskNotFound`] for an unknown subtask
    /// and [`TaskDomainError::EmptySubtaskTitle`] for a blank title.
    pub fn modify_subtask(
        &mut self,
        subtask_id: SubtaskId,
        title: Option<String>,
        status: Option<SubtaskStatus>,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let next_title = title.map(validated_subtask_title).transpose()?;
        let subtask = self
            .subtasks
            .iter_mut()
            .find(|entry| entry.id() == subtask_id)
            .ok_or(TaskDomainError::SubtaskNotFound(subtask_id))?;
        if let Some(value) = next_title {
            subtask.set_title(value);
        }
        if let Some(next_status) = status {
            subtask.set_status(next_status);
        }
        let details = format!("Subtask \"{}\" modified", subtask.title());
        self.record(LogAction::SubtaskModified, actor, details, clock);
        Ok(())
    }

    /// Removes a subtask and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SubtaskNotFound`] for an unknown subtask.
    pub fn delete_subtask(
        &mut self,
        subtask_id: SubtaskId,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<Subtask, TaskDomainError> {
        let index = self
            .subtasks
            .iter()
            .position(|entry| entry.id() == subtask_id)
            .ok_or(TaskDomainError::SubtaskNotFound(subtask_id))?;
        let removed = self.subtasks.remove(index);
        let details = format!("Subtask \"{}\" deleted", removed.title());
        self.record(LogAction::SubtaskDeleted, actor, details, clock);
        Ok(removed)
    }

    /// Applies a details update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when a replacement title is
    /// blank.
    pub fn update_details(
        &mut self,
        update: TaskDetailsUpdate,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(next_title) = update.title.map(validated_title).transpose()? {
            self.title = next_title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(deadline) = update.deadline {
            self.deadline = Some(deadline);
        }
        if let Some(attachments) = update.attachments {
            self.attachments = attachments;
        }
        self.record(LogAction::from(self.status), actor, "Task updated", clock);
        Ok(())
    }

    fn apply_status(&mut self, to: TaskStatus, actor: UserId, clock: &impl Clock) {
        let from = self.status;
        self.status = to;
        self.closed_at = to.is_closed().then(|| clock.utc());
        self.record(
            LogAction::from(to),
            actor,
            format!("Status changed from {from} to {to}"),
            clock,
        );
    }

    fn record(
        &mut self,
        action: LogAction,
        actor: UserId,
        details: impl Into<String>,
        clock: &impl Clock,
    ) {
        let timestamp = clock.utc();
        self.logs
            .push(TaskLogEntry::new(action, timestamp, actor, details));
        self.updated_at = timestamp;
        self.version = self.version.saturating_add(1);
    }
}

fn validated_title(title: impl Into<String>) -> Result<String, TaskDomainError> {
    let raw = title.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn validated_subtask_title(title: impl Into<String>) -> Result<String, TaskDomainError> {
    let raw = title.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptySubtaskTitle);
    }
    Ok(trimmed.to_owned())
}
