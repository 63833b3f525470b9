//! Project aggregate root.

use super::{ProjectDomainError, ProjectId};
use crate::{task::domain::TaskId, team::domain::Team, user::domain::UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    tasks: Vec<TaskId>,
    assigned_members: Vec<UserId>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: String,
    /// Persisted task references, in creation order.
    pub tasks: Vec<TaskId>,
    /// Persisted assigned members.
    pub assigned_members: Vec<UserId>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
}

impl Project {
    /// Creates an empty project with no tasks and no assigned members.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the name is
    /// blank.
    pub fn new(
        name: impl Into<String>,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name: validated_name(name)?,
            tasks: Vec::new(),
            assigned_members: Vec::new(),
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
            version: 1,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            tasks: data.tasks,
            assigned_members: data.assigned_members,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
            version: data.version,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task references in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    /// Returns the members assigned to the project.
    #[must_use]
    pub fn assigned_members(&self) -> &[UserId] {
        &self.assigned_members
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

    /// Returns the optimistic-concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` when the task belongs to this project.
    #[must_use]
    pub fn contains_task(&self, task_id: TaskId) -> bool {
        self.tasks.contains(&task_id)
    }

    /// Renames the project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the name is
    /// blank.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.name = validated_name(name)?;
        self.touch(clock);
        Ok(())
    }

    /// Appends a task reference.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::TaskAlreadyAttached`] when the task is
    /// already listed.
    pub fn attach_task(
        &mut self,
        task_id: TaskId,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if self.contains_task(task_id) {
            return Err(ProjectDomainError::TaskAlreadyAttached(task_id));
        }
        self.tasks.push(task_id);
        self.touch(clock);
        Ok(())
    }

    /// Removes a task reference. Returns `false` without modifying the
    /// project when the task was not listed.
    pub fn detach_task(&mut self, task_id: TaskId, clock: &impl Clock) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|id| *id != task_id);
        let detached = self.tasks.len() != before;
        if detached {
            self.touch(clock);
        }
        detached
    }

    /// Assigns team members to the project and returns the identifiers that
    /// were newly added.
    ///
    /// Every identifier is validated against `team` before anything is
    /// applied. Identifiers already assigned are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NotATeamMember`] for the first
    /// identifier that is not a member of `team`.
    pub fn assign_members(
        &mut self,
        team: &Team,
        member_ids: &[UserId],
        clock: &impl Clock,
    ) -> Result<Vec<UserId>, ProjectDomainError> {
        if let Some(outsider) = member_ids.iter().find(|id| !team.is_member(**id)) {
            return Err(ProjectDomainError::NotATeamMember(*outsider));
        }

        let mut added = Vec::new();
        for member_id in member_ids {
            if !self.assigned_members.contains(member_id) && !added.contains(member_id) {
                added.push(*member_id);
            }
        }
        self.assigned_members.extend(added.iter().copied());
        self.touch(clock);
        Ok(added)
    }

    /// Removes the given identifiers from the assigned members and returns
    /// how many were removed. Unknown identifiers are ignored.
    pub fn remove_members(&mut self, member_ids: &[UserId], clock: &impl Clock) -> usize {
        let before = self.assigned_members.len();
        self.assigned_members.retain(|id| !member_ids.contains(id));
        self.touch(clock);
        before.saturating_sub(self.assigned_members.len())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.saturating_add(1);
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, ProjectDomainError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProjectDomainError::EmptyProjectName);
    }
    Ok(trimmed.to_owned())
}
