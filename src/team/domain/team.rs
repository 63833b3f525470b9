//! Team aggregate root.

use super::{Membership, Role, TeamDomainError, TeamId};
use crate::{project::domain::ProjectId, user::domain::UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Team aggregate root.
///
/// Invariants: at least one member holds [`Role::Owner`], and a user appears
/// at most once in the membership list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    members: Vec<Membership>,
    projects: Vec<ProjectId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

/// Parameter object for reconstructing a persisted team aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTeamData {
    /// Persisted team identifier.
    pub id: TeamId,
    /// Persisted team name.
    pub name: String,
    /// Persisted membership list, in join order.
    pub members: Vec<Membership>,
    /// Persisted project references.
    pub projects: Vec<ProjectId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
}

impl Team {
    /// Creates a team whose only member is `creator`, holding the owner role.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::EmptyTeamName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        creator: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TeamDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: TeamId::new(),
            name: validated_name(name)?,
            members: vec![Membership::new(creator, Role::Owner, timestamp)],
            projects: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
            version: 1,
        })
    }

    /// Reconstructs a team from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTeamData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            members: data.members,
            projects: data.projects,
            created_at: data.created_at,
            updated_at: data.updated_at,
            version: data.version,
        }
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the membership list in join order.
    #[must_use]
    pub fn members(&self) -> &[Membership] {
        &self.members
    }

    /// Returns the projects owned by the team.
    #[must_use]
    pub fn projects(&self) -> &[ProjectId] {
        &self.projects
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

    /// Returns the optimistic-concurrency version. Every successful mutation
    /// advances it by one.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the membership entry of `user_id`, if any.
    #[must_use]
    pub fn membership(&self, user_id: UserId) -> Option<&Membership> {
        self.members.iter().find(|entry| entry.user_id() == user_id)
    }

    /// Returns the role `user_id` holds in this team, or `None` when the
    /// user is not a member.
    #[must_use]
    pub fn role_of(&self, user_id: UserId) -> Option<Role> {
        self.membership(user_id).map(Membership::role)
    }

    /// Returns `true` when `user_id` is a member.
    #[must_use]
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.membership(user_id).is_some()
    }

    /// Returns the number of members holding the owner role.
    #[must_use]
    pub fn owner_count(&self) -> usize {
        self.members
            .iter()
            .filter(|entry| entry.role().is_owner())
            .count()
    }

    /// Returns `true` when the project belongs to this team.
    #[must_use]
    pub fn owns_project(&self, project_id: ProjectId) -> bool {
        self.projects.contains(&project_id)
    }

    /// Renames the team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::EmptyTeamName`] when the name is blank.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TeamDomainError> {
        self.name = validated_name(name)?;
        self.touch(clock);
        Ok(())
    }

    /// Adds `user_id` with the member role.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::AlreadyMember`] when the user already
    /// belongs to the team.
    pub fn add_member(
        &mut self,
        user_id: UserId,
        clock: &impl Clock,
    ) -> Result<(), TeamDomainError> {
        if self.is_member(user_id) {
            return Err(TeamDomainError::AlreadyMember(user_id));
        }
        self.members
            .push(Membership::new(user_id, Role::Member, clock.utc()));
        self.touch(clock);
        Ok(())
    }

    /// Removes `target` from the team on behalf of `actor`.
    ///
    /// Members may only remove themselves. Admins may remove members and
    /// themselves but neither owners nor other admins. Owners may remove
    /// anyone, provided at least one owner remains.
    ///
    /// # Errors
    ///
    /// Returns a permission variant of [`TeamDomainError`] when the actor's
    /// role forbids the removal, [`TeamDomainError::MemberNotFound`] when the
    /// target is not a member and [`TeamDomainError::LastOwnerRemoval`] when
    /// the target is the only owner.
    pub fn remove_member(
        &mut self,
        actor: UserId,
        target: UserId,
        clock: &impl Clock,
    ) -> Result<Membership, TeamDomainError> {
        let actor_role = self.actor_role(actor)?;
        let (index, target_role) = self.locate(target)?;
        let is_self = actor == target;

        match actor_role {
            Role::Member if !is_self => return Err(TeamDomainError::MemberMayOnlyRemoveSelf),
            Role::Admin if target_role.is_owner() => {
                return Err(TeamDomainError::AdminCannotRemoveOwner);
            }
            Role::Admin if target_role == Role::Admin && !is_self => {
                return Err(TeamDomainError::AdminCannotRemoveOtherAdmin);
            }
            _ => {}
        }

        if target_role.is_owner() && self.owner_count() <= 1 {
            return Err(TeamDomainError::LastOwnerRemoval);
        }

        let removed = self.members.remove(index);
        self.touch(clock);
        Ok(removed)
    }

    /// Changes the role of `target` on behalf of `actor` and returns the
    /// previous role.
    ///
    /// Members can never change roles. Admins cannot touch owners, cannot
    /// grant the owner role and cannot change other admins. Nobody may leave
    /// the team without an owner.
    ///
    /// # Errors
    ///
    /// Returns a permission variant of [`TeamDomainError`] when the actor's
    /// role forbids the change, [`TeamDomainError::MemberNotFound`] when the
    /// target is not a member, and [`TeamDomainError::LastOwnerSelfDemotion`]
    /// or [`TeamDomainError::LastOwnerDemotion`] when the last owner would be
    /// demoted.
    pub fn change_role(
        &mut self,
        actor: UserId,
        target: UserId,
        new_role: Role,
        clock: &impl Clock,
    ) -> Result<Role, TeamDomainError> {
        let actor_role = self.actor_role(actor)?;
        let (index, current_role) = self.locate(target)?;
        let is_self = actor == target;

        match actor_role {
            Role::Member => return Err(TeamDomainError::MemberCannotChangeRoles),
            Role::Admin if current_role.is_owner() => {
                return Err(TeamDomainError::AdminCannotChangeOwner);
            }
            Role::Admin if new_role.is_owner() => {
                return Err(TeamDomainError::AdminCannotPromoteToOwner);
            }
            Role::Admin if current_role == Role::Admin && !is_self => {
                return Err(TeamDomainError::AdminCannotChangeOtherAdmin);
            }
            _ => {}
        }

        if current_role.is_owner() && !new_role.is_owner() && self.owner_count() <= 1 {
            return Err(if is_self {
                TeamDomainError::LastOwnerSelfDemotion
            } else {
                TeamDomainError::LastOwnerDemotion
            });
        }

        if let Some(entry) = self.members.get_mut(index) {
            entry.set_role(new_role);
        }
        self.touch(clock);
        Ok(current_role)
    }

    /// Records a newly created project as owned by this team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::ProjectAlreadyAttached`] when the project
    /// is already listed.
    pub fn attach_project(
        &mut self,
        project_id: ProjectId,
        clock: &impl Clock,
    ) -> Result<(), TeamDomainError> {
        if self.owns_project(project_id) {
            return Err(TeamDomainError::ProjectAlreadyAttached(project_id));
        }
        self.projects.push(project_id);
        self.touch(clock);
        Ok(())
    }

    /// Removes a project reference. Returns `false` without modifying the
    /// team when the project was not listed.
    pub fn detach_project(&mut self, project_id: ProjectId, clock: &impl Clock) -> bool {
        let before = self.projects.len();
        self.projects.retain(|id| *id != project_id);
        let detached = self.projects.len() != before;
        if detached {
            self.touch(clock);
        }
        detached
    }

    /// Checks that the team may be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::TeamHasProjects`] while projects remain.
    pub fn ensure_deletable(&self) -> Result<(), TeamDomainError> {
        if self.projects.is_empty() {
            return Ok(());
        }
        Err(TeamDomainError::TeamHasProjects {
            team_id: self.id,
            count: self.projects.len(),
        })
    }

    fn actor_role(&self, actor: UserId) -> Result<Role, TeamDomainError> {
        self.role_of(actor).ok_or(TeamDomainError::ActorNotMember {
            team_id: self.id,
            actor,
        })
    }

    fn locate(&self, user_id: UserId) -> Result<(usize, Role), TeamDomainError> {
        self.members
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.user_id() == user_id)
            .map(|(index, entry)| (index, entry.role()))
            .ok_or(TeamDomainError::MemberNotFound(user_id))
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.saturating_add(1);
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, TeamDomainError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TeamDomainError::EmptyTeamName);
    }
    Ok(trimmed.to_owned())
}
