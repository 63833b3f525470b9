//! Team creation, membership mutation and membership queries.

use crate::{
    access::{
        domain::{AccessContext, AccessError},
        services::{audit_gate, team_access},
    },
    config::EngineConfig,
    error::ErrorKind,
    team::{
        domain::{Membership, ParseRoleError, Role, Team, TeamDomainError, TeamId},
        ports::{TeamRepository, TeamRepositoryError},
    },
    user::{
        domain::{UserId, UserSummary},
        ports::{UserDirectory, UserDirectoryError},
        services::ProfileResolver,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Which of a user's teams to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TeamFilter {
    /// Every team the user belongs to.
    #[default]
    All,
    /// Teams where the user is an owner.
    Owned,
    /// Teams where the user is a member or admin but not an owner.
    Joined,
}

impl TeamFilter {
    const fn admits(self, role: Role) -> bool {
        match self {
            Self::All => true,
            Self::Owned => role.is_owner(),
            Self::Joined => !role.is_owner(),
        }
    }
}

/// A team member enriched with display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Membership record.
    pub membership: Membership,
    /// Display data, or placeholders when the user cannot be resolved.
    pub profile: UserSummary,
}

/// Service-level errors for team operations.
#[derive(Debug, Error)]
pub enum TeamServiceError {
    /// Access resolution or gating failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// A team rule rejected the mutation.
    #[error(transparent)]
    Domain(#[from] TeamDomainError),
    /// Team persistence failed.
    #[error(transparent)]
    Repository(#[from] TeamRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// The requested role is not a valid role.
    #[error(transparent)]
    InvalidRole(#[from] ParseRoleError),
    /// No user has the identifier.
    #[error("user not found: {0}")]
    UnknownUser(UserId),
    /// No user has the handle.
    #[error("no user with handle '{0}'")]
    UnknownHandle(String),
}

impl TeamServiceError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::Directory(err) => err.kind(),
            Self::InvalidRole(_) => ErrorKind::BadRequest,
            Self::UnknownUser(_) | Self::UnknownHandle(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for team service operations.
pub type TeamServiceResult<T> = Result<T, TeamServiceError>;

/// Team membership orchestration service.
#[derive(Clone)]
pub struct TeamMembershipService<T, U, C>
where
    T: TeamRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    teams: Arc<T>,
    profiles: ProfileResolver<U>,
    clock: Arc<C>,
}

impl<T, U, C> TeamMembershipService<T, U, C>
where
    T: TeamRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a team service with the default configuration.
    #[must_use]
    pub fn new(teams: Arc<T>, directory: Arc<U>, clock: Arc<C>) -> Self {
        Self::with_config(teams, directory, clock, &EngineConfig::default())
    }

    /// Creates a team service using the placeholders from `config`.
    #[must_use]
    pub fn with_config(
        teams: Arc<T>,
        directory: Arc<U>,
        clock: Arc<C>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            teams,
            profiles: ProfileResolver::new(directory, config),
            clock,
        }
    }

    /// Creates a team whose sole owner is `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Domain`] for a blank name or
    /// [`TeamServiceError::Repository`] when persistence fails.
    pub async fn create_team(
        &self,
        creator: UserId,
        name: impl Into<String> + Send,
    ) -> TeamServiceResult<Team> {
        let team = Team::new(name, creator, &*self.clock)?;
        self.teams.store(&team).await?;
        info!(team_id = %team.id(), actor = %creator, name = team.name(), "team created");
        Ok(team)
    }

    /// Renames a team. Admin or owner only.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError`] when access is denied, the name is blank
    /// or persistence fails.
    pub async fn rename_team(
        &self,
        team_id: TeamId,
        actor: UserId,
        name: impl Into<String> + Send,
    ) -> TeamServiceResult<Team> {
        let context = self.context(team_id, actor).await?;
        audit_gate(context.require_admin_or_owner("rename the team"), &context)?;
        let (mut team, _) = context.into_parts();
        team.rename(name, &*self.clock)?;
        self.teams.update(&team).await?;
        info!(team_id = %team_id, actor = %actor, name = team.name(), "team renamed");
        Ok(team)
    }

    /// Deletes a team. Owner only, and only once it owns no projects.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError`] when access is denied, the team still
    /// owns projects or persistence fails.
    pub async fn delete_team(&self, team_id: TeamId, actor: UserId) -> TeamServiceResult<()> {
        let context = self.context(team_id, actor).await?;
        audit_gate(context.require_owner("delete the team"), &context)?;
        context.team().ensure_deletable().inspect_err(|err| {
            warn!(team_id = %team_id, actor = %actor, error = %err, "team deletion rejected");
        })?;
        self.teams.delete(team_id).await?;
        info!(team_id = %team_id, actor = %actor, "team deleted");
        Ok(())
    }

    /// Adds `user_id` as a member. Admin or owner only.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::UnknownUser`] when the directory does not
    /// know the user, [`TeamServiceError::Domain`] when the user already
    /// belongs to the team, or another [`TeamServiceError`] when access is
    /// denied or persistence fails.
    pub async fn add_member(
        &self,
        team_id: TeamId,
        actor: UserId,
        user_id: UserId,
    ) -> TeamServiceResult<Team> {
        let context = self.context(team_id, actor).await?;
        audit_gate(context.require_admin_or_owner("add members"), &context)?;
        if self.profiles.directory().find_by_id(user_id).await?.is_none() {
            return Err(TeamServiceError::UnknownUser(user_id));
        }
        self.insert_member(context, user_id).await
    }

    /// Adds the user with the given handle as a member. Admin or owner only.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::UnknownHandle`] when no user has the
    /// handle, otherwise as [`TeamMembershipService::add_member`].
    pub async fn add_member_by_handle(
        &self,
        team_id: TeamId,
        actor: UserId,
        handle: &str,
    ) -> TeamServiceResult<Team> {
        let context = self.context(team_id, actor).await?;
        audit_gate(context.require_admin_or_owner("add members"), &context)?;
        let profile = self
            .profiles
            .directory()
            .find_by_handle(handle)
            .await?
            .ok_or_else(|| TeamServiceError::UnknownHandle(handle.trim().to_owned()))?;
        self.insert_member(context, profile.id()).await
    }

    /// Removes `target` from the team on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Domain`] when the role hierarchy or the
    /// last-owner invariant forbids the removal, or another
    /// [`TeamServiceError`] when access is denied or persistence fails.
    pub async fn remove_member(
        &self,
        team_id: TeamId,
        actor: UserId,
        target: UserId,
    ) -> TeamServiceResult<Team> {
        let (mut team, _) = self.context(team_id, actor).await?.into_parts();
        let removed = team
            .remove_member(actor, target, &*self.clock)
            .inspect_err(|err| {
                warn!(
                    team_id = %team_id,
                    actor = %actor,
                    target = %target,
                    error = %err,
                    "member removal rejected"
                );
            })?;
        self.teams.update(&team).await?;
        info!(
            team_id = %team_id,
            actor = %actor,
            target = %target,
            role = %removed.role(),
            "member removed"
        );
        Ok(team)
    }

    /// Changes the role of `target` on behalf of `actor`.
    ///
    /// `role` is parsed from its textual form (`member`, `admin`, `owner`).
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::InvalidRole`] for an unknown role,
    /// [`TeamServiceError::Domain`] when the role hierarchy or the
    /// last-owner invariant forbids the change, or another
    /// [`TeamServiceError`] when access is denied or persistence fails.
    pub async fn change_role(
        &self,
        team_id: TeamId,
        actor: UserId,
        target: UserId,
        role: &str,
    ) -> TeamServiceResult<Team> {
        let new_role = Role::try_from(role)?;
        let (mut team, _) = self.context(team_id, actor).await?.into_parts();
        let previous = team
            .change_role(actor, target, new_role, &*self.clock)
            .inspect_err(|err| {
                warn!(
                    team_id = %team_id,
                    actor = %actor,
                    target = %target,
                    requested = %new_role,
                    error = %err,
                    "role change rejected"
                );
            })?;
        self.teams.update(&team).await?;
        info!(
            team_id = %team_id,
            actor = %actor,
            target = %target,
            from = %previous,
            to = %new_role,
            "member role changed"
        );
        Ok(team)
    }

    /// Lists the team's members with display data, in join order. Any
    /// member may read the roster.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Access`] when the team does not exist or
    /// the actor is not a member.
    pub async fn roster(
        &self,
        team_id: TeamId,
        actor: UserId,
    ) -> TeamServiceResult<Vec<RosterEntry>> {
        let context = self.context(team_id, actor).await?;
        let mut entries = Vec::with_capacity(context.team().members().len());
        for membership in context.team().members() {
            entries.push(RosterEntry {
                membership: membership.clone(),
                profile: self.profiles.summarize(membership.user_id()).await,
            });
        }
        Ok(entries)
    }

    /// Lists the teams `user_id` belongs to, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Repository`] when the lookup fails.
    pub async fn teams_for_user(
        &self,
        user_id: UserId,
        filter: TeamFilter,
    ) -> TeamServiceResult<Vec<Team>> {
        let teams = self.teams.list_for_member(user_id).await?;
        Ok(teams
            .into_iter()
            .filter(|team| team.role_of(user_id).is_some_and(|role| filter.admits(role)))
            .collect())
    }

    async fn insert_member(
        &self,
        context: AccessContext,
        user_id: UserId,
    ) -> TeamServiceResult<Team> {
        let actor = context.actor();
        let (mut team, _) = context.into_parts();
        team.add_member(user_id, &*self.clock)?;
        self.teams.update(&team).await?;
        info!(team_id = %team.id(), actor = %actor, member = %user_id, "member added");
        Ok(team)
    }

    async fn context(&self, team_id: TeamId, actor: UserId) -> TeamServiceResult<AccessContext> {
        Ok(team_access(&*self.teams, team_id, actor).await?)
    }
}
