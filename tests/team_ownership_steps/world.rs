//! Shared world state for team ownership BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use mockable::DefaultClock;
use rstest::fixture;
use teamboard::{
    team::{
        adapters::memory::InMemoryTeamRepository,
        domain::{Team, TeamId},
        services::{TeamMembershipService, TeamServiceError},
    },
    user::{
        adapters::memory::InMemoryUserDirectory,
        domain::{UserId, UserProfile},
    },
};

/// Service type used by the BDD world.
pub type TestTeamService =
    TeamMembershipService<InMemoryTeamRepository, InMemoryUserDirectory, DefaultClock>;

/// Scenario world for team ownership behaviour tests.
pub struct TeamWorld {
    pub service: TestTeamService,
    pub directory: Arc<InMemoryUserDirectory>,
    pub users: HashMap<String, UserId>,
    pub team_id: Option<TeamId>,
    pub founder: Option<UserId>,
    pub last_result: Option<Result<Team, TeamServiceError>>,
}

impl TeamWorld {
    /// Creates a world with no users and no team.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let service = TeamMembershipService::new(
            Arc::new(InMemoryTeamRepository::new()),
            Arc::clone(&directory),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            directory,
            users: HashMap::new(),
            team_id: None,
            founder: None,
            last_result: None,
        }
    }

    /// Returns the identifier registered for `handle`, registering it on
    /// first use.
    pub fn user(&mut self, handle: &str) -> Result<UserId, eyre::Report> {
        if let Some(id) = self.users.get(handle) {
            return Ok(*id);
        }
        let id = UserId::new();
        self.directory.register(UserProfile::new(
            id,
            handle,
            handle,
            format!("{handle}@example.com"),
        ))?;
        self.users.insert(handle.to_owned(), id);
        Ok(id)
    }

    /// Returns the scenario's team and the user who created it.
    pub fn team(&self) -> Result<(TeamId, UserId), eyre::Report> {
        self.team_id
            .zip(self.founder)
            .ok_or_else(|| eyre::eyre!("missing team in scenario world"))
    }
}

impl Default for TeamWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TeamWorld {
    TeamWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
