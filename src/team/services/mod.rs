//! Service layer for team membership management.

mod membership;

pub use membership::{
    RosterEntry, TeamFilter, TeamMembershipService, TeamServiceError, TeamServiceResult,
};
