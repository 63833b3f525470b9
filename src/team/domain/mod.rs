//! Domain model for teams and role-based membership.
//!
//! The membership directory queries ([`Team::role_of`],
//! [`Team::owner_count`]) are pure reads over the loaded aggregate. The
//! mutators enforce the role hierarchy before touching state.

mod error;
mod membership;
mod role;
mod team;

pub use error::{ParseRoleError, TeamDomainError};
pub use membership::Membership;
pub use role::Role;
pub use team::{PersistedTeamData, Team};

crate::ids::uuid_id! {
    /// Unique identifier for a team.
    TeamId
}
