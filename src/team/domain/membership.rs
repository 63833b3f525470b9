//! Team membership entries.

use super::Role;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user's membership in a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    user_id: UserId,
    role: Role,
    joined_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a membership entry.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role, joined_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            role,
            joined_at,
        }
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the member's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns when the user joined the team.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    pub(super) const fn set_role(&mut self, role: Role) {
        self.role = role;
    }
}
