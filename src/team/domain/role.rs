//! Team roles.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by a user within one team.
///
/// Roles are deliberately not ordered. Most gates treat `Admin` and `Owner`
/// alike while a few require exactly `Owner`, so callers must use
/// [`Role::is_admin_or_owner`] or [`Role::is_owner`] instead of comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular member.
    Member,
    /// Team administrator.
    Admin,
    /// Team owner.
    Owner,
}

impl Role {
    /// All roles, least privileged first.
    pub const ALL: [Self; 3] = [Self::Member, Self::Admin, Self::Owner];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Returns `true` for roles passing an "admin/owner only" gate.
    #[must_use]
    pub const fn is_admin_or_owner(self) -> bool {
        matches!(self, Self::Admin | Self::Owner)
    }

    /// Returns `true` only for the owner role.
    #[must_use]
    pub const fn is_owner(self) -> bool {
        matches!(self, Self::Owner)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
