//! Display data for a registered user.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Read-only profile of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    handle: String,
    display_name: String,
    email: String,
    avatar: Option<String>,
}

impl UserProfile {
    /// Creates a profile. The handle and email are normalized by trimming;
    /// the email is additionally lowercased.
    #[must_use]
    pub fn new(
        id: UserId,
        handle: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            handle: handle.into().trim().to_owned(),
            display_name: display_name.into().trim().to_owned(),
            email: email.into().trim().to_ascii_lowercase(),
            avatar: None,
        }
    }

    /// Sets the avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the unique login handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the avatar reference, if any.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }
}
