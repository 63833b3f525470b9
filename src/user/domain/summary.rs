//! Display fields attached to user references in reports.

use super::{UserId, UserProfile};
use serde::{Deserialize, Serialize};

/// Display data for a user reference, possibly a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Referenced user.
    pub user_id: UserId,
    /// Display name, or the configured placeholder.
    pub display_name: String,
    /// Email, or the configured placeholder.
    pub email: String,
    /// Avatar reference; always `None` for placeholders.
    pub avatar: Option<String>,
    /// Whether the directory resolved the user.
    pub resolved: bool,
}

impl UserSummary {
    /// Builds a summary from a resolved profile.
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.id(),
            display_name: profile.display_name().to_owned(),
            email: profile.email().to_owned(),
            avatar: profile.avatar().map(str::to_owned),
            resolved: true,
        }
    }

    /// Builds a placeholder for a user the directory could not resolve.
    #[must_use]
    pub fn placeholder(
        user_id: UserId,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            email: email.into(),
            avatar: None,
            resolved: false,
        }
    }
}
