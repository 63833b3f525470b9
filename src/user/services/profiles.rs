//! Tolerant profile enrichment.

use crate::{
    config::EngineConfig,
    user::{
        domain::{UserId, UserSummary},
        ports::UserDirectory,
    },
};
use std::sync::Arc;
use tracing::warn;

/// Resolves user identifiers into display summaries.
///
/// Missing users and directory failures never abort the caller: both yield
/// the configured placeholder.
pub struct ProfileResolver<U>
where
    U: UserDirectory,
{
    directory: Arc<U>,
    unknown_name: String,
    unknown_email: String,
}

impl<U> Clone for ProfileResolver<U>
where
    U: UserDirectory,
{
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            unknown_name: self.unknown_name.clone(),
            unknown_email: self.unknown_email.clone(),
        }
    }
}

impl<U> ProfileResolver<U>
where
    U: UserDirectory,
{
    /// Creates a resolver using the placeholders from `config`.
    #[must_use]
    pub fn new(directory: Arc<U>, config: &EngineConfig) -> Self {
        Self {
            directory,
            unknown_name: config.unknown_user_name.clone(),
            unknown_email: config.unknown_user_email.clone(),
        }
    }

    /// Returns the directory this resolver reads from.
    #[must_use]
    pub const fn directory(&self) -> &Arc<U> {
        &self.directory
    }

    /// Resolves one user.
    pub async fn summarize(&self, user_id: UserId) -> UserSummary {
        match self.directory.find_by_id(user_id).await {
            Ok(Some(profile)) => UserSummary::from_profile(&profile),
            Ok(None) => {
                warn!(user_id = %user_id, "user not found in directory, using placeholder");
                self.placeholder(user_id)
            }
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "user directory lookup failed, using placeholder");
                self.placeholder(user_id)
            }
        }
    }

    /// Resolves several users, preserving order.
    pub async fn summarize_all(&self, user_ids: &[UserId]) -> Vec<UserSummary> {
        let mut summaries = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            summaries.push(self.summarize(*user_id).await);
        }
        summaries
    }

    /// Returns the placeholder summary for `user_id`.
    #[must_use]
    pub fn placeholder(&self, user_id: UserId) -> UserSummary {
        UserSummary::placeholder(user_id, &self.unknown_name, &self.unknown_email)
    }
}
