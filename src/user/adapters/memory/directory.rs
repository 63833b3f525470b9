//! Thread-safe in-memory user directory for tests and embedders.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// In-memory user directory keyed by identifier, with handle and email
/// indexes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    users: HashMap<UserId, UserProfile>,
    handle_index: HashMap<String, UserId>,
    email_index: HashMap<String, UserId>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user profile.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::DuplicateUser`] when the identifier,
    /// handle or email is taken.
    pub fn register(&self, profile: UserProfile) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.users.contains_key(&profile.id()) {
            return Err(UserDirectoryError::DuplicateUser(profile.id().to_string()));
        }
        if state.handle_index.contains_key(profile.handle()) {
            return Err(UserDirectoryError::DuplicateUser(profile.handle().to_owned()));
        }
        if state.email_index.contains_key(profile.email()) {
            return Err(UserDirectoryError::DuplicateUser(profile.email().to_owned()));
        }
        state
            .handle_index
            .insert(profile.handle().to_owned(), profile.id());
        state
            .email_index
            .insert(profile.email().to_owned(), profile.id());
        state.users.insert(profile.id(), profile);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserProfile>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_handle(&self, handle: &str) -> UserDirectoryResult<Option<UserProfile>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let profile = state
            .handle_index
            .get(handle.trim())
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(profile)
    }
}
