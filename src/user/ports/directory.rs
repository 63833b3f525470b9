//! Directory port resolving user identifiers and handles to profiles.

use crate::{
    error::ErrorKind,
    user::domain::{UserId, UserProfile},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User lookup contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when no user has the identifier.
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserProfile>>;

    /// Finds a user by unique handle.
    ///
    /// Returns `None` when no user has the handle.
    async fn find_by_handle(&self, handle: &str) -> UserDirectoryResult<Option<UserProfile>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// A user with the same identifier, handle or email already exists.
    #[error("duplicate user: {0}")]
    DuplicateUser(String),

    /// Directory backend failure.
    #[error("user directory error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a backend error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateUser(_) => ErrorKind::Conflict,
            Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
