//! Shared error classification.
//!
//! Every context keeps its own error enums. Each of them can be reduced to
//! an [`ErrorKind`] so that an outer transport layer can map failures to a
//! response without matching on every variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An entity identifier did not resolve.
    NotFound,
    /// The actor lacks the role or relationship required for the action.
    Forbidden,
    /// The request was malformed or violated a precondition on its input.
    BadRequest,
    /// The request conflicts with current state (last owner, stale version).
    Conflict,
    /// Opaque infrastructure failure.
    Storage,
}

impl ErrorKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::BadRequest => "bad_request",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }

    /// Returns `true` when retrying the same request may succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// use teamboard::error::ErrorKind;
    ///
    /// assert!(ErrorKind::Conflict.is_retryable());
    /// assert!(ErrorKind::Storage.is_retryable());
    /// assert!(!ErrorKind::Forbidden.is_retryable());
    /// assert!(!ErrorKind::NotFound.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Conflict | Self::Storage)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
