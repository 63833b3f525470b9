//! Checklist items nested inside a task.

use super::{ParseSubtaskStatusError, SubtaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion state of a subtask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtaskStatus {
    /// Not done yet.
    #[default]
    Pending,
    /// Done.
    Completed,
}

impl SubtaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for SubtaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SubtaskStatus {
    type Error = ParseSubtaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseSubtaskStatusError(value.to_owned())),
        }
    }
}

/// A titled checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    title: String,
    status: SubtaskStatus,
}

impl Subtask {
    /// Creates a subtask with a fresh identifier.
    #[must_use]
    pub fn new(title: impl Into<String>, status: SubtaskStatus) -> Self {
        Self {
            id: SubtaskId::new(),
            title: title.into(),
            status,
        }
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the completion state.
    #[must_use]
    pub const fn status(&self) -> SubtaskStatus {
        self.status
    }

    pub(super) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(super) const fn set_status(&mut self, status: SubtaskStatus) {
        self.status = status;
    }
}
