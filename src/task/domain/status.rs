//! Task status values.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// Variants are declared in lifecycle order, which is also the order used
/// by statistics histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task exists but nobody has been assigned.
    Created,
    /// Task has an assignee who has not started.
    Assigned,
    /// Work on the task is under way.
    Pending,
    /// Task is awaiting review.
    InReview,
    /// Task has been completed.
    Completed,
    /// Task has been closed.
    Closed,
}

impl TaskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Created,
        Self::Assigned,
        Self::Pending,
        Self::InReview,
        Self::Completed,
        Self::Closed,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Assigned => "assigned",
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Completed => "completed",
            Self::Closed => "closed",
        }
    }

    /// Returns `true` for statuses that carry a close timestamp.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Closed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "assigned" => Ok(Self::Assigned),
            "pending" => Ok(Self::Pending),
            "in_review" => Ok(Self::InReview),
            "completed" => Ok(Self::Completed),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
