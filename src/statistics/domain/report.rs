//! Statistics report shapes.

use crate::{
    project::domain::ProjectId,
    task::domain::{TaskFlag, TaskStatus},
    user::domain::UserSummary,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Tasks created and completed on one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCompletion {
    /// Calendar day (UTC).
    pub date: NaiveDate,
    /// Tasks whose close timestamp falls on the day.
    pub completed: usize,
    /// Tasks created on the day.
    pub created: usize,
}

/// Log entries written on one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    /// Calendar day (UTC).
    pub date: NaiveDate,
    /// Number of log entries across the project's tasks.
    pub changes: usize,
}

/// Per-user task rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberStats {
    /// Display data for the user.
    pub member: UserSummary,
    /// Tasks assigned to the user.
    pub total_tasks: usize,
    /// Assigned tasks in the completed or closed status.
    pub completed_tasks: usize,
}

/// Aggregated statistics for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatistics {
    /// Project the report covers.
    pub project_id: ProjectId,
    /// Number of tasks considered.
    pub total_tasks: usize,
    /// Histogram over every status, zero-filled.
    pub status_counts: BTreeMap<TaskStatus, usize>,
    /// Histogram over every flag, zero-filled.
    pub flag_counts: BTreeMap<TaskFlag, usize>,
    /// Created/completed counts per day, oldest first, today last.
    pub completion_series: Vec<DailyCompletion>,
    /// Log entry counts per day, oldest first, today last.
    pub activity_series: Vec<DailyActivity>,
    /// Mean time from creation to close in whole days, rounded half up.
    pub average_completion_days: i64,
    /// Number of tasks with a close timestamp.
    pub completed_tasks_count: usize,
    /// Per-user rollup; users with no assigned tasks are omitted.
    pub member_stats: Vec<MemberStats>,
}

impl TaskStatistics {
    /// Returns the count for `status`.
    #[must_use]
    pub fn status_count(&self, status: TaskStatus) -> usize {
        self.status_counts.get(&status).copied().unwrap_or_default()
    }

    /// Returns the count for `flag`.
    #[must_use]
    pub fn flag_count(&self, flag: TaskFlag) -> usize {
        self.flag_counts.get(&flag).copied().unwrap_or_default()
    }
}
