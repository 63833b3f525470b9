//! Pure aggregation over a project's task set.

use super::{DailyActivity, DailyCompletion, MemberStats, TaskStatistics};
use crate::{
    project::domain::Project,
    task::domain::{Task, TaskFlag, TaskStatus},
    user::domain::{UserId, UserSummary},
};
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

const MILLIS_PER_DAY: i128 = 86_400_000;

/// Rolling window of calendar days ending today (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsWindow {
    today: NaiveDate,
    days: u32,
}

impl StatisticsWindow {
    /// Creates a window of `days` days ending on `today`. Zero is treated as
    /// one day.
    #[must_use]
    pub const fn new(today: NaiveDate, days: u32) -> Self {
        Self {
            today,
            days: if days == 0 { 1 } else { days },
        }
    }

    /// Returns the last day of the window.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Returns the window's days, oldest first.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.days)
            .rev()
            .filter_map(|offset| self.today.checked_sub_days(Days::new(u64::from(offset))))
            .collect()
    }
}

/// Returns the users the rollup considers: the project's assigned members
/// first, then any other task assignees in task order.
#[must_use]
pub fn member_universe(project: &Project, tasks: &[Task]) -> Vec<UserId> {
    let mut users: Vec<UserId> = Vec::new();
    let assignees = tasks.iter().filter_map(Task::assignee);
    for user_id in project.assigned_members().iter().copied().chain(assignees) {
        if !users.contains(&user_id) {
            users.push(user_id);
        }
    }
    users
}

/// Aggregates statistics for `project` over `tasks`.
///
/// `resolve` supplies display data for each user in
/// [`member_universe`]. The result depends only on the inputs, so running it
/// twice over the same tasks yields identical reports.
pub fn aggregate<F>(
    project: &Project,
    tasks: &[Task],
    window: &StatisticsWindow,
    resolve: F,
) -> TaskStatistics
where
    F: Fn(UserId) -> UserSummary,
{
    let mut status_counts: BTreeMap<TaskStatus, usize> =
        TaskStatus::ALL.iter().map(|status| (*status, 0)).collect();
    let mut flag_counts: BTreeMap<TaskFlag, usize> =
        TaskFlag::ALL.iter().map(|flag| (*flag, 0)).collect();
    for task in tasks {
        *status_counts.entry(task.status()).or_default() += 1;
        *flag_counts.entry(task.flag()).or_default() += 1;
    }

    let dates = window.dates();
    let completion_series = dates
        .iter()
        .map(|date| DailyCompletion {
            date: *date,
            completed: tasks
                .iter()
                .filter(|task| task.closed_at().is_some_and(|at| at.date_naive() == *date))
                .count(),
            created: tasks
                .iter()
                .filter(|task| task.created_at().date_naive() == *date)
                .count(),
        })
        .collect();
    let activity_series = dates
        .iter()
        .map(|date| DailyActivity {
            date: *date,
            changes: tasks
                .iter()
                .flat_map(Task::logs)
                .filter(|entry| entry.timestamp().date_naive() == *date)
                .count(),
        })
        .collect();

    TaskStatistics {
        project_id: project.id(),
        total_tasks: tasks.len(),
        status_counts,
        flag_counts,
        completion_series,
        activity_series,
        average_completion_days: average_completion_days(tasks),
        completed_tasks_count: tasks.iter().filter(|task| task.closed_at().is_some()).count(),
        member_stats: member_stats(project, tasks, resolve),
    }
}

fn member_stats<F>(project: &Project, tasks: &[Task], resolve: F) -> Vec<MemberStats>
where
    F: Fn(UserId) -> UserSummary,
{
    member_universe(project, tasks)
        .into_iter()
        .filter_map(|user_id| {
            let assigned = tasks
                .iter()
                .filter(|task| task.assignee() == Some(user_id));
            let (total_tasks, completed_tasks) =
                assigned.fold((0_usize, 0_usize), |(total, completed), task| {
                    let closed = usize::from(task.status().is_closed());
                    (total + 1, completed + closed)
                });
            (total_tasks > 0).then(|| MemberStats {
                member: resolve(user_id),
                total_tasks,
                completed_tasks,
            })
        })
        .collect()
}

fn average_completion_days(tasks: &[Task]) -> i64 {
    let (total_millis, count) = tasks
        .iter()
        .filter_map(|task| {
            task.closed_at()
                .map(|closed_at| (closed_at - task.created_at()).num_milliseconds())
        })
        .fold((0_i128, 0_i128), |(sum, count), millis| {
            (sum + i128::from(millis), count + 1)
        });
    if count == 0 {
        return 0;
    }
    // floor(mean / day + 1/2), kept in integers
    let rounded = (2 * total_millis + count * MILLIS_PER_DAY).div_euclid(2 * count * MILLIS_PER_DAY);
    i64::try_from(rounded).unwrap_or(i64::MAX)
}
