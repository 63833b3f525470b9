//! Report types and the aggregation over a project's tasks.

mod aggregate;
mod report;

pub use aggregate::{StatisticsWindow, aggregate, member_universe};
pub use report::{DailyActivity, DailyCompletion, MemberStats, TaskStatistics};
