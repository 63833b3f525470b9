//! Statistics service.

mod report;

pub use report::{StatisticsServiceError, StatisticsServiceResult, TaskStatisticsService};
