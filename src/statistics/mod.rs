//! Project statistics.
//!
//! [`domain::aggregate`] is a pure function over a project and its loaded
//! tasks; [`services::TaskStatisticsService`] gates access, loads the tasks
//! and enriches member identifiers with display data.

pub mod domain;
pub mod services;
