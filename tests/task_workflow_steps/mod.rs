//! Step definitions for task workflow and statistics scenarios.

pub mod then;
