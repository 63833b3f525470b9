//! Step definitions for team ownership scenarios.

pub mod given;
pub mod when;
pub mod world;
