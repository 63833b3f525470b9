//! Port contracts for team persistence.

pub mod repository;

pub use repository::{TeamRepository, TeamRepositoryError, TeamRepositoryResult};
