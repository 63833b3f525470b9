//! Persistence port for task aggregates.
//!
//! Services write whole tasks and rely on the adapter for optimistic version
//! checks and ordered batch reads.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
