//! Service layer for project management.

mod project;

pub use project::{ProjectDetails, ProjectService, ProjectServiceError, ProjectServiceResult};
