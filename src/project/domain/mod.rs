//! Domain model for projects.

mod error;
mod project;

pub use error::ProjectDomainError;
pub use project::{PersistedProjectData, Project};

crate::ids::uuid_id! {
    /// Unique identifier for a project.
    ProjectId
}
