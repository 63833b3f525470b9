//! Port contracts for user lookup.

pub mod directory;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
