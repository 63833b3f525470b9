//! In-memory user directory.

mod directory;

pub use directory::InMemoryUserDirectory;
