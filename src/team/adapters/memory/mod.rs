//! In-memory team repository.

mod team;

pub use team::InMemoryTeamRepository;
