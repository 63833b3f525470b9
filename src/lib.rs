//! Teamboard: role-gated task tracking for teams.
//!
//! This crate provides the core of a collaborative task tracker organised as
//! Team → Project → Task. Per-team roles decide who may perform which
//! mutation, tasks move through a role-keyed status state machine with an
//! append-only audit log, and project statistics are derived from the task
//! set and its log history.
//!
//! # Architecture
//!
//! Teamboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and user lookup
//! - **Adapters**: Concrete implementations of ports (thread-safe in-memory
//!   stores)
//! - **Services**: Orchestration of load → authorize → mutate → persist
//!
//! # Modules
//!
//! - [`team`]: Teams, memberships and the role hierarchy
//! - [`project`]: Projects and project member assignment
//! - [`access`]: Resolution of the acting user's role for a target
//! - [`task`]: Task lifecycle, transitions, assignment and subtasks
//! - [`statistics`]: Project statistics aggregation
//! - [`user`]: User lookup for display enrichment
//! - [`config`]: Engine configuration
//! - [`error`]: Shared error classification

mod ids;

pub mod access;
pub mod config;
pub mod error;
pub mod project;
pub mod statistics;
pub mod task;
pub mod team;
pub mod user;

#[cfg(test)]
mod test_support;
