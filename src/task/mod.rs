//! Task lifecycle management.
//!
//! Tasks live inside projects. Every mutation is authorised against the
//! acting user's role in the owning team, appends an audit log entry and
//! bumps the task version. Status changes follow the role-keyed table in
//! [`domain::transition`]. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
