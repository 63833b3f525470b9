//! Teams, memberships and role management.
//!
//! A team owns an ordered membership list and the projects created under
//! it. Every membership mutation is checked against the role hierarchy and
//! the invariant that a team always keeps at least one owner. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
