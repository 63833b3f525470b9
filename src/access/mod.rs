//! Authorization resolution.
//!
//! Given an actor and a target (team, project or task), the resolver walks
//! the reverse links task → project → team, computes the actor's role and
//! answers the two gating questions the rest of the crate asks:
//! [`domain::AccessContext::require_admin_or_owner`] and
//! [`domain::AccessContext::require_owner`]. Roles are compared through
//! explicit predicates, never by ordering.

pub mod domain;
pub mod services;
