//! Access resolution service.

mod gate;
mod resolver;

pub use gate::audit_gate;
pub use resolver::AccessResolver;
pub(crate) use resolver::team_access;
