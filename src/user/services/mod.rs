//! User lookup services.

mod profiles;

pub use profiles::ProfileResolver;
