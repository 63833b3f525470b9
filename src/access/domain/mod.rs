//! Access context and authorization errors.

mod context;
mod error;

pub use context::{AccessContext, AccessTarget};
pub use error::AccessError;
