//! User lookup for display enrichment.
//!
//! Users are registered and authenticated outside this crate. The core only
//! needs to resolve identifiers and handles into display data, which it does
//! through the [`ports::UserDirectory`] port.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
