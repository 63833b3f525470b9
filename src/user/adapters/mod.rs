//! Adapter implementations for the user directory port.

pub mod memory;
