//! Logging wrapper for role gates.

use crate::access::domain::{AccessContext, AccessError};
use tracing::warn;

/// Passes a gate result through, logging denials.
///
/// # Errors
///
/// Returns `check` unchanged when it is an error.
pub fn audit_gate(
    check: Result<(), AccessError>,
    context: &AccessContext,
) -> Result<(), AccessError> {
    check.inspect_err(|err| {
        warn!(
            team_id = %context.team().id(),
            actor = %context.actor(),
            role = %context.role(),
            error = %err,
            "access denied"
        );
    })
}
