//! Domain types describing users as seen by the task core.

mod profile;
mod summary;

pub use profile::UserProfile;
pub use summary::UserSummary;

crate::ids::uuid_id! {
    /// Opaque identifier of a registered user, supplied by the identity
    /// provider.
    UserId
}
