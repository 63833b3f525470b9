//! Role-keyed status transition table.
//!
//! | From      | member     | admin/owner                                    |
//! |-----------|------------|------------------------------------------------|
//! | created   |            | assigned, pending, in_review, completed, closed |
//! | assigned  | pending    | pending, in_review, completed, closed          |
//! | pending   | in_review  | assigned, in_review, completed, closed         |
//! | in_review |            | pending, completed, closed                     |
//! | completed |            | in_review, closed                              |
//! | closed    |            | completed                                      |

use super::TaskStatus;
use crate::team::domain::Role;

/// Which column of the transition table applies to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionActor {
    /// Regular team member.
    Member,
    /// Team admin or owner; both share one table.
    AdminOrOwner,
}

impl From<Role> for TransitionActor {
    fn from(role: Role) -> Self {
        if role.is_admin_or_owner() {
            Self::AdminOrOwner
        } else {
            Self::Member
        }
    }
}

/// Returns the statuses `actor` may move a task to from `from`.
#[must_use]
pub const fn allowed_targets(actor: TransitionActor, from: TaskStatus) -> &'static [TaskStatus] {
    use TaskStatus::{Assigned, Closed, Completed, Created, InReview, Pending};

    match (actor, from) {
        (TransitionActor::Member, Assigned) => &[Pending],
        (TransitionActor::Member, Pending) => &[InReview],
        (TransitionActor::Member, Created | InReview | Completed | Closed) => &[],
        (TransitionActor::AdminOrOwner, Created) => {
            &[Assigned, Pending, InReview, Completed, Closed]
        }
        (TransitionActor::AdminOrOwner, Assigned) => &[Pending, InReview, Completed, Closed],
        (TransitionActor::AdminOrOwner, Pending) => &[Assigned, InReview, Completed, Closed],
        (TransitionActor::AdminOrOwner, InReview) => &[Pending, Completed, Closed],
        (TransitionActor::AdminOrOwner, Completed) => &[InReview, Closed],
        (TransitionActor::AdminOrOwner, Closed) => &[Completed],
    }
}

/// Returns `true` when the table lists `from → to` for `actor`.
#[must_use]
pub fn permits(actor: TransitionActor, from: TaskStatus, to: TaskStatus) -> bool {
    allowed_targets(actor, from).contains(&to)
}
