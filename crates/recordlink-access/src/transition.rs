//! The access-control state machine.
//!
//! Transitions are scoped to one (provider, patient) pair. The current state
//! is `Option<AccessStatus>`: `None` is the implicit "no access" state of a
//! pair with no record.
//!
//! ```text
//! no_access --request------> pending
//! pending   --grant--------> allowed
//! pending   --deny---------> denied
//! denied    --request_again> pending
//! revoked   --request_again> pending
//! allowed   --revoke-------> revoked
//! ```
//!
//! The table is the single source of truth for strict-mode precondition
//! checks; the service consults it before mutating the store.

use recordlink_core::{AccessAction, AccessStatus};

/// Allowed source states per action. `None` in the slice means "no record".
pub fn allowed_sources(action: AccessAction) -> &'static [Option<AccessStatus>] {
    match action {
        AccessAction::Request => &[None],
        AccessAction::RequestAgain => {
            &[Some(AccessStatus::Denied), Some(AccessStatus::Revoked)]
        }
        AccessAction::Grant => &[Some(AccessStatus::Pending)],
        AccessAction::Deny => &[Some(AccessStatus::Pending)],
        AccessAction::Revoke => &[Some(AccessStatus::Allowed)],
    }
}

/// Returns `true` if the action may fire from the given current state.
pub fn permitted(action: AccessAction, current: Option<AccessStatus>) -> bool {
    allowed_sources(action).contains(&current)
}

/// The status an action transitions to.
pub fn target_status(action: AccessAction) -> AccessStatus {
    match action {
        AccessAction::Request | AccessAction::RequestAgain => AccessStatus::Pending,
        AccessAction::Grant => AccessStatus::Allowed,
        AccessAction::Deny => AccessStatus::Denied,
        AccessAction::Revoke => AccessStatus::Revoked,
    }
}
