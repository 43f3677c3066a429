//! Shared types for the storage abstraction layer.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use recordlink_core::AccessStatus;

/// A mutation applied to an existing access record.
///
/// Carries the new status and the new `granted_at` value; backends apply both
/// fields verbatim and refresh `updated_at` themselves. Constructors keep the
/// granted_at/status invariant by pairing `Some(granted_at)` only with
/// [`AccessStatus::Allowed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPatch {
    /// The status to store.
    pub status: AccessStatus,
    /// The granted_at value to store; `Some` only for `Allowed`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub granted_at: Option<OffsetDateTime>,
}

impl AccessPatch {
    /// Patch for a (re-)request: back to pending, grant timestamp cleared.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            status: AccessStatus::Pending,
            granted_at: None,
        }
    }

    /// Patch for a grant at the given time.
    #[must_use]
    pub fn allowed(granted_at: OffsetDateTime) -> Self {
        Self {
            status: AccessStatus::Allowed,
            granted_at: Some(granted_at),
        }
    }

    /// Patch for a denial: grant timestamp cleared.
    #[must_use]
    pub fn denied() -> Self {
        Self {
            status: AccessStatus::Denied,
            granted_at: None,
        }
    }

    /// Patch for a revocation: grant timestamp cleared.
    #[must_use]
    pub fn revoked() -> Self {
        Self {
            status: AccessStatus::Revoked,
            granted_at: None,
        }
    }
}
