//! Status-derived presentation mapping.
//!
//! The UI decides which prompt to show and which action to offer from a
//! [`StatusView`], never from the raw record. The mapping is pure data; its
//! edge-case policy (unknown statuses map to [`StatusView::Unknown`] with no
//! action) is what the presentation tests pin down.

use std::fmt;

use serde::Serialize;

use recordlink_core::{AccessAction, AccessStatus};

/// The logical access state as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusView {
    /// No record exists; the provider may request access.
    NoAccess,
    /// A request is awaiting the patient's decision.
    Pending,
    /// The patient denied the request.
    Denied,
    /// The patient revoked previously granted access.
    Revoked,
    /// Access is granted; not shown as a blocking prompt.
    Allowed,
    /// The stored status was unrecognized; offer nothing.
    Unknown,
}

impl StatusView {
    /// Maps a typed status (or absence of a record) to its view.
    pub fn from_status(status: Option<AccessStatus>) -> Self {
        match status {
            None => Self::NoAccess,
            Some(AccessStatus::Pending) => Self::Pending,
            Some(AccessStatus::Denied) => Self::Denied,
            Some(AccessStatus::Revoked) => Self::Revoked,
            Some(AccessStatus::Allowed) => Self::Allowed,
        }
    }

    /// Leniently maps a raw status string, as received from an external
    /// payload. Unrecognized strings become [`StatusView::Unknown`] rather
    /// than an error.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => Self::NoAccess,
            Some(s) => s
                .parse::<AccessStatus>()
                .map(|status| Self::from_status(Some(status)))
                .unwrap_or(Self::Unknown),
        }
    }

    /// The primary action the UI should offer for this view, if any.
    pub fn primary_action(&self) -> Option<AccessAction> {
        match self {
            Self::NoAccess => Some(AccessAction::Request),
            Self::Denied | Self::Revoked => Some(AccessAction::RequestAgain),
            Self::Allowed => Some(AccessAction::Revoke),
            Self::Pending | Self::Unknown => None,
        }
    }

    /// Returns the snake_case wire name of this view.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAccess => "no_access",
            Self::Pending => "pending",
            Self::Denied => "denied",
            Self::Revoked => "revoked",
            Self::Allowed => "allowed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
