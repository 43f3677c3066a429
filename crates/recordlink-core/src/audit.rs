//! Audit trail types for access-control actions.
//!
//! Every attempt to change a provider-patient access record produces one
//! [`AuditEntry`]. Entries are write-once: the subsystem appends them and
//! never mutates or deletes them afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{CoreError, Result};
use crate::id::generate_id;
use crate::time::now_utc;

/// An access-control action, as recorded in the audit trail.
///
/// The same enum drives the state machine in `recordlink-access`; the audit
/// action of an operation is always the operation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessAction {
    /// First request for access (no record exists yet).
    Request,
    /// Renewed request after a denial or revocation.
    RequestAgain,
    /// Patient grants access.
    Grant,
    /// Patient denies a request.
    Deny,
    /// Patient revokes previously granted access.
    Revoke,
}

impl AccessAction {
    /// Returns the snake_case wire name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::RequestAgain => "request_again",
            Self::Grant => "grant",
            Self::Deny => "deny",
            Self::Revoke => "revoke",
        }
    }
}

impl fmt::Display for AccessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "request" => Ok(Self::Request),
            "request_again" => Ok(Self::RequestAgain),
            "grant" => Ok(Self::Grant),
            "deny" => Ok(Self::Deny),
            "revoke" => Ok(Self::Revoke),
            other => Err(CoreError::invalid_action(other)),
        }
    }
}

/// The recorded outcome of an action attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    /// The action was issued but has not completed. Present for callers that
    /// record a pre-flight entry; the service itself records final outcomes.
    Attempting,
    /// The primary mutation succeeded.
    Success,
    /// The primary mutation failed.
    Failed,
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attempting => f.write_str("attempting"),
            Self::Success => f.write_str("success"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// One append-only record of an access-control action attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry ID.
    pub id: String,
    /// The provider side of the affected pair.
    pub provider_id: String,
    /// The patient side of the affected pair.
    pub patient_id: String,
    /// Which operation was attempted.
    pub action: AccessAction,
    /// How the attempt ended.
    pub outcome: AuditOutcome,
    /// Human-readable note; carries the error display on failure.
    pub note: Option<String>,
    /// When the entry was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl AuditEntry {
    /// Creates a new entry stamped with the current time.
    pub fn new(
        provider_id: impl Into<String>,
        patient_id: impl Into<String>,
        action: AccessAction,
        outcome: AuditOutcome,
        note: Option<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            provider_id: provider_id.into(),
            patient_id: patient_id.into(),
            action,
            outcome,
            note,
            timestamp: now_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trips_through_str() {
        for action in [
            AccessAction::Request,
            AccessAction::RequestAgain,
            AccessAction::Grant,
            AccessAction::Deny,
            AccessAction::Revoke,
        ] {
            let parsed: AccessAction = action.as_str().parse().unwrap();
            assert_eq!(parsed, action);
        }
    }

    #[test]
    fn test_action_serde_is_snake_case() {
        let json = serde_json::to_string(&AccessAction::RequestAgain).unwrap();
        assert_eq!(json, "\"request_again\"");
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(AuditOutcome::Attempting.to_string(), "attempting");
        assert_eq!(AuditOutcome::Success.to_string(), "success");
        assert_eq!(AuditOutcome::Failed.to_string(), "failed");
    }

    #[test]
    fn test_new_entry_has_id_and_timestamp() {
        let entry = AuditEntry::new(
            "prov-1",
            "pat-1",
            AccessAction::Grant,
            AuditOutcome::Success,
            None,
        );
        assert!(!entry.id.is_empty());
        assert_eq!(entry.action, AccessAction::Grant);
        assert_eq!(entry.outcome, AuditOutcome::Success);
        assert!(entry.note.is_none());
    }
}
