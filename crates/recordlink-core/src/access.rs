//! Provider-patient access records.
//!
//! An [`AccessRecord`] captures one provider's relationship to one patient's
//! medical records. At most one record exists per (provider, patient) pair;
//! the absence of a record is the implicit "no access" state. Records are
//! created when a provider first requests access and are mutated in place by
//! later transitions; they are never deleted in normal operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{CoreError, Result};
use crate::time::now_utc;

/// The stored status of a provider-patient access record.
///
/// The implicit fifth state, "no access", is the absence of a record and is
/// represented as `Option<AccessStatus>::None` wherever a current state is
/// passed around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessStatus {
    /// The provider has requested access and the patient has not yet decided.
    Pending,
    /// The patient granted access.
    Allowed,
    /// The patient denied the request.
    Denied,
    /// The patient revoked previously granted access.
    Revoked,
}

impl AccessStatus {
    /// All statuses, in declaration order.
    pub const ALL: [AccessStatus; 4] = [
        AccessStatus::Pending,
        AccessStatus::Allowed,
        AccessStatus::Denied,
        AccessStatus::Revoked,
    ];

    /// Returns the lowercase wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Allowed => "allowed",
            Self::Denied => "denied",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "allowed" => Ok(Self::Allowed),
            "denied" => Ok(Self::Denied),
            "revoked" => Ok(Self::Revoked),
            other => Err(CoreError::invalid_status(other)),
        }
    }
}

/// One provider's permission state for one patient's records.
///
/// Identity is the composite (provider_id, patient_id) key. The
/// `granted_at` timestamp is set only while the status is
/// [`AccessStatus::Allowed`] and cleared on every other transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// The requesting provider.
    pub provider_id: String,
    /// The patient whose records are covered.
    pub patient_id: String,
    /// Current status of the relationship.
    pub status: AccessStatus,
    /// When access was granted; `Some` iff status is `Allowed`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub granted_at: Option<OffsetDateTime>,
    /// When the record was first created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Refreshed on every mutation.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl AccessRecord {
    /// Creates a fresh pending record, as written by a first access request.
    pub fn pending(provider_id: impl Into<String>, patient_id: impl Into<String>) -> Self {
        let now = now_utc();
        Self {
            provider_id: provider_id.into(),
            patient_id: patient_id.into(),
            status: AccessStatus::Pending,
            granted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the composite key of this record.
    pub fn key(&self) -> (&str, &str) {
        (&self.provider_id, &self.patient_id)
    }

    /// Checks the granted_at/status invariant: `granted_at` is `Some` iff the
    /// status is `Allowed`.
    pub fn granted_at_consistent(&self) -> bool {
        self.granted_at.is_some() == (self.status == AccessStatus::Allowed)
    }
}
