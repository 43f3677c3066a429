//! The access-control service.
//!
//! This module enforces the provider-patient access state machine and reports
//! updated status to callers. Each mutating operation performs a single
//! record mutation against the [`AccessRecordStore`] and emits exactly one
//! audit entry through the [`AuditLogger`].
//!
//! # Usage
//!
//! ```ignore
//! use recordlink_access::{AccessControlService, AccessConfig};
//!
//! let service = AccessControlService::new(store, audit_sink);
//!
//! let outcome = service.request_access("prov-1", "pat-1").await;
//! if outcome.success {
//!     // record is Some(pending record)
//! }
//! ```
//!
//! # Failure reporting
//!
//! No error escapes to the presentation layer as a panic or a raw storage
//! error: mutating operations return an [`AccessOutcome`] carrying either the
//! updated record or a typed [`AccessError`]. Audit writes are best-effort
//! and never change the primary result.

use std::sync::Arc;

use recordlink_core::{AccessAction, AccessRecord, now_utc};
use recordlink_storage::{AccessPatch, AccessRecordStore, AuditSink, StorageError};

use crate::audit::AuditLogger;
use crate::config::{AccessConfig, DuplicateRequestPolicy};
use crate::error::{AccessError, AccessResult};
use crate::transition;
use crate::view::StatusView;

/// Result of one mutating access-control operation, shaped for the
/// presentation layer.
#[derive(Debug)]
pub struct AccessOutcome {
    /// Whether the primary mutation succeeded.
    pub success: bool,
    /// The record after the mutation, when one exists.
    pub record: Option<AccessRecord>,
    /// The failure, when the mutation did not succeed.
    pub error: Option<AccessError>,
}

impl AccessOutcome {
    fn ok(record: AccessRecord) -> Self {
        Self {
            success: true,
            record: Some(record),
            error: None,
        }
    }

    fn failed(error: AccessError) -> Self {
        Self {
            success: false,
            record: None,
            error: Some(error),
        }
    }

    /// The error display string, for surfaces that only render text.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

impl From<AccessResult<AccessRecord>> for AccessOutcome {
    fn from(result: AccessResult<AccessRecord>) -> Self {
        match result {
            Ok(record) => Self::ok(record),
            Err(error) => Self::failed(error),
        }
    }
}

/// Enforces the access-control state machine over a record store, with a
/// best-effort audit trail.
///
/// The service is stateless: all state lives in the injected store. Clone it
/// freely or share it behind an `Arc`.
#[derive(Clone)]
pub struct AccessControlService {
    store: Arc<dyn AccessRecordStore>,
    audit: AuditLogger,
    config: AccessConfig,
}

impl AccessControlService {
    /// Creates a service with the default configuration (strict transitions,
    /// duplicate requests rejected).
    pub fn new(store: Arc<dyn AccessRecordStore>, audit_sink: Arc<dyn AuditSink>) -> Self {
        Self::with_config(store, audit_sink, AccessConfig::default())
    }

    /// Creates a service with an explicit configuration.
    pub fn with_config(
        store: Arc<dyn AccessRecordStore>,
        audit_sink: Arc<dyn AuditSink>,
        config: AccessConfig,
    ) -> Self {
        Self {
            store,
            audit: AuditLogger::new(audit_sink),
            config,
        }
    }

    /// Returns the current record for a pair, or `None` when no record
    /// exists. Absence is not an error; only backend unavailability fails.
    pub async fn check_access(
        &self,
        provider_id: &str,
        patient_id: &str,
    ) -> AccessResult<Option<AccessRecord>> {
        self.store
            .find(provider_id, patient_id)
            .await
            .map_err(|err| AccessError::lookup(err.to_string()))
    }

    /// Returns the presentation-facing status view for a pair.
    pub async fn get_status(
        &self,
        provider_id: &str,
        patient_id: &str,
    ) -> AccessResult<StatusView> {
        let record = self.check_access(provider_id, patient_id).await?;
        Ok(StatusView::from_status(record.map(|r| r.status)))
    }

    /// First access request: creates a pending record for a pair with no
    /// existing record.
    pub async fn request_access(&self, provider_id: &str, patient_id: &str) -> AccessOutcome {
        self.run(AccessAction::Request, provider_id, patient_id).await
    }

    /// Renewed request after a denial or revocation: flips the existing
    /// record back to pending.
    pub async fn request_again(&self, provider_id: &str, patient_id: &str) -> AccessOutcome {
        self.run(AccessAction::RequestAgain, provider_id, patient_id)
            .await
    }

    /// Patient grants access: sets allowed and stamps `granted_at`.
    pub async fn grant_access(&self, provider_id: &str, patient_id: &str) -> AccessOutcome {
        self.run(AccessAction::Grant, provider_id, patient_id).await
    }

    /// Patient denies a request: sets denied and clears `granted_at`.
    pub async fn deny_access(&self, provider_id: &str, patient_id: &str) -> AccessOutcome {
        self.run(AccessAction::Deny, provider_id, patient_id).await
    }

    /// Patient revokes granted access: sets revoked and clears `granted_at`.
    pub async fn revoke_access(&self, provider_id: &str, patient_id: &str) -> AccessOutcome {
        self.run(AccessAction::Revoke, provider_id, patient_id).await
    }

    /// Runs one action: primary mutation first, then the best-effort audit
    /// write recording how it went.
    async fn run(
        &self,
        action: AccessAction,
        provider_id: &str,
        patient_id: &str,
    ) -> AccessOutcome {
        let result = self.apply(action, provider_id, patient_id).await;
        match &result {
            Ok(record) => {
                tracing::debug!(
                    provider_id,
                    patient_id,
                    action = %action,
                    status = %record.status,
                    "access transition applied"
                );
                self.audit.success(provider_id, patient_id, action).await;
            }
            Err(err) => {
                self.audit
                    .failure(provider_id, patient_id, action, err.to_string())
                    .await;
            }
        }
        AccessOutcome::from(result)
    }

    async fn apply(
        &self,
        action: AccessAction,
        provider_id: &str,
        patient_id: &str,
    ) -> AccessResult<AccessRecord> {
        let current = self.check_access(provider_id, patient_id).await?;
        let current_status = current.as_ref().map(|r| r.status);

        if action == AccessAction::Request {
            if let Some(existing) = current {
                return match self.config.duplicate_request {
                    DuplicateRequestPolicy::Reject => {
                        Err(AccessError::duplicate_request(provider_id, patient_id))
                    }
                    DuplicateRequestPolicy::ReturnExisting => Ok(existing),
                };
            }
            return self
                .store
                .insert(AccessRecord::pending(provider_id, patient_id))
                .await
                .map_err(|err| match err {
                    StorageError::AlreadyExists { .. } => {
                        AccessError::duplicate_request(provider_id, patient_id)
                    }
                    other => AccessError::backend(other.to_string()),
                });
        }

        let Some(status) = current_status else {
            return Err(AccessError::not_found(provider_id, patient_id));
        };

        // request_again is always guarded; grant/deny/revoke only in strict
        // mode (the lenient switch preserves the historical behavior of
        // flipping any existing record).
        let guarded = action == AccessAction::RequestAgain || self.config.strict_transitions;
        if guarded && !transition::permitted(action, Some(status)) {
            tracing::warn!(
                provider_id,
                patient_id,
                action = %action,
                from = %status,
                "access transition rejected"
            );
            return Err(AccessError::invalid_transition(action, status));
        }

        let patch = match action {
            AccessAction::Request => unreachable!("handled above"),
            AccessAction::RequestAgain => AccessPatch::pending(),
            AccessAction::Grant => AccessPatch::allowed(now_utc()),
            AccessAction::Deny => AccessPatch::denied(),
            AccessAction::Revoke => AccessPatch::revoked(),
        };

        self.store
            .update(provider_id, patient_id, patch)
            .await
            .map_err(|err| match err {
                StorageError::NotFound { .. } => {
                    AccessError::not_found(provider_id, patient_id)
                }
                other => AccessError::backend(other.to_string()),
            })
    }
}
