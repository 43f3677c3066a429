//! End-to-end tests of the access-control state machine against the
//! in-memory backend.

use std::sync::Arc;

use async_trait::async_trait;

use recordlink_access::{
    AccessConfig, AccessControlService, DuplicateRequestPolicy, StatusView,
};
use recordlink_core::{AccessAction, AccessStatus, AuditEntry, AuditOutcome};
use recordlink_db_memory::{InMemoryAccessStore, InMemoryAuditLog};
use recordlink_storage::{AuditSink, StorageError};

const PROVIDER: &str = "prov-1";
const PATIENT: &str = "pat-1";

struct Fixture {
    service: AccessControlService,
    store: Arc<InMemoryAccessStore>,
    audit: Arc<InMemoryAuditLog>,
}

fn fixture() -> Fixture {
    fixture_with(AccessConfig::default())
}

fn fixture_with(config: AccessConfig) -> Fixture {
    let store = Arc::new(InMemoryAccessStore::new());
    let audit = Arc::new(InMemoryAuditLog::new());
    let service = AccessControlService::with_config(store.clone(), audit.clone(), config);
    Fixture {
        service,
        store,
        audit,
    }
}

async fn audit_entries(fx: &Fixture) -> Vec<AuditEntry> {
    fx.audit.entries_for(PROVIDER, PATIENT).await.unwrap()
}

#[tokio::test]
async fn request_access_creates_pending_record() {
    let fx = fixture();

    let outcome = fx.service.request_access(PROVIDER, PATIENT).await;
    assert!(outcome.success);
    let record = outcome.record.unwrap();
    assert_eq!(record.status, AccessStatus::Pending);
    assert!(record.granted_at.is_none());
    assert!(record.granted_at_consistent());
    assert_eq!(fx.store.len(), 1);

    let entries = audit_entries(&fx).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AccessAction::Request);
    assert_eq!(entries[0].outcome, AuditOutcome::Success);
}

#[tokio::test]
async fn duplicate_request_is_rejected_without_new_record() {
    let fx = fixture();
    fx.service.request_access(PROVIDER, PATIENT).await;

    let outcome = fx.service.request_access(PROVIDER, PATIENT).await;
    assert!(!outcome.success);
    assert!(outcome.record.is_none());
    assert!(outcome.error.unwrap().is_duplicate_request());
    assert_eq!(fx.store.len(), 1);

    let entries = audit_entries(&fx).await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].outcome, AuditOutcome::Failed);
    assert!(entries[1].note.as_deref().unwrap().contains("already requested"));
}

#[tokio::test]
async fn duplicate_request_can_be_idempotent() {
    let fx = fixture_with(
        AccessConfig::default().with_duplicate_request(DuplicateRequestPolicy::ReturnExisting),
    );
    let first = fx.service.request_access(PROVIDER, PATIENT).await;
    let first_record = first.record.unwrap();

    let outcome = fx.service.request_access(PROVIDER, PATIENT).await;
    assert!(outcome.success);
    let record = outcome.record.unwrap();
    assert_eq!(record.updated_at, first_record.updated_at);
    assert_eq!(fx.store.len(), 1);
}

#[tokio::test]
async fn deny_then_request_again_keeps_record_identity() {
    let fx = fixture();
    let created = fx
        .service
        .request_access(PROVIDER, PATIENT)
        .await
        .record
        .unwrap();

    let denied = fx.service.deny_access(PROVIDER, PATIENT).await;
    assert!(denied.success);
    let denied_record = denied.record.unwrap();
    assert_eq!(denied_record.status, AccessStatus::Denied);
    assert!(denied_record.granted_at.is_none());

    let again = fx.service.request_again(PROVIDER, PATIENT).await;
    assert!(again.success);
    let record = again.record.unwrap();
    assert_eq!(record.status, AccessStatus::Pending);
    assert!(record.granted_at.is_none());
    // Same row, not a new one: creation time survives, no duplicate appears.
    assert_eq!(record.created_at, created.created_at);
    assert_eq!(fx.store.len(), 1);
}

#[tokio::test]
async fn grant_sets_granted_at_and_revoke_clears_it() {
    let fx = fixture();
    fx.service.request_access(PROVIDER, PATIENT).await;

    let before = recordlink_core::now_utc();
    let granted = fx.service.grant_access(PROVIDER, PATIENT).await;
    assert!(granted.success);
    let record = granted.record.unwrap();
    assert_eq!(record.status, AccessStatus::Allowed);
    let granted_at = record.granted_at.unwrap();
    assert!(granted_at >= before);
    assert!(record.granted_at_consistent());

    let revoked = fx.service.revoke_access(PROVIDER, PATIENT).await;
    assert!(revoked.success);
    let record = revoked.record.unwrap();
    assert_eq!(record.status, AccessStatus::Revoked);
    assert!(record.granted_at.is_none());
    assert!(record.granted_at_consistent());
}

#[tokio::test]
async fn later_grants_produce_later_timestamps() {
    let fx = fixture();
    fx.service.request_access(PROVIDER, PATIENT).await;

    let first = fx
        .service
        .grant_access(PROVIDER, PATIENT)
        .await
        .record
        .unwrap()
        .granted_at
        .unwrap();

    fx.service.revoke_access(PROVIDER, PATIENT).await;
    fx.service.request_again(PROVIDER, PATIENT).await;

    let second = fx
        .service
        .grant_access(PROVIDER, PATIENT)
        .await
        .record
        .unwrap()
        .granted_at
        .unwrap();

    assert!(second >= first);
}

#[tokio::test]
async fn request_again_without_record_is_not_found() {
    let fx = fixture();

    let outcome = fx.service.request_again("prov-2", "pat-9").await;
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().is_not_found());
    assert!(fx.store.is_empty());

    let entries = fx.audit.entries_for("prov-2", "pat-9").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AccessAction::RequestAgain);
    assert_eq!(entries[0].outcome, AuditOutcome::Failed);
}

#[tokio::test]
async fn strict_mode_rejects_out_of_order_transitions() {
    let fx = fixture();
    fx.service.request_access(PROVIDER, PATIENT).await;
    fx.service.deny_access(PROVIDER, PATIENT).await;

    // denied is not a valid source for grant
    let outcome = fx.service.grant_access(PROVIDER, PATIENT).await;
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().is_invalid_transition());

    // nor for revoke
    let outcome = fx.service.revoke_access(PROVIDER, PATIENT).await;
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().is_invalid_transition());

    // the record is untouched
    let record = fx
        .service
        .check_access(PROVIDER, PATIENT)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, AccessStatus::Denied);

    // each rejection still produced a failed audit entry
    let entries = audit_entries(&fx).await;
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[2].outcome, AuditOutcome::Failed);
    assert_eq!(entries[3].outcome, AuditOutcome::Failed);
}

#[tokio::test]
async fn lenient_mode_allows_historical_jumps() {
    let fx = fixture_with(AccessConfig::default().with_lenient_transitions());
    fx.service.request_access(PROVIDER, PATIENT).await;
    fx.service.deny_access(PROVIDER, PATIENT).await;

    // lenient grant from denied mirrors the historical behavior
    let outcome = fx.service.grant_access(PROVIDER, PATIENT).await;
    assert!(outcome.success);
    let record = outcome.record.unwrap();
    assert_eq!(record.status, AccessStatus::Allowed);
    assert!(record.granted_at_consistent());

    // request_again stays guarded even in lenient mode
    let outcome = fx.service.request_again(PROVIDER, PATIENT).await;
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().is_invalid_transition());
}

#[tokio::test]
async fn every_operation_audits_exactly_once() {
    let fx = fixture();
    fx.service.request_access(PROVIDER, PATIENT).await;
    fx.service.grant_access(PROVIDER, PATIENT).await;
    fx.service.revoke_access(PROVIDER, PATIENT).await;
    fx.service.request_again(PROVIDER, PATIENT).await;
    fx.service.deny_access(PROVIDER, PATIENT).await;

    let entries = audit_entries(&fx).await;
    let actions: Vec<AccessAction> = entries.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            AccessAction::Request,
            AccessAction::Grant,
            AccessAction::Revoke,
            AccessAction::RequestAgain,
            AccessAction::Deny,
        ]
    );
    for entry in &entries {
        assert_eq!(entry.outcome, AuditOutcome::Success);
    }
}

#[tokio::test]
async fn get_status_tracks_the_lifecycle() {
    let fx = fixture();
    assert_eq!(
        fx.service.get_status(PROVIDER, PATIENT).await.unwrap(),
        StatusView::NoAccess
    );

    fx.service.request_access(PROVIDER, PATIENT).await;
    assert_eq!(
        fx.service.get_status(PROVIDER, PATIENT).await.unwrap(),
        StatusView::Pending
    );

    fx.service.grant_access(PROVIDER, PATIENT).await;
    assert_eq!(
        fx.service.get_status(PROVIDER, PATIENT).await.unwrap(),
        StatusView::Allowed
    );

    fx.service.revoke_access(PROVIDER, PATIENT).await;
    assert_eq!(
        fx.service.get_status(PROVIDER, PATIENT).await.unwrap(),
        StatusView::Revoked
    );
}

/// Audit sink that fails every append.
struct FailingSink;

#[async_trait]
impl AuditSink for FailingSink {
    async fn append(&self, _entry: AuditEntry) -> Result<(), StorageError> {
        Err(StorageError::connection("audit backend offline"))
    }

    async fn entries_for(
        &self,
        _provider_id: &str,
        _patient_id: &str,
    ) -> Result<Vec<AuditEntry>, StorageError> {
        Ok(vec![])
    }
}

#[tokio::test]
async fn audit_failure_never_changes_primary_result() {
    let store = Arc::new(InMemoryAccessStore::new());
    let service = AccessControlService::new(store.clone(), Arc::new(FailingSink));

    let outcome = service.request_access(PROVIDER, PATIENT).await;
    assert!(outcome.success);

    let outcome = service.grant_access(PROVIDER, PATIENT).await;
    assert!(outcome.success);
    assert_eq!(outcome.record.unwrap().status, AccessStatus::Allowed);

    // failures keep their shape too
    let outcome = service.request_access(PROVIDER, PATIENT).await;
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().is_duplicate_request());

    assert_eq!(store.len(), 1);
}
