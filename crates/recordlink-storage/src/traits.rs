//! Storage traits for the RecordLink storage abstraction layer.
//!
//! This module defines the contracts that all storage backends must
//! implement. Implementations must be thread-safe (`Send + Sync`).

use async_trait::async_trait;

use recordlink_core::{AccessRecord, AuditEntry, Document, MedicalEvent, Patient};

use crate::error::StorageError;
use crate::types::AccessPatch;

/// Storage trait for provider-patient access records.
///
/// A backend holds at most one record per (provider_id, patient_id) pair.
/// Point lookups, inserts, and in-place updates are the only operations the
/// access subsystem needs; records are never deleted in normal operation.
///
/// # Example
///
/// ```ignore
/// use recordlink_storage::{AccessRecordStore, StorageError};
///
/// async fn has_record(
///     store: &dyn AccessRecordStore,
///     provider_id: &str,
///     patient_id: &str,
/// ) -> Result<bool, StorageError> {
///     Ok(store.find(provider_id, patient_id).await?.is_some())
/// }
/// ```
#[async_trait]
pub trait AccessRecordStore: Send + Sync {
    /// Looks up the record for a (provider, patient) pair.
    ///
    /// Returns `None` if no record exists; absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn find(
        &self,
        provider_id: &str,
        patient_id: &str,
    ) -> Result<Option<AccessRecord>, StorageError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if a record for the same
    /// (provider, patient) pair exists.
    async fn insert(&self, record: AccessRecord) -> Result<AccessRecord, StorageError>;

    /// Applies a patch to an existing record and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no record exists for the pair.
    async fn update(
        &self,
        provider_id: &str,
        patient_id: &str,
        patch: AccessPatch,
    ) -> Result<AccessRecord, StorageError>;

    /// Returns every record held for a provider, in any status, ordered by
    /// patient ID. An unknown provider yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn records_for_provider(
        &self,
        provider_id: &str,
    ) -> Result<Vec<AccessRecord>, StorageError>;
}

/// Storage trait for the append-only audit trail.
///
/// Entries are write-once: backends append and read them, nothing mutates or
/// deletes them. Delivery is best-effort from the caller's point of view; the
/// audit logger in `recordlink-access` swallows append failures after a
/// diagnostic.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Appends one entry to the trail.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry could not be persisted. Callers on the
    /// mutation path must not propagate this to their own callers.
    async fn append(&self, entry: AuditEntry) -> Result<(), StorageError>;

    /// Returns the entries recorded for a (provider, patient) pair, oldest
    /// first. Used by review surfaces and tests.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn entries_for(
        &self,
        provider_id: &str,
        patient_id: &str,
    ) -> Result<Vec<AuditEntry>, StorageError>;
}

/// Storage trait for the patient directory and medical-event timeline.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Fetches a patient by ID. Returns `None` if the patient does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn get(&self, patient_id: &str) -> Result<Option<Patient>, StorageError>;

    /// Returns every patient, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn list_all(&self) -> Result<Vec<Patient>, StorageError>;

    /// Exact-match lookup by phone number.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Patient>, StorageError>;

    /// Exact-match lookup by email address.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn find_by_email(&self, email: &str) -> Result<Vec<Patient>, StorageError>;

    /// Case-insensitive substring search over patient name and ID, results
    /// ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn search_name_or_id(&self, term: &str) -> Result<Vec<Patient>, StorageError>;

    /// Returns the medical events for a patient, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn events_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<MedicalEvent>, StorageError>;

    /// Returns the documents attached to one medical event.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn documents_for_event(&self, event_id: &str) -> Result<Vec<Document>, StorageError>;
}
