//! In-memory storage backend for RecordLink.
//!
//! This crate provides in-memory implementations of the storage traits from
//! `recordlink-storage`, using dashmap concurrent maps. It is the backend
//! used by tests and by embedded deployments that do not need persistence.
//!
//! # Example
//!
//! ```ignore
//! use recordlink_db_memory::InMemoryAccessStore;
//! use recordlink_storage::AccessRecordStore;
//! use recordlink_core::AccessRecord;
//!
//! let store = InMemoryAccessStore::new();
//! let record = store
//!     .insert(AccessRecord::pending("prov-1", "pat-1"))
//!     .await?;
//! ```

mod access_store;
mod audit_log;
mod patient_store;

pub use access_store::InMemoryAccessStore;
pub use audit_log::InMemoryAuditLog;
pub use patient_store::InMemoryPatientStore;

use recordlink_storage::{DynAccessStore, DynAuditSink, DynPatientStore};

/// Creates a new shareable in-memory access-record store.
pub fn create_access_store() -> DynAccessStore {
    std::sync::Arc::new(InMemoryAccessStore::new())
}

/// Creates a new shareable in-memory audit log.
pub fn create_audit_log() -> DynAuditSink {
    std::sync::Arc::new(InMemoryAuditLog::new())
}

/// Creates a new shareable in-memory patient store.
pub fn create_patient_store() -> DynPatientStore {
    std::sync::Arc::new(InMemoryPatientStore::new())
}
