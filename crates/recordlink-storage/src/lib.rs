//! # recordlink-storage
//!
//! Storage abstraction layer for the RecordLink patient-records subsystem.
//!
//! This crate defines the traits and types that all storage backends must
//! implement. It does not contain any implementations - those are provided by
//! separate crates (`recordlink-db-memory` for the in-memory backend).
//!
//! ## Overview
//!
//! Three traits cover the subsystem's persistence needs:
//!
//! - [`AccessRecordStore`] - point lookup, insert, and update-by-key for the
//!   one-record-per-(provider, patient) access table
//! - [`AuditSink`] - append-only audit trail writes
//! - [`PatientStore`] - patient directory reads and the medical-event
//!   timeline
//!
//! ## Example
//!
//! ```ignore
//! use recordlink_storage::{AccessRecordStore, AccessPatch, StorageError};
//!
//! async fn mark_pending(
//!     store: &dyn AccessRecordStore,
//!     provider_id: &str,
//!     patient_id: &str,
//! ) -> Result<(), StorageError> {
//!     store
//!         .update(provider_id, patient_id, AccessPatch::pending())
//!         .await?;
//!     Ok(())
//! }
//! ```

mod error;
mod traits;
mod types;

// Re-export everything from submodules
pub use error::{ErrorCategory, StorageError, access_key};
pub use traits::{AccessRecordStore, AuditSink, PatientStore};
pub use types::AccessPatch;

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shared access-record store trait object.
pub type DynAccessStore = std::sync::Arc<dyn AccessRecordStore>;

/// Type alias for a shared audit sink trait object.
pub type DynAuditSink = std::sync::Arc<dyn AuditSink>;

/// Type alias for a shared patient store trait object.
pub type DynPatientStore = std::sync::Arc<dyn PatientStore>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use recordlink_storage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ErrorCategory, StorageError, access_key};
    pub use crate::traits::{AccessRecordStore, AuditSink, PatientStore};
    pub use crate::types::AccessPatch;
    pub use crate::{DynAccessStore, DynAuditSink, DynPatientStore, StorageResult};
}
